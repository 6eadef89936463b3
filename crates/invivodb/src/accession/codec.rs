//! Generate, validate and parse fixed-width accession numbers.

use serde::{Deserialize, Serialize};

use super::checksum;
use super::number::AccessionNumber;
use crate::error::AccessionError;

/// Width of the year segment.
pub const YEAR_WIDTH: usize = 4;
/// Width of the zero-padded sequence segment.
pub const SEQUENCE_WIDTH: usize = 6;
/// Width of the check segment.
pub const CHECKSUM_WIDTH: usize = 2;
/// Largest sequence that fits the sequence segment.
pub const MAX_SEQUENCE: u32 = 999_999;

/// Years representable in the year segment.
pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 9999;

const MIN_CODE_LEN: usize = 2;
const MAX_CODE_LEN: usize = 3;
const FIXED_WIDTH: usize = YEAR_WIDTH + SEQUENCE_WIDTH + CHECKSUM_WIDTH;

/// Decoded components of an accession number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessionParts {
    /// Species prefix, e.g. "MM".
    pub species_code: String,
    /// Year the sequence was opened in.
    pub year: i32,
    /// Per-species-per-year counter.
    pub sequence: u32,
    /// The two check characters as written.
    pub checksum: String,
}

fn check_species_code(code: &str) -> Result<(), AccessionError> {
    let len_ok = (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len());
    if len_ok && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(AccessionError::InvalidSpeciesCode(code.to_string()))
    }
}

/// Generate an accession number from its identifying fields.
///
/// Fails fast rather than widening a field: the species code must be 2-3
/// uppercase letters, the year must have exactly four digits and the
/// sequence must not exceed [`MAX_SEQUENCE`].
///
/// # Example
///
/// ```
/// use invivodb::generate_accession_number;
///
/// let acc = generate_accession_number("MM", 2025, 1).unwrap();
/// assert_eq!(acc.as_str(), "MM20250000011Y");
/// ```
pub fn generate_accession_number(
    species_code: &str,
    year: i32,
    sequence: u32,
) -> Result<AccessionNumber, AccessionError> {
    check_species_code(species_code)?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AccessionError::YearOutOfRange(year));
    }
    if sequence > MAX_SEQUENCE {
        return Err(AccessionError::SequenceOverflow(sequence));
    }

    let mut value = format!("{species_code}{year:04}{sequence:06}");
    let check = checksum::compute(&value)
        .ok_or_else(|| AccessionError::InvalidSpeciesCode(species_code.to_string()))?;
    value.push_str(&check);

    let parts = AccessionParts {
        species_code: species_code.to_string(),
        year,
        sequence,
        checksum: check,
    };
    Ok(AccessionNumber::from_decoded(value, &parts))
}

fn segment<'a>(
    candidate: &'a str,
    range: std::ops::Range<usize>,
    name: &'static str,
    accept: impl Fn(u8) -> bool,
) -> Result<&'a str, AccessionError> {
    let value = &candidate[range];
    if value.bytes().all(accept) {
        Ok(value)
    } else {
        Err(AccessionError::MalformedSegment {
            segment: name,
            value: value.to_string(),
        })
    }
}

/// Decode `candidate`, reporting the first check it fails.
pub(crate) fn decode(candidate: &str) -> Result<AccessionParts, AccessionError> {
    let length = candidate.len();
    let code_len = match length.checked_sub(FIXED_WIDTH) {
        Some(n) if (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&n) => n,
        _ => return Err(AccessionError::InvalidLength { length }),
    };
    // Offsets below are byte offsets.
    if !candidate.is_ascii() {
        return Err(AccessionError::MalformedSegment {
            segment: "character set",
            value: candidate.to_string(),
        });
    }

    let year_start = code_len;
    let seq_start = year_start + YEAR_WIDTH;
    let check_start = seq_start + SEQUENCE_WIDTH;

    let species_code = segment(candidate, 0..year_start, "species code", |b| {
        b.is_ascii_uppercase()
    })?;
    let year = segment(candidate, year_start..seq_start, "year", |b| b.is_ascii_digit())?;
    let sequence = segment(candidate, seq_start..check_start, "sequence", |b| {
        b.is_ascii_digit()
    })?;
    let found = segment(candidate, check_start..length, "checksum", checksum::is_check_symbol)?;

    if !checksum::verify(candidate) {
        return Err(AccessionError::ChecksumMismatch {
            expected: checksum::compute(&candidate[..check_start]).unwrap_or_default(),
            found: found.to_string(),
        });
    }

    let malformed = |segment: &'static str, value: &str| AccessionError::MalformedSegment {
        segment,
        value: value.to_string(),
    };
    Ok(AccessionParts {
        species_code: species_code.to_string(),
        year: year.parse().map_err(|_| malformed("year", year))?,
        sequence: sequence.parse().map_err(|_| malformed("sequence", sequence))?,
        checksum: found.to_string(),
    })
}

/// Whether `candidate` is a well-formed accession number with a correct
/// checksum. Never panics; malformed input simply yields `false`.
///
/// Dash-delimited legacy identifiers such as `MM-001-2024` are not accepted
/// here; see [`crate::legacy`].
pub fn validate_accession_number(candidate: &str) -> bool {
    decode(candidate).is_ok()
}

/// Parse `candidate` into its components.
///
/// Fails with the same checks [`validate_accession_number`] applies; no
/// partial result is ever returned.
pub fn parse_accession_number(candidate: &str) -> Result<AccessionParts, AccessionError> {
    decode(candidate)
}
