//! The validated accession-number value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::codec::{AccessionParts, SEQUENCE_WIDTH, YEAR_WIDTH, decode};
use crate::error::AccessionError;

/// An accession number known to be well-formed and checksum-consistent.
///
/// Equality is equality of the string form. There is deliberately no
/// `Ord`: sequence order must come from [`AccessionNumber::sequence`], not
/// from comparing strings.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessionNumber {
    value: String,
    code_len: usize,
    year: i32,
    sequence: u32,
}

impl AccessionNumber {
    pub(crate) fn from_decoded(value: String, parts: &AccessionParts) -> Self {
        Self {
            value,
            code_len: parts.species_code.len(),
            year: parts.year,
            sequence: parts.sequence,
        }
    }

    /// Species prefix.
    pub fn species_code(&self) -> &str {
        &self.value[..self.code_len]
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The two trailing check characters.
    pub fn checksum(&self) -> &str {
        &self.value[self.code_len + YEAR_WIDTH + SEQUENCE_WIDTH..]
    }

    /// Decoded components.
    pub fn parts(&self) -> AccessionParts {
        AccessionParts {
            species_code: self.species_code().to_string(),
            year: self.year,
            sequence: self.sequence,
            checksum: self.checksum().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl FromStr for AccessionNumber {
    type Err = AccessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = decode(s)?;
        Ok(Self::from_decoded(s.to_string(), &parts))
    }
}

impl TryFrom<String> for AccessionNumber {
    type Error = AccessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let parts = decode(&value)?;
        Ok(Self::from_decoded(value, &parts))
    }
}

impl From<AccessionNumber> for String {
    fn from(acc: AccessionNumber) -> Self {
        acc.value
    }
}

impl PartialEq for AccessionNumber {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl std::hash::Hash for AccessionNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialEq<str> for AccessionNumber {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for AccessionNumber {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl AsRef<str> for AccessionNumber {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for AccessionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accession::generate_accession_number;

    #[test]
    fn test_accessors() {
        let acc: AccessionNumber = "MAC2025000123YE".parse().unwrap();
        assert_eq!(acc.species_code(), "MAC");
        assert_eq!(acc.year(), 2025);
        assert_eq!(acc.sequence(), 123);
        assert_eq!(acc.checksum(), "YE");
        assert_eq!(acc.to_string(), "MAC2025000123YE");
    }

    #[test]
    fn test_from_str_rejects_invalid() {
        assert!("MM-001-2024".parse::<AccessionNumber>().is_err());
        assert!("MM2025000001FF".parse::<AccessionNumber>().is_err());
    }

    #[test]
    fn test_equality_is_string_equality() {
        let generated = generate_accession_number("RN", 2025, 42).unwrap();
        let parsed: AccessionNumber = "RN20250000426G".parse().unwrap();
        assert_eq!(generated, parsed);
        assert_eq!(parsed, "RN20250000426G");
    }

    #[test]
    fn test_serde_validates() {
        let acc = generate_accession_number("MM", 2025, 1).unwrap();
        let json = serde_json::to_string(&acc).unwrap();
        assert_eq!(json, "\"MM20250000011Y\"");

        let back: AccessionNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, acc);

        assert!(serde_json::from_str::<AccessionNumber>("\"MM-001-2024\"").is_err());
    }
}
