//! Dash-delimited legacy accession numbers.
//!
//! Records created before the fixed-width format carry identifiers like
//! `MM-001-2024` (`CODE-SEQUENCE-YEAR`). These are a separate value type:
//! the fixed-width validator never accepts them, and the only bridge between
//! the two is [`LegacyAccession::to_current`].

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::accession::{AccessionNumber, generate_accession_number};
use crate::error::AccessionError;

static LEGACY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]{2,3})-(\d{1,6})-(\d{4})$").expect("legacy accession pattern")
});

/// A parsed `CODE-SEQUENCE-YEAR` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegacyAccession {
    pub species_code: String,
    pub sequence: u32,
    pub year: i32,
}

impl LegacyAccession {
    /// Whether `value` has the legacy shape.
    pub fn matches(value: &str) -> bool {
        LEGACY_PATTERN.is_match(value)
    }

    /// Convert to the fixed-width format.
    pub fn to_current(&self) -> Result<AccessionNumber, AccessionError> {
        generate_accession_number(&self.species_code, self.year, self.sequence)
    }
}

impl FromStr for LegacyAccession {
    type Err = AccessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let not_legacy = || AccessionError::NotLegacy(s.to_string());
        let caps = LEGACY_PATTERN.captures(s).ok_or_else(not_legacy)?;

        Ok(Self {
            species_code: caps[1].to_string(),
            sequence: caps[2].parse().map_err(|_| not_legacy())?,
            year: caps[3].parse().map_err(|_| not_legacy())?,
        })
    }
}

impl fmt::Display for LegacyAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:03}-{}", self.species_code, self.sequence, self.year)
    }
}

/// Parse a legacy identifier and convert it in one step.
pub fn convert_legacy_accession(old: &str) -> Result<AccessionNumber, AccessionError> {
    old.parse::<LegacyAccession>()?.to_current()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accession::validate_accession_number;

    #[test]
    fn test_parse_legacy() {
        let legacy: LegacyAccession = "MM-001-2024".parse().unwrap();
        assert_eq!(legacy.species_code, "MM");
        assert_eq!(legacy.sequence, 1);
        assert_eq!(legacy.year, 2024);
        assert_eq!(legacy.to_string(), "MM-001-2024");
    }

    #[test]
    fn test_convert() {
        let acc = convert_legacy_accession("MM-001-2024").unwrap();
        assert_eq!(acc.as_str(), "MM2024000001DU");
        assert!(validate_accession_number(acc.as_str()));

        let acc = convert_legacy_accession("MAC-123-2025").unwrap();
        assert_eq!(acc.as_str(), "MAC2025000123YE");
    }

    #[test]
    fn test_rejects_other_shapes() {
        for value in [
            "MM20250000011Y",
            "MM-001",
            "MM-001-24",
            "mm-001-2024",
            "MM-0x1-2024",
            "MM-001-2024-1",
            "MM-1234567-2024",
            "",
        ] {
            assert!(!LegacyAccession::matches(value), "{value}");
            assert_eq!(
                value.parse::<LegacyAccession>(),
                Err(AccessionError::NotLegacy(value.to_string()))
            );
        }
    }

    #[test]
    fn test_conversion_keeps_generator_bounds() {
        assert_eq!(
            convert_legacy_accession("MM-001-0999"),
            Err(AccessionError::YearOutOfRange(999))
        );
    }
}
