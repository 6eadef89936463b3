//! Species codes used as accession-number prefixes.
//!
//! The table is fixed data: adding a species is a data change, not a logic
//! change. Each entry also carries the common name and NCBI Taxonomy ID used
//! to seed the registry's species table.
//!
//! ```
//! use invivodb::species::{species_code, UNKNOWN_SPECIES_CODE};
//!
//! assert_eq!(species_code("Mus musculus"), "MM");
//! assert_eq!(species_code("Mesocricetus auratus"), UNKNOWN_SPECIES_CODE);
//! ```

use serde::Serialize;

/// Code returned for scientific names missing from [`SPECIES_TABLE`].
///
/// This is a fallback, not an error: callers must not assume the code they
/// get back is present in the table.
pub const UNKNOWN_SPECIES_CODE: &str = "UNK";

/// A row of the species table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeciesEntry {
    /// Binomial (or trinomial) scientific name.
    pub scientific_name: &'static str,
    /// Accession-number prefix.
    pub code: &'static str,
    /// Common name.
    pub common_name: &'static str,
    /// NCBI Taxonomy ID.
    pub taxonomy_id: u32,
}

/// All species with an assigned code.
pub const SPECIES_TABLE: &[SpeciesEntry] = &[
    SpeciesEntry {
        scientific_name: "Mus musculus",
        code: "MM",
        common_name: "Mouse",
        taxonomy_id: 10090,
    },
    SpeciesEntry {
        scientific_name: "Rattus norvegicus",
        code: "RN",
        common_name: "Rat",
        taxonomy_id: 10116,
    },
    SpeciesEntry {
        scientific_name: "Macaca mulatta",
        code: "MAC",
        common_name: "Macaque",
        taxonomy_id: 9544,
    },
    SpeciesEntry {
        scientific_name: "Canis lupus familiaris",
        code: "CAN",
        common_name: "Dog",
        taxonomy_id: 9615,
    },
];

/// Find the table entry for a scientific name (exact, after trimming).
pub fn lookup(scientific_name: &str) -> Option<&'static SpeciesEntry> {
    let name = scientific_name.trim();
    SPECIES_TABLE.iter().find(|e| e.scientific_name == name)
}

/// Find the table entry for a species code.
pub fn by_code(code: &str) -> Option<&'static SpeciesEntry> {
    SPECIES_TABLE.iter().find(|e| e.code == code)
}

/// Species code for a scientific name, or [`UNKNOWN_SPECIES_CODE`].
pub fn species_code(scientific_name: &str) -> &'static str {
    lookup(scientific_name).map_or(UNKNOWN_SPECIES_CODE, |e| e.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accession::generate_accession_number;

    #[test]
    fn test_known_species() {
        assert_eq!(species_code("Mus musculus"), "MM");
        assert_eq!(species_code("Rattus norvegicus"), "RN");
        assert_eq!(species_code("Macaca mulatta"), "MAC");
        assert_eq!(species_code("Canis lupus familiaris"), "CAN");
    }

    #[test]
    fn test_unknown_species_falls_back() {
        assert_eq!(species_code("Mesocricetus auratus"), "UNK");
        assert_eq!(species_code(""), "UNK");
        // Lookup is case-sensitive.
        assert_eq!(species_code("mus musculus"), "UNK");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(species_code("  Mus musculus\n"), "MM");
    }

    #[test]
    fn test_by_code() {
        assert_eq!(by_code("MAC").map(|e| e.common_name), Some("Macaque"));
        assert!(by_code("UNK").is_none());
    }

    #[test]
    fn test_table_codes_are_usable() {
        for entry in SPECIES_TABLE {
            assert!(
                generate_accession_number(entry.code, 2025, 1).is_ok(),
                "code {} cannot generate",
                entry.code
            );
        }
        assert!(generate_accession_number(UNKNOWN_SPECIES_CODE, 2025, 1).is_ok());
    }
}
