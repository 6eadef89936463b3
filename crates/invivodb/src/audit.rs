//! Batch validation of accession-number lists.
//!
//! Used to check every identifier in the registry, or a column of an
//! exported CSV/TSV file, before and after a migration.

use std::fs::File;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::accession::parse_accession_number;
use crate::error::{InvivoError, Result};
use crate::legacy::LegacyAccession;

/// Classification of a single identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessionStatus {
    /// Valid fixed-width identifier.
    Valid,
    /// Dash-delimited identifier awaiting migration.
    Legacy,
    /// Neither.
    Invalid,
    /// Blank cell.
    Empty,
}

/// Result of checking one identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditFinding {
    /// The value as given.
    pub value: String,
    pub status: AccessionStatus,
    /// Decoding error for non-valid values.
    pub error: Option<String>,
}

/// Statistics over a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditStats {
    pub valid_count: usize,
    pub legacy_count: usize,
    pub invalid_count: usize,
    pub empty_count: usize,
    /// Valid identifiers per species code, in first-seen order.
    pub by_species: IndexMap<String, usize>,
}

impl AuditStats {
    /// True when every non-blank value is a valid fixed-width identifier.
    pub fn all_valid(&self) -> bool {
        self.legacy_count == 0 && self.invalid_count == 0
    }
}

/// Check a single value.
pub fn audit_value(value: &str) -> AuditFinding {
    let trimmed = value.trim();
    let (status, error) = if trimmed.is_empty() {
        (AccessionStatus::Empty, None)
    } else {
        match parse_accession_number(trimmed) {
            Ok(_) => (AccessionStatus::Valid, None),
            Err(e) if LegacyAccession::matches(trimmed) => {
                (AccessionStatus::Legacy, Some(e.to_string()))
            }
            Err(e) => (AccessionStatus::Invalid, Some(e.to_string())),
        }
    };

    AuditFinding {
        value: value.to_string(),
        status,
        error,
    }
}

/// Check every value and return per-value findings plus statistics.
pub fn audit_values<I, S>(values: I) -> (Vec<AuditFinding>, AuditStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut findings = Vec::new();
    let mut stats = AuditStats::default();

    for value in values {
        let finding = audit_value(value.as_ref());
        match finding.status {
            AccessionStatus::Valid => {
                stats.valid_count += 1;
                if let Ok(parts) = parse_accession_number(finding.value.trim()) {
                    *stats.by_species.entry(parts.species_code).or_insert(0) += 1;
                }
            }
            AccessionStatus::Legacy => stats.legacy_count += 1,
            AccessionStatus::Invalid => stats.invalid_count += 1,
            AccessionStatus::Empty => stats.empty_count += 1,
        }
        findings.push(finding);
    }

    (findings, stats)
}

/// Read one named column from a CSV or TSV file.
///
/// The delimiter is chosen from the extension: `.tsv`/`.tab` are
/// tab-separated, anything else is comma-separated.
pub fn read_accession_column(path: impl AsRef<Path>, column: &str) -> Result<Vec<String>> {
    let path = path.as_ref();
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    };

    let file = File::open(path).map_err(|source| InvivoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);

    let index = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| InvivoError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        values.push(record.get(index).unwrap_or_default().to_string());
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_value_statuses() {
        assert_eq!(audit_value("MM20250000011Y").status, AccessionStatus::Valid);
        assert_eq!(audit_value(" MM20250000011Y ").status, AccessionStatus::Valid);
        assert_eq!(audit_value("MM-001-2024").status, AccessionStatus::Legacy);
        assert_eq!(audit_value("MM2025000001FF").status, AccessionStatus::Invalid);
        assert_eq!(audit_value("   ").status, AccessionStatus::Empty);
    }

    #[test]
    fn test_invalid_carries_reason() {
        let finding = audit_value("MM2025000001FF");
        assert!(finding.error.unwrap().contains("Checksum mismatch"));
    }

    #[test]
    fn test_audit_values_stats() {
        let values = [
            "MM20250000011Y",
            "RN20250000426G",
            "MM202500000219",
            "MM-001-2024",
            "junk",
            "",
        ];
        let (findings, stats) = audit_values(values);

        assert_eq!(findings.len(), 6);
        assert_eq!(stats.valid_count, 3);
        assert_eq!(stats.legacy_count, 1);
        assert_eq!(stats.invalid_count, 1);
        assert_eq!(stats.empty_count, 1);
        assert!(!stats.all_valid());

        let species: Vec<_> = stats.by_species.iter().collect();
        assert_eq!(species, vec![(&"MM".to_string(), &2), (&"RN".to_string(), &1)]);
    }
}
