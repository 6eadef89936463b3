//! Planning the one-time conversion of legacy accession numbers.
//!
//! A plan classifies every stored identifier and never resolves conflicts on
//! its own: when a converted identifier would clash with one already held by
//! another record, or two legacy identifiers convert to the same value, the
//! records involved are reported as collisions and left unconverted.
//!
//! ```
//! use invivodb::migration::{plan_migration, StoredAccession};
//!
//! let records = vec![
//!     StoredAccession::new(1, "MM-001-2024"),
//!     StoredAccession::new(2, "MM20250000011Y"),
//! ];
//! let report = plan_migration(&records);
//! assert_eq!(report.summary.converted, 1);
//! assert_eq!(report.summary.already_current, 1);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::accession::{AccessionNumber, validate_accession_number};
use crate::legacy::LegacyAccession;

/// An identifier as stored on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccession {
    pub record_id: i64,
    pub accession_number: String,
}

impl StoredAccession {
    pub fn new(record_id: i64, accession_number: impl Into<String>) -> Self {
        Self {
            record_id,
            accession_number: accession_number.into(),
        }
    }
}

/// What the migration will do with one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// Already a valid fixed-width identifier.
    AlreadyCurrent,
    /// Will be rewritten to `new`.
    Converted { new: AccessionNumber },
    /// Neither current nor convertible.
    Unconvertible { reason: String },
    /// `new` is already taken by, or also claimed by, another record.
    Collision {
        new: AccessionNumber,
        conflicting_record_id: i64,
    },
}

/// One record in a migration plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationEntry {
    pub record_id: i64,
    pub original: String,
    #[serde(flatten)]
    pub outcome: MigrationOutcome,
}

/// Outcome counts for a migration plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationSummary {
    pub total: usize,
    pub already_current: usize,
    pub converted: usize,
    pub unconvertible: usize,
    pub collisions: usize,
}

/// A complete migration plan, in input order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationReport {
    pub entries: Vec<MigrationEntry>,
    pub summary: MigrationSummary,
}

impl MigrationReport {
    /// Records to rewrite as `(record_id, original, new)`.
    pub fn conversions(&self) -> impl Iterator<Item = (i64, &str, &AccessionNumber)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            MigrationOutcome::Converted { new } => Some((e.record_id, e.original.as_str(), new)),
            _ => None,
        })
    }

    /// Entries that need a human decision.
    pub fn problems(&self) -> impl Iterator<Item = &MigrationEntry> {
        self.entries.iter().filter(|e| {
            matches!(
                e.outcome,
                MigrationOutcome::Unconvertible { .. } | MigrationOutcome::Collision { .. }
            )
        })
    }

    /// True when nothing is left for a human to resolve.
    pub fn is_clean(&self) -> bool {
        self.summary.unconvertible == 0 && self.summary.collisions == 0
    }
}

/// Classify every record and detect collisions.
pub fn plan_migration(records: &[StoredAccession]) -> MigrationReport {
    // Identifiers already in the fixed-width format, by holder.
    let current: HashMap<&str, i64> = records
        .iter()
        .filter(|r| validate_accession_number(&r.accession_number))
        .map(|r| (r.accession_number.as_str(), r.record_id))
        .collect();

    let mut outcomes: Vec<MigrationOutcome> = Vec::with_capacity(records.len());
    let mut claims: HashMap<String, Vec<usize>> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let value = record.accession_number.as_str();
        let outcome = if current.contains_key(value) {
            MigrationOutcome::AlreadyCurrent
        } else {
            match value.parse::<LegacyAccession>().and_then(|l| l.to_current()) {
                Ok(new) => match current.get(new.as_str()) {
                    Some(&holder) if holder != record.record_id => MigrationOutcome::Collision {
                        new,
                        conflicting_record_id: holder,
                    },
                    _ => {
                        claims.entry(new.to_string()).or_default().push(index);
                        MigrationOutcome::Converted { new }
                    }
                },
                Err(e) => MigrationOutcome::Unconvertible {
                    reason: e.to_string(),
                },
            }
        };
        outcomes.push(outcome);
    }

    // Two legacy records converting to the same identifier: flag all of them.
    for indices in claims.values().filter(|v| v.len() > 1) {
        for &index in indices {
            let other = indices
                .iter()
                .find(|&&i| i != index)
                .map(|&i| records[i].record_id);
            let replacement = match (other, &outcomes[index]) {
                (Some(conflicting_record_id), MigrationOutcome::Converted { new }) => {
                    Some(MigrationOutcome::Collision {
                        new: new.clone(),
                        conflicting_record_id,
                    })
                }
                _ => None,
            };
            if let Some(replacement) = replacement {
                outcomes[index] = replacement;
            }
        }
    }

    let mut summary = MigrationSummary {
        total: records.len(),
        ..Default::default()
    };
    let entries = records
        .iter()
        .zip(outcomes)
        .map(|(record, outcome)| {
            match outcome {
                MigrationOutcome::AlreadyCurrent => summary.already_current += 1,
                MigrationOutcome::Converted { .. } => summary.converted += 1,
                MigrationOutcome::Unconvertible { .. } => summary.unconvertible += 1,
                MigrationOutcome::Collision { .. } => summary.collisions += 1,
            }
            MigrationEntry {
                record_id: record.record_id,
                original: record.accession_number.clone(),
                outcome,
            }
        })
        .collect();

    MigrationReport { entries, summary }
}
