//! Record types stored in the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accession::AccessionNumber;
use crate::species::species_code;

/// A species that animals can belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: i64,
    /// e.g. "Mouse"
    pub common_name: String,
    /// e.g. "Mus musculus"
    pub scientific_name: String,
    /// NCBI Taxonomy ID.
    pub taxonomy_id: Option<String>,
}

impl Species {
    /// Accession prefix for this species ("UNK" if none is assigned).
    pub fn code(&self) -> &'static str {
        species_code(&self.scientific_name)
    }
}

/// Fields for a new species row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSpecies {
    pub common_name: String,
    pub scientific_name: String,
    pub taxonomy_id: Option<String>,
}

/// An experimental animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: i64,
    /// As stored. Records imported before the fixed-width format may still
    /// carry legacy identifiers until migrated.
    pub accession_number: String,
    pub species_id: i64,
    /// e.g. "C57BL/6"
    pub strain: Option<String>,
    /// Weeks.
    pub age_at_start: Option<f64>,
    /// Grams.
    pub weight_at_start: Option<f64>,
    pub sex: Option<String>,
    pub genetic_background: Option<String>,
    pub housing_conditions: Option<String>,
    pub ethical_approval: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Animal {
    /// The stored identifier, if it is a valid fixed-width accession number.
    pub fn accession(&self) -> Option<AccessionNumber> {
        self.accession_number.parse().ok()
    }
}

/// Fields supplied when creating an animal. The accession number is never
/// supplied; it is assigned by the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAnimal {
    pub species_id: i64,
    #[serde(default)]
    pub strain: Option<String>,
    #[serde(default)]
    pub age_at_start: Option<f64>,
    #[serde(default)]
    pub weight_at_start: Option<f64>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub genetic_background: Option<String>,
    #[serde(default)]
    pub housing_conditions: Option<String>,
    #[serde(default)]
    pub ethical_approval: Option<String>,
}

impl NewAnimal {
    pub fn new(species_id: i64) -> Self {
        Self {
            species_id,
            ..Default::default()
        }
    }
}
