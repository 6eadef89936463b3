//! Runtime configuration.

use std::path::PathBuf;

use chrono::{Datelike, Utc};

use crate::accession::{MAX_YEAR, MIN_YEAR};
use crate::error::{InvivoError, Result};

/// Default database file name, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "invivodb.db";

/// Configuration for the record registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvivoConfig {
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Refuse to create animals whose species has no assigned code
    /// (resolves to "UNK"). When false, such records are created with the
    /// "UNK" prefix and a warning is logged.
    pub strict_species: bool,
    /// Fixed accession year (None = current UTC year).
    pub year_override: Option<i32>,
}

impl Default for InvivoConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE),
            strict_species: false,
            year_override: None,
        }
    }
}

impl InvivoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn with_strict_species(mut self, strict: bool) -> Self {
        self.strict_species = strict;
        self
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year_override = year;
        self
    }

    /// Reject settings no registry can work with.
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(InvivoError::Config("database path is empty".to_string()));
        }
        if let Some(year) = self.year_override {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(InvivoError::Config(format!(
                    "year {year} is outside {MIN_YEAR}-{MAX_YEAR}"
                )));
            }
        }
        Ok(())
    }

    /// Year new accession numbers are issued in.
    pub fn current_year(&self) -> i32 {
        self.year_override.unwrap_or_else(|| Utc::now().year())
    }
}
