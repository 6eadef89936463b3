//! Error types for the invivoDB library.

use std::path::PathBuf;
use thiserror::Error;

/// Why a string failed to decode as an accession number, or why a
/// generation request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessionError {
    /// Total length matches neither the 2-letter nor the 3-letter layout.
    #[error("Invalid length {length}: expected 14 (2-letter code) or 15 (3-letter code) characters")]
    InvalidLength { length: usize },

    /// A fixed-offset segment contains characters outside its class.
    #[error("Malformed {segment} segment '{value}'")]
    MalformedSegment {
        segment: &'static str,
        value: String,
    },

    /// The embedded check characters do not match the recomputed ones.
    #[error("Checksum mismatch: expected '{expected}', found '{found}'")]
    ChecksumMismatch { expected: String, found: String },

    /// Species code is not 2-3 uppercase ASCII letters.
    #[error("Invalid species code '{0}': expected 2-3 uppercase letters")]
    InvalidSpeciesCode(String),

    /// Year does not fit the 4-digit field.
    #[error("Year {0} out of range: expected 1000-9999")]
    YearOutOfRange(i32),

    /// Sequence does not fit the 6-digit field.
    #[error("Sequence {0} exceeds the per-species-per-year ceiling of 999999")]
    SequenceOverflow(u32),

    /// Input is not a dash-delimited legacy identifier.
    #[error("Not a legacy accession number: '{0}'")]
    NotLegacy(String),
}

/// Main error type for invivoDB operations.
#[derive(Debug, Error)]
pub enum InvivoError {
    /// Accession number encoding or decoding failure.
    #[error("Accession error: {0}")]
    Accession(#[from] AccessionError),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Requested column is not present in an input file.
    #[error("Column '{column}' not found in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    /// Error from the SQLite store.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No sequence numbers left for a species and year.
    #[error("Sequence space exhausted for {species_code} in {year}")]
    SequenceExhausted { species_code: String, year: i32 },

    /// Species resolved to the "UNK" sentinel while strict mode is on.
    #[error("Unknown species '{0}': no accession code is assigned")]
    UnknownSpecies(String),

    /// Referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for invivoDB operations.
pub type Result<T> = std::result::Result<T, InvivoError>;
