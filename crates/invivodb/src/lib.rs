//! invivoDB: record keeping for in-vivo experimental data.
//!
//! The heart of the crate is the accession-number codec: every animal record
//! receives a compact, checksummed identifier such as `MM20250000011Y`
//! (species code, year, 6-digit sequence, 2 check characters) which is
//! generated once, validated on input and parsed back for display and for
//! sequence continuation.
//!
//! # Core Principles
//!
//! - **Fixed width**: no separators, no variable-width fields
//! - **Checked, not assumed**: every identifier carries a check code that is
//!   recomputed on every validation
//! - **Immutable**: an identifier is a natural key and is never reassigned
//!
//! # Example
//!
//! ```
//! use invivodb::{generate_accession_number, parse_accession_number, species_code};
//!
//! let code = species_code("Rattus norvegicus");
//! let acc = generate_accession_number(code, 2025, 42).unwrap();
//! assert_eq!(acc.as_str(), "RN20250000426G");
//!
//! let parts = parse_accession_number("RN20250000426G").unwrap();
//! assert_eq!(parts.sequence, 42);
//! ```

pub mod accession;
pub mod audit;
pub mod config;
pub mod error;
pub mod legacy;
pub mod migration;
pub mod registry;
pub mod species;

pub use accession::{
    AccessionNumber, AccessionParts, generate_accession_number, parse_accession_number,
    validate_accession_number,
};
pub use audit::{AccessionStatus, AuditFinding, AuditStats};
pub use config::InvivoConfig;
pub use error::{AccessionError, InvivoError, Result};
pub use legacy::{LegacyAccession, convert_legacy_accession};
pub use migration::{MigrationEntry, MigrationOutcome, MigrationReport, MigrationSummary};
pub use registry::{Animal, AnimalRegistry, NewAnimal, NewSpecies, Species};
pub use species::{SPECIES_TABLE, SpeciesEntry, UNKNOWN_SPECIES_CODE, species_code};
