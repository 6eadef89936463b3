//! Accession-number codec.
//!
//! Every animal record gets an accession number: a compact, checksummed,
//! human-typable identifier laid out as
//!
//! ```text
//! MM     2025   000001   1Y
//! ^code  ^year  ^seq     ^check
//! ```
//!
//! with no separators. The species code is 2-3 uppercase letters, so a
//! complete identifier is 14 or 15 characters long. The codec is pure: it
//! performs no I/O and holds no state.
//!
//! # Example
//!
//! ```
//! use invivodb::accession::{
//!     generate_accession_number, parse_accession_number, validate_accession_number,
//! };
//!
//! let acc = generate_accession_number("MAC", 2025, 123).unwrap();
//! assert!(validate_accession_number(acc.as_str()));
//!
//! let parts = parse_accession_number(acc.as_str()).unwrap();
//! assert_eq!(parts.species_code, "MAC");
//! assert_eq!(parts.sequence, 123);
//!
//! assert!(!validate_accession_number("MM-001-2024"));
//! ```

pub mod checksum;
mod codec;
mod number;

pub use codec::{
    AccessionParts, CHECKSUM_WIDTH, MAX_SEQUENCE, MAX_YEAR, MIN_YEAR, SEQUENCE_WIDTH, YEAR_WIDTH,
    generate_accession_number, parse_accession_number, validate_accession_number,
};
pub use number::AccessionNumber;
