//! API request handlers.

mod accessions;
mod animals;

pub use accessions::*;
pub use animals::*;
