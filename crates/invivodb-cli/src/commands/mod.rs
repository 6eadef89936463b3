//! CLI command implementations.

pub mod animals;
pub mod check;
pub mod codec;
pub mod migrate;
pub mod serve;
pub mod species;
