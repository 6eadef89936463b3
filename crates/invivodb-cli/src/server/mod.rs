//! JSON HTTP API over the accession codec and the animal registry.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
