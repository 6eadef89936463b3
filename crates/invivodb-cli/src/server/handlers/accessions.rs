//! Codec handlers: generate, validate, parse, species-code lookup.

use axum::{
    Json,
    extract::{Path, Query},
};
use chrono::{Datelike, Utc};
use invivodb::species::by_code;
use invivodb::{
    AccessionParts, SPECIES_TABLE, SpeciesEntry, UNKNOWN_SPECIES_CODE, generate_accession_number,
    parse_accession_number, species_code,
};
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;

/// Request body for generating an accession number.
#[derive(Deserialize)]
pub struct GenerateRequest {
    pub species_code: String,
    /// Defaults to the current year.
    pub year: Option<i32>,
    pub sequence: u32,
}

/// A generated accession number.
#[derive(Serialize)]
pub struct AccessionResponse {
    pub accession_number: String,
    #[serde(flatten)]
    pub parts: AccessionParts,
}

/// Validation verdict.
#[derive(Serialize)]
pub struct ValidationResponse {
    pub accession_number: String,
    pub valid: bool,
    /// Why the value is invalid, for display next to the input.
    pub message: Option<String>,
}

/// A decoded accession number, with its species when the code is known.
#[derive(Serialize)]
pub struct ParseResponse {
    #[serde(flatten)]
    pub parts: AccessionParts,
    pub species: Option<&'static SpeciesEntry>,
}

/// Query for a species-code lookup.
#[derive(Deserialize)]
pub struct SpeciesCodeQuery {
    pub scientific_name: String,
}

/// Species-code lookup result.
#[derive(Serialize)]
pub struct SpeciesCodeResponse {
    pub scientific_name: String,
    pub species_code: &'static str,
    pub known: bool,
}

/// GET /api/species/codes
pub async fn list_species_codes() -> Json<&'static [SpeciesEntry]> {
    Json(SPECIES_TABLE)
}

/// GET /api/species/code?scientific_name=...
pub async fn lookup_species_code(Query(query): Query<SpeciesCodeQuery>) -> Json<SpeciesCodeResponse> {
    let code = species_code(&query.scientific_name);
    Json(SpeciesCodeResponse {
        scientific_name: query.scientific_name,
        species_code: code,
        known: code != UNKNOWN_SPECIES_CODE,
    })
}

/// POST /api/accessions/generate
pub async fn generate(Json(req): Json<GenerateRequest>) -> Result<Json<AccessionResponse>, ApiError> {
    let year = req.year.unwrap_or_else(|| Utc::now().year());
    let accession = generate_accession_number(&req.species_code, year, req.sequence)?;
    Ok(Json(AccessionResponse {
        parts: accession.parts(),
        accession_number: accession.into_string(),
    }))
}

/// GET /api/accessions/:accession/validate
pub async fn validate(Path(accession): Path<String>) -> Json<ValidationResponse> {
    let result = parse_accession_number(&accession);
    Json(ValidationResponse {
        valid: result.is_ok(),
        message: result.err().map(|e| e.to_string()),
        accession_number: accession,
    })
}

/// GET /api/accessions/:accession
pub async fn parse(Path(accession): Path<String>) -> Result<Json<ParseResponse>, ApiError> {
    let parts = parse_accession_number(&accession)?;
    Ok(Json(ParseResponse {
        species: by_code(&parts.species_code),
        parts,
    }))
}
