//! Record handlers: species rows and animals.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use invivodb::{AccessionNumber, Animal, NewAnimal, Species};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// GET /api/species
pub async fn list_species(State(state): State<AppState>) -> Result<Json<Vec<Species>>, ApiError> {
    let registry = state.registry.lock().await;
    Ok(Json(registry.list_species()?))
}

/// GET /api/animals
pub async fn list_animals(State(state): State<AppState>) -> Result<Json<Vec<Animal>>, ApiError> {
    let registry = state.registry.lock().await;
    Ok(Json(registry.list_animals(None)?))
}

/// POST /api/animals
pub async fn create_animal(
    State(state): State<AppState>,
    Json(new): Json<NewAnimal>,
) -> Result<(StatusCode, Json<Animal>), ApiError> {
    let mut registry = state.registry.lock().await;
    let animal = registry.create_animal(&new)?;
    Ok((StatusCode::CREATED, Json(animal)))
}

/// GET /api/animals/:accession
pub async fn get_animal(
    State(state): State<AppState>,
    Path(accession): Path<String>,
) -> Result<Json<Animal>, ApiError> {
    let accession: AccessionNumber = accession.parse()?;
    let registry = state.registry.lock().await;
    registry
        .find_by_accession(&accession)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Animal not found: {}", accession)))
}
