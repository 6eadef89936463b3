//! Axum application setup.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Species
        .route("/species", get(handlers::list_species))
        .route("/species/codes", get(handlers::list_species_codes))
        .route("/species/code", get(handlers::lookup_species_code))
        // Codec
        .route("/accessions/generate", post(handlers::generate))
        .route("/accessions/:accession", get(handlers::parse))
        .route("/accessions/:accession/validate", get(handlers::validate))
        // Animals
        .route(
            "/animals",
            get(handlers::list_animals).post(handlers::create_animal),
        )
        .route("/animals/:accession", get(handlers::get_animal));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    info!(%addr, "server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use invivodb::{AnimalRegistry, InvivoConfig};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let config = InvivoConfig::new().with_year(Some(2025));
        let registry = AnimalRegistry::open_in_memory(config).unwrap();
        create_router(AppState::new(registry))
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_parse_valid_accession() {
        let router = test_router();
        let (status, body) = send(&router, get("/api/accessions/MM20250000011Y")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["species_code"], "MM");
        assert_eq!(body["year"], 2025);
        assert_eq!(body["sequence"], 1);
        assert_eq!(body["checksum"], "1Y");
        assert_eq!(body["species"]["common_name"], "Mouse");
    }

    #[tokio::test]
    async fn test_parse_unlisted_species_code() {
        let router = test_router();
        let (status, body) = send(&router, get("/api/accessions/UNK20250000014A")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["species_code"], "UNK");
        assert!(body["species"].is_null());
    }

    #[tokio::test]
    async fn test_parse_legacy_is_bad_request() {
        let router = test_router();
        let (status, body) = send(&router, get("/api/accessions/MM-001-2024")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].as_str().unwrap().contains("Invalid accession number"));
    }

    #[tokio::test]
    async fn test_validate_reports_reason() {
        let router = test_router();
        let (status, body) = send(&router, get("/api/accessions/MM2025000001FF/validate")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert!(body["message"].as_str().unwrap().contains("Checksum mismatch"));

        let (_, body) = send(&router, get("/api/accessions/MM20250000011Y/validate")).await;
        assert_eq!(body["valid"], true);
        assert!(body["message"].is_null());
    }

    #[tokio::test]
    async fn test_generate() {
        let router = test_router();
        let request = post_json(
            "/api/accessions/generate",
            json!({"species_code": "MAC", "year": 2025, "sequence": 123}),
        );
        let (status, body) = send(&router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accession_number"], "MAC2025000123YE");
        assert_eq!(body["sequence"], 123);
    }

    #[tokio::test]
    async fn test_generate_overflow_rejected() {
        let router = test_router();
        let request = post_json(
            "/api/accessions/generate",
            json!({"species_code": "MM", "year": 2025, "sequence": 1_000_000}),
        );
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_species_code_lookup() {
        let router = test_router();
        let (_, body) = send(&router, get("/api/species/code?scientific_name=Macaca%20mulatta")).await;
        assert_eq!(body["species_code"], "MAC");
        assert_eq!(body["known"], true);

        let (_, body) = send(&router, get("/api/species/code?scientific_name=Danio%20rerio")).await;
        assert_eq!(body["species_code"], "UNK");
        assert_eq!(body["known"], false);
    }

    #[tokio::test]
    async fn test_create_and_fetch_animal() {
        let router = test_router();
        let (_, species) = send(&router, get("/api/species")).await;
        let rat_id = species
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["scientific_name"] == "Rattus norvegicus")
            .unwrap()["id"]
            .as_i64()
            .unwrap();

        let request = post_json(
            "/api/animals",
            json!({"species_id": rat_id, "strain": "Sprague-Dawley", "sex": "Female"}),
        );
        let (status, created) = send(&router, request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["accession_number"], "RN202500000118");

        let accession = created["accession_number"].as_str().unwrap().to_string();
        let (status, fetched) = send(&router, get(&format!("/api/animals/{accession}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["strain"], "Sprague-Dawley");
    }

    #[tokio::test]
    async fn test_unknown_animal_is_not_found() {
        let router = test_router();
        let (status, _) = send(&router, get("/api/animals/MM20250000011Y")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, get("/api/animals/not-an-accession")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_animal_missing_species() {
        let router = test_router();
        let (status, body) = send(&router, post_json("/api/animals", json!({"species_id": 99}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }
}
