//! SuiMentor scan proxy.
//!
//! HTTP server that forwards Move contract code to the Anthropic API with a
//! fixed audit prompt and relays the provider's JSON response. Endpoints:
//! - `POST /api/scan` with `{ "contractCode": "..." }`
//! - `GET /health` liveness probe

mod scan;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::{env, sync::Arc};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use scan::{ScanClient, ScanError};

struct AppState {
    scanner: ScanClient,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("suimentor_proxy=info".parse().unwrap()),
        )
        .init();

    let state = Arc::new(AppState {
        scanner: ScanClient::from_env(),
    });

    let app = Router::new()
        .route("/api/scan", post(handle_scan))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{}", port);

    info!("Scan proxy starting on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {}: {}", addr, err);
            std::process::exit(1);
        }
    };
    if let Err(err) = axum::serve(listener, app).await {
        error!("server error: {}", err);
        std::process::exit(1);
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Scan proxy is running" }))
}

#[derive(Deserialize)]
struct ScanRequest {
    #[serde(rename = "contractCode", default)]
    contract_code: String,
}

async fn handle_scan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScanRequest>,
) -> Response {
    if request.contract_code.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Contract code is required" })),
        )
            .into_response();
    }

    match state.scanner.analyze(&request.contract_code).await {
        Ok(verdict) => Json(verdict).into_response(),
        Err(err) => scan_error_response(err),
    }
}

fn scan_error_response(err: ScanError) -> Response {
    match err {
        ScanError::MissingApiKey => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "API key not configured" })),
        )
            .into_response(),
        ScanError::Upstream { status, details } => {
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(json!({
                    "error": "Failed to analyze contract",
                    "details": details,
                })),
            )
                .into_response()
        }
        ScanError::Transport(message) => {
            error!("scan proxy error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error",
                    "message": message,
                })),
            )
                .into_response()
        }
    }
}
