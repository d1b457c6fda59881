use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. Reports whether the Gemini key is present without
/// failing, since a missing key only affects analyze requests.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "look-service",
        "version": env!("CARGO_PKG_VERSION"),
        "gemini_configured": state.api_key.is_some(),
    }))
}
