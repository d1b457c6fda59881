use crate::error::LookError;
use crate::models::LookRequest;
use crate::services::prompt;
use crate::startup::AppState;
use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Turn a style request into hairstyle suggestions from Gemini.
///
/// Mounted for every method so that non-POST requests get the plain 405
/// body. The raw body is only read after the method and key checks, so
/// neither check depends on its size. The upstream JSON is passed through
/// unmodified on success.
pub async fn analyze_look(State(state): State<AppState>, method: Method, body: Body) -> Response {
    match handle(&state, &method, body).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(err) => {
            if matches!(
                err,
                LookError::BodyRead(_) | LookError::InvalidBody(_) | LookError::Provider(_)
            ) {
                tracing::error!(error = %err, "analyze-look failed");
            }
            err.into_response()
        }
    }
}

async fn handle(
    state: &AppState,
    method: &Method,
    body: Body,
) -> Result<serde_json::Value, LookError> {
    if *method != Method::POST {
        return Err(LookError::MethodNotAllowed);
    }

    let Some(api_key) = state.api_key.as_deref() else {
        tracing::error!("GEMINI_API_KEY is missing");
        return Err(LookError::MissingApiKey);
    };

    let body = to_bytes(body, state.max_body_bytes)
        .await
        .map_err(LookError::BodyRead)?;
    let request: LookRequest = serde_json::from_slice(&body)?;

    tracing::info!(
        with_photo = request.image().is_some(),
        style_vibe = %request.style_vibe,
        "Requesting look suggestions"
    );

    let parts = prompt::build_parts(&request);
    let data = state.provider.generate_content(api_key, parts).await?;

    Ok(data)
}
