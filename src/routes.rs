use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use crate::error::ApiError;
use crate::identity;
use crate::state::AppState;
use crate::translate::{build_prompt, default_languages, Language, TranslationRequest};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/languages", get(get_languages))
        .route("/api/session", post(create_session))
        .route(
            "/api/translate",
            post(translate).fallback(method_not_allowed),
        )
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_languages() -> Json<Vec<Language>> {
    Json(default_languages())
}

async fn create_session(State(state): State<AppState>) -> Json<Value> {
    let user_id = identity::obtain_user_id(state.identity.as_ref()).await;
    Json(json!({ "userId": user_id }))
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// The proxy. Credential guard first, then field validation; no upstream
/// call is made on any validation failure. On upstream success the Gemini
/// body is passed through to the caller unmodified.
async fn translate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    if state.config.gemini.api_key.is_empty() {
        error!("Gemini API key is not configured");
        return Err(ApiError::configuration("API key not configured."));
    }

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::bad_request("Request body must be valid JSON."))?;
    let request = TranslationRequest::from_value(&payload)?;
    let (source_name, target_name) = request.resolved_names()?;

    let prompt = build_prompt(&request.input_text, source_name, target_name);
    let result = state.gemini.generate_content(&prompt).await?;

    Ok(Json(result))
}
