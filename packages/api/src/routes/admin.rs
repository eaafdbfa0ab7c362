use axum::{Extension, Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use crate::{
    auth::service::IssuedKey, error::ApiError, middleware::auth::AppIdentity, state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/generate-key", post(generate_key))
}

#[derive(Debug, Deserialize)]
pub struct GenerateKeyInput {
    pub app_name: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateKeyOut {
    pub key_id: String,
    pub api_key: String,
    pub app_name: String,
}

#[tracing::instrument(name = "POST /admin/generate-key", skip(state, identity, input))]
pub async fn generate_key(
    State(state): State<AppState>,
    Extension(identity): Extension<AppIdentity>,
    Json(input): Json<GenerateKeyInput>,
) -> Result<Json<GenerateKeyOut>, ApiError> {
    tracing::info!("API key for {} requested by {}", input.app_name, identity.app_name);

    let IssuedKey {
        key_id,
        api_key,
        app_name,
    } = state.auth.generate_api_key(&input.app_name).await?;

    // The plaintext key appears in this response and nowhere else.
    Ok(Json(GenerateKeyOut {
        key_id,
        api_key,
        app_name,
    }))
}
