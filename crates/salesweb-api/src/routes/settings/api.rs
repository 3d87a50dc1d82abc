//! Settings API endpoints - JSON API

use axum::Json;

use crate::AppState;

/// Effective configuration (JSON API)
pub async fn api_settings(state: axum::extract::State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "data": &state.config,
    }))
}
