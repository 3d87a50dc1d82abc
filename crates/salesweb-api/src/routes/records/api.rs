//! Records API endpoints - JSON API and HTMX partials
//!
//! Endpoints:
//! - htmx_record_create / htmx_record_update: Submit the record form
//! - htmx_record_changed: Update button state while editing
//! - htmx_record_revenue: Revenue preview while typing
//! - api_records, api_record_detail, api_record_create, api_record_update: JSON API

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use salesweb_core::{form_changed, CoreError, RecordForm};
use salesweb_utils::parse_form_body;

use super::page::{render_record_form, render_revenue, render_submit_button, FormMode};
use crate::{alert_fragment, ApiError, AppState};

// ==================== HTMX Endpoints ====================

/// HTMX: Create a record from the form
pub async fn htmx_record_create(
    state: State<AppState>,
    body: String,
) -> Response {
    let form = RecordForm::from_params(&parse_form_body(&body));

    match form.validate(&state.config.records.pumps) {
        Ok(draft) => {
            state.store.write().await.create(draft);
            redirect_to_list("created")
        }
        Err(errors) => {
            log::debug!("Record form rejected: {}", errors);
            Html(render_record_form(FormMode::Create, &form, &errors, &state.config, true)).into_response()
        }
    }
}

/// HTMX: Update a record from the form
pub async fn htmx_record_update(
    state: State<AppState>,
    Path(id): Path<u64>,
    body: String,
) -> Response {
    let form = RecordForm::from_params(&parse_form_body(&body));
    let pumps = &state.config.records.pumps;
    let mut store = state.store.write().await;

    let snapshot = match store.get(id) {
        Some(record) => record.draft(),
        None => {
            let error = CoreError::RecordNotFound { id };
            log::warn!("Update rejected: {}", error);
            return Html(alert_fragment(&error.to_string())).into_response();
        }
    };

    let draft = match form.validate(pumps) {
        Ok(draft) => draft,
        Err(errors) => {
            log::debug!("Record form rejected: {}", errors);
            let enabled = form_changed(&snapshot, &form, pumps);
            return Html(render_record_form(FormMode::Edit(id), &form, &errors, &state.config, enabled))
                .into_response();
        }
    };

    match store.update(id, draft) {
        Ok(_) => redirect_to_list("updated"),
        Err(e) => Html(alert_fragment(&e.to_string())).into_response(),
    }
}

/// HTMX: Update button, enabled only when the form differs from the stored record
pub async fn htmx_record_changed(
    state: State<AppState>,
    Path(id): Path<u64>,
    body: String,
) -> Html<String> {
    let form = RecordForm::from_params(&parse_form_body(&body));
    let store = state.store.read().await;
    let changed = match store.get(id) {
        Some(record) => form_changed(&record.draft(), &form, &state.config.records.pumps),
        None => false,
    };
    Html(render_submit_button(FormMode::Edit(id), changed))
}

/// HTMX: Revenue preview, quantity × unit price
pub async fn htmx_record_revenue(
    state: State<AppState>,
    body: String,
) -> Html<String> {
    let form = RecordForm::from_params(&parse_form_body(&body));
    Html(render_revenue(form.revenue_preview(), &state.config.currency))
}

fn redirect_to_list(toast: &str) -> Response {
    let location = format!("/records?toast={}", toast);
    ([("HX-Redirect", location)], Html(String::new())).into_response()
}

// ==================== JSON API ====================

/// List all records (JSON API)
pub async fn api_records(state: State<AppState>) -> Json<serde_json::Value> {
    let store = state.store.read().await;
    Json(serde_json::json!({
        "success": true,
        "data": {
            "records": store.list(),
            "total_revenue": store.total_revenue(),
        }
    }))
}

/// Get a record by id (JSON API)
pub async fn api_record_detail(
    state: State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let store = state.store.read().await;
    let record = store.get(id).ok_or(CoreError::RecordNotFound { id })?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": record,
    })))
}

/// Create a record (JSON API)
pub async fn api_record_create(
    state: State<AppState>,
    Json(form): Json<RecordForm>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let draft = form
        .validate(&state.config.records.pumps)
        .map_err(CoreError::from)?;
    let record = state.store.write().await.create(draft);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": record,
        })),
    ))
}

/// Update a record (JSON API)
pub async fn api_record_update(
    state: State<AppState>,
    Path(id): Path<u64>,
    Json(form): Json<RecordForm>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut store = state.store.write().await;
    if store.get(id).is_none() {
        return Err(CoreError::RecordNotFound { id }.into());
    }
    let draft = form
        .validate(&state.config.records.pumps)
        .map_err(CoreError::from)?;
    let record = store.update(id, draft)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": record,
    })))
}
