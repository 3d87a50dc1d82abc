//! Report API endpoints - JSON API and HTMX partials
//!
//! Endpoints:
//! - htmx_report_upload: Upload a workbook and replace the session
//! - htmx_report_filter: Run the time-window filter on the session
//! - api_report: Current upload summary (JSON)
//! - api_report_filter: Run the filter (JSON)

use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::Json;

use salesweb_core::{
    ingest, CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger, FilterInput,
};
use salesweb_utils::parse_form_body;

use super::page::render_report_panel;
use crate::{alert_fragment, ApiError, AppState};

/// HTMX: Upload a workbook
///
/// A failed upload shows an alert above the unchanged panel.
pub async fn htmx_report_upload(
    state: State<AppState>,
    mut multipart: Multipart,
) -> Html<String> {
    let upload = match read_upload(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return with_current_panel(&state, "Vui lòng chọn file Excel để tải lên").await,
        Err(e) => {
            log::warn!("Upload rejected: {}", e);
            return with_current_panel(&state, &e.to_string()).await;
        }
    };
    let (file_name, bytes) = upload;
    log::debug!("Received upload {} ({} bytes)", file_name, bytes.len());

    let config = &state.config;
    match ingest(state.decoder.as_ref(), &config.upload, &config.sheet, &file_name, bytes).await {
        Ok(session) => {
            let mut guard = state.session.write().await;
            *guard = Some(session);
            Html(render_report_panel(guard.as_ref(), config))
        }
        Err(e) => {
            let context = ErrorContext::new("upload")
                .with_data("file_name", serde_json::json!(file_name));
            DefaultErrorLogger.log_error(&e, &context);
            with_current_panel(&state, &e.to_string()).await
        }
    }
}

/// HTMX: Filter the uploaded rows by date and time window
pub async fn htmx_report_filter(
    state: State<AppState>,
    body: String,
) -> Html<String> {
    let input = filter_input(&body);
    let mut guard = state.session.write().await;

    let outcome = match guard.as_mut() {
        Some(session) => session.run_filter(&input).map(|_| ()),
        None => Err(CoreError::NotLoaded),
    };

    match outcome {
        Ok(()) => Html(render_report_panel(guard.as_ref(), &state.config)),
        Err(e) => {
            let context = ErrorContext::new("filter")
                .with_data("date", serde_json::json!(input.date))
                .with_data("start_time", serde_json::json!(input.start_time))
                .with_data("end_time", serde_json::json!(input.end_time));
            DefaultErrorLogger.log_error(&e, &context);
            Html(format!(
                "{}{}",
                alert_fragment(&e.to_string()),
                render_report_panel(guard.as_ref(), &state.config)
            ))
        }
    }
}

/// Current upload summary (JSON API)
pub async fn api_report(state: State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let guard = state.session.read().await;
    let session = guard.as_ref().ok_or(CoreError::NotLoaded)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": session.summary(),
    })))
}

/// Run the filter on the current upload (JSON API)
pub async fn api_report_filter(
    state: State<AppState>,
    Json(input): Json<FilterInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut guard = state.session.write().await;
    let session = guard.as_mut().ok_or(CoreError::NotLoaded)?;
    let result = session.run_filter(&input)?.clone();
    Ok(Json(serde_json::json!({
        "success": true,
        "data": result,
    })))
}

/// Read the `file` field of the upload form
async fn read_upload(multipart: &mut Multipart) -> Result<Option<(String, Vec<u8>)>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if file_name.is_empty() {
            return Ok(None);
        }
        return Ok(Some((file_name, bytes.to_vec())));
    }
    Ok(None)
}

async fn with_current_panel(state: &AppState, message: &str) -> Html<String> {
    let guard = state.session.read().await;
    Html(format!(
        "{}{}",
        alert_fragment(message),
        render_report_panel(guard.as_ref(), &state.config)
    ))
}

fn filter_input(body: &str) -> FilterInput {
    let params = parse_form_body(body);
    let field = |name: &str| params.get(name).cloned().unwrap_or_default();
    FilterInput {
        date: field("date"),
        start_time: field("start_time"),
        end_time: field("end_time"),
    }
}
