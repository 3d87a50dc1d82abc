//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::report: Spreadsheet upload, time-window filter, totals
//! - routes::records: Pump transaction list, create and update forms
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use salesweb_config::Config;
use salesweb_core::{IngestSession, TransactionStore};
use salesweb_sheet::{DecoderRef, DefaultSheetDecoder};
use salesweb_utils::escape_html;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Rows of the last successfully uploaded workbook
    pub session: Arc<RwLock<Option<IngestSession>>>,
    pub store: Arc<RwLock<TransactionStore>>,
    pub decoder: DecoderRef,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = salesweb_core::new_store(&config.records);
        Self {
            config,
            session: Arc::new(RwLock::new(None)),
            store: Arc::new(RwLock::new(store)),
            decoder: Arc::new(DefaultSheetDecoder),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::records::{
        api_record_create, api_record_detail, api_record_update, api_records, htmx_record_changed,
        htmx_record_create, htmx_record_revenue, htmx_record_update, page_record_form, page_records,
    };
    use routes::report::{api_report, api_report_filter, htmx_report_filter, htmx_report_upload, page_report};
    use routes::settings::{api_settings, page_settings};

    let body_limit = state.config.upload.max_size_bytes();

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/report", get(api_report))
        .route("/api/report/filter", post(api_report_filter))
        .route("/api/records", get(api_records).post(api_record_create))
        .route("/api/records/:id", get(api_record_detail).put(api_record_update))
        .route("/api/settings", get(api_settings))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/report", get(page_report))
        .route("/records", get(page_records).post(htmx_record_create))
        .route("/records/form", get(page_record_form))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/report/upload", post(htmx_report_upload))
        .route("/report/filter", post(htmx_report_filter))
        .route("/records/revenue", post(htmx_record_revenue))
        .route("/records/:id", post(htmx_record_update))
        .route("/records/:id/changed", post(htmx_record_changed))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="vi">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Salesweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/", "Trang chủ", "home"),
        ("/report", "Báo cáo doanh số", "report"),
        ("/records", "Giao dịch bán xăng", "records"),
        ("/settings", "Cài đặt", "settings"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Salesweb</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, id) in &links {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        let icon = match *id {
            "home" => "🏠",
            "report" => "📊",
            "records" => "⛽",
            "settings" => "⚙️",
            _ => "📄",
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#, inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Blocking error box; the script raises the same message as a browser alert
pub fn alert_fragment(message: &str) -> String {
    let escaped = escape_html(message);
    let js_message = serde_json::to_string(message).unwrap_or_default().replace('<', "\\u003c");
    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-lg p-4 mb-4' role='alert'><div class='flex items-center gap-2'><span class='text-red-600'>✗</span><span class='font-medium text-red-800'>{}</span></div></div><script>alert({});</script>"#,
        escaped, js_message
    )
}

/// Success notice shown at the top of a page
pub fn toast_fragment(message: &str) -> String {
    format!(
        r#"<div class='bg-green-50 border border-green-200 rounded-lg p-4 mb-4'><div class='flex items-center gap-2'><span class='text-green-600'>✓</span><span class='font-medium text-green-800'>{}</span></div></div>"#,
        escape_html(message)
    )
}

/// Index page with links to both tools
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let upload_line = match state.session.read().await.as_ref() {
        Some(session) => format!(
            "{} · {} giao dịch",
            escape_html(&session.file_name),
            session.transactions.len()
        ),
        None => "Chưa có file nào được tải lên".to_string(),
    };

    let (record_count, total_revenue) = {
        let store = state.store.read().await;
        (store.len(), store.total_revenue())
    };

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Trang chủ</h2></div>
        <div class='grid grid-cols-1 md:grid-cols-2 gap-6'>
            <a href='/report' class='block bg-white rounded-xl shadow-sm p-6 hover:shadow-md'>
                <h3 class='text-lg font-semibold mb-2'>Báo cáo doanh số</h3>
                <p class='text-sm text-gray-500 mb-4'>Tải lên file Excel chứa dữ liệu các trường: {}, {}, {} để xem báo cáo</p>
                <p class='font-medium text-indigo-600'>{}</p>
            </a>
            <a href='/records' class='block bg-white rounded-xl shadow-sm p-6 hover:shadow-md'>
                <h3 class='text-lg font-semibold mb-2'>Giao dịch bán xăng</h3>
                <p class='text-sm text-gray-500 mb-4'>{} giao dịch</p>
                <p class='font-medium text-indigo-600'>Tổng doanh thu: {}</p>
            </a>
        </div>"#,
        escape_html(&state.config.sheet.date_label),
        escape_html(&state.config.sheet.time_label),
        escape_html(&state.config.sheet.amount_label),
        upload_line,
        record_count,
        salesweb_core::format_money(total_revenue.round(), &state.config.currency)
    );

    axum::response::Html(page_response(&headers, "Trang chủ", "/", &inner_content))
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process stops.
pub async fn start_server(config: Config) -> std::io::Result<()> {
    let addr = config.bind_addr();
    let state = AppState::new(config);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Salesweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /report (Sales report upload and filter)");
    log::info!("  - /records (Pump transaction records)");
    log::info!("  - /settings (Configuration)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}
