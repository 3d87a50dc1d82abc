//! Report routes - Spreadsheet upload and time-window filter
//!
//! Structure:
//! - api.rs: Upload and filter endpoints (HTMX and JSON)
//! - page.rs: Report page and panel rendering

pub mod api;
pub mod page;

pub use api::{api_report, api_report_filter, htmx_report_filter, htmx_report_upload};
pub use page::{page_report, render_report_panel};
