//! Records routes - Pump transaction list and record form
//!
//! Structure:
//! - api.rs: Form submission, live form partials and JSON API
//! - page.rs: List page and form rendering

pub mod api;
pub mod page;

pub use api::{
    api_record_create, api_record_detail, api_record_update, api_records, htmx_record_changed,
    htmx_record_create, htmx_record_revenue, htmx_record_update,
};
pub use page::{page_record_form, page_records};
