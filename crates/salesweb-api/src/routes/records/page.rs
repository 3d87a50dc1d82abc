//! Records page rendering - Transaction list and the create/update form

use std::collections::HashMap;

use axum::extract::Query;
use salesweb_config::{Config, CurrencyConfig};
use salesweb_core::form::{FIELD_DATETIME, FIELD_PUMP, FIELD_QUANTITY, FIELD_REVENUE, FIELD_UNIT_PRICE};
use salesweb_core::models::INPUT_DATETIME_FORMAT;
use salesweb_core::{
    format_amount, format_money, pump_label, CoreError, FieldErrors, RecordForm, TransactionRecord,
};
use salesweb_utils::{escape_html, format_number};

use crate::{alert_fragment, toast_fragment, AppState};

/// Which record the form submits to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u64),
}

impl FormMode {
    fn action(&self) -> String {
        match self {
            FormMode::Create => "/records".to_string(),
            FormMode::Edit(id) => format!("/records/{}", id),
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Thêm giao dịch",
            FormMode::Edit(_) => "Cập nhật giao dịch",
        }
    }
}

pub async fn page_records(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    query: Query<HashMap<String, String>>,
) -> axum::response::Html<String> {
    let store = state.store.read().await;
    let currency = &state.config.currency;

    let toast = match query.get("toast").map(String::as_str) {
        Some("created") => toast_fragment("Giao dịch đã được thêm thành công."),
        Some("updated") => toast_fragment("Giao dịch đã được cập nhật thành công."),
        _ => String::new(),
    };

    let rows: String = store
        .list()
        .iter()
        .enumerate()
        .map(|(i, record)| render_record_row(i + 1, record, currency))
        .collect();

    let body = if store.is_empty() {
        "<tr><td colspan='7' class='px-4 py-8 text-center text-gray-500'>Chưa có giao dịch nào.</td></tr>".to_string()
    } else {
        rows
    };

    let inner_content = format!(
        r#"{}
        <div class='flex items-center justify-between mb-6'>
            <h2 class='text-2xl font-bold'>Giao dịch bán xăng</h2>
            <a href='/records/form?mode=create' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>+ Thêm giao dịch</a>
        </div>
        <div class='bg-white rounded-xl shadow-sm overflow-hidden'>
            <table class='min-w-full text-sm'>
                <thead class='bg-gray-50 text-left'>
                    <tr>
                        <th class='px-4 py-2'>STT</th>
                        <th class='px-4 py-2'>Thời gian</th>
                        <th class='px-4 py-2'>Số lượng (Lít)</th>
                        <th class='px-4 py-2'>Trụ</th>
                        <th class='px-4 py-2'>Doanh thu (VNĐ)</th>
                        <th class='px-4 py-2'>Đơn giá (VNĐ)</th>
                        <th class='px-4 py-2'></th>
                    </tr>
                </thead>
                <tbody>{}</tbody>
                <tfoot>
                    <tr class='border-t font-semibold'>
                        <td class='px-4 py-2 text-right' colspan='4'>Tổng doanh thu (VNĐ)</td>
                        <td class='px-4 py-2'>{}</td>
                        <td colspan='2'></td>
                    </tr>
                </tfoot>
            </table>
        </div>"#,
        toast,
        body,
        format_amount(store.total_revenue().round(), currency)
    );

    axum::response::Html(crate::page_response(&headers, "Giao dịch bán xăng", "/records", &inner_content))
}

fn render_record_row(index: usize, record: &TransactionRecord, currency: &CurrencyConfig) -> String {
    format!(
        r#"<tr class='border-t hover:bg-gray-50'>
            <td class='px-4 py-2'>{}</td>
            <td class='px-4 py-2'>{}</td>
            <td class='px-4 py-2'>{}</td>
            <td class='px-4 py-2'>{}</td>
            <td class='px-4 py-2'>{}</td>
            <td class='px-4 py-2'>{}</td>
            <td class='px-4 py-2'><a href='/records/form?mode=edit&amp;id={}' class='text-indigo-600 hover:underline'>Sửa</a></td>
        </tr>"#,
        index,
        record.datetime_display(),
        format_quantity(record.quantity, currency),
        escape_html(&record.pump_label()),
        format_amount(record.revenue.round(), currency),
        format_amount(record.unit_price, currency),
        record.id
    )
}

/// Record form page; `mode=create` or `mode=edit&id=N`
pub async fn page_record_form(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    query: Query<HashMap<String, String>>,
) -> axum::response::Html<String> {
    let mode = match query.get("mode").map(String::as_str) {
        Some("edit") => query.get("id").and_then(|id| id.parse::<u64>().ok()).map(FormMode::Edit),
        _ => Some(FormMode::Create),
    };

    let form_html = match mode {
        Some(FormMode::Create) => {
            let form = RecordForm {
                datetime: chrono::Local::now().naive_local().format(INPUT_DATETIME_FORMAT).to_string(),
                ..RecordForm::default()
            };
            render_record_form(FormMode::Create, &form, &FieldErrors::new(), &state.config, true)
        }
        Some(FormMode::Edit(id)) => match state.store.read().await.get(id) {
            Some(record) => {
                let form = form_for(record);
                render_record_form(FormMode::Edit(id), &form, &FieldErrors::new(), &state.config, false)
            }
            None => alert_fragment(&CoreError::RecordNotFound { id }.to_string()),
        },
        None => alert_fragment("Thiếu mã giao dịch cần cập nhật"),
    };

    let title = mode.unwrap_or(FormMode::Create).heading();
    let inner_content = format!(
        r#"<div class='max-w-xl'>
            <div id='record-form-container' class='bg-white rounded-xl shadow-sm p-6'>{}</div>
        </div>"#,
        form_html
    );

    axum::response::Html(crate::page_response(&headers, title, "/records", &inner_content))
}

/// Form values of a stored record
pub fn form_for(record: &TransactionRecord) -> RecordForm {
    RecordForm {
        datetime: record.datetime_input(),
        quantity: record.quantity.to_string(),
        pump: record.pump.clone(),
        unit_price: record.unit_price.to_string(),
    }
}

/// The record form with inline field messages
pub fn render_record_form(
    mode: FormMode,
    form: &RecordForm,
    errors: &FieldErrors,
    config: &Config,
    submit_enabled: bool,
) -> String {
    let pump_options: String = config
        .records
        .pumps
        .iter()
        .map(|pump| {
            format!(
                "<option value='{}' {}>{}</option>",
                escape_html(pump),
                if *pump == form.pump { "selected" } else { "" },
                escape_html(&pump_label(pump))
            )
        })
        .collect();

    let submit_slot = match mode {
        FormMode::Create => render_submit_button(mode, true),
        FormMode::Edit(id) => format!(
            r#"<div id='submit-slot' hx-post='/records/{}/changed' hx-include='#record-form' hx-trigger='input from:#record-form, change from:#record-form'>{}</div>"#,
            id,
            render_submit_button(mode, submit_enabled)
        ),
    };

    format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-xl font-bold'>{}</h2>
            <a href='/records' class='text-gray-500 hover:text-gray-700'>Đóng</a>
        </div>
        <form id='record-form' hx-post='{}' hx-target='#record-form-container' hx-swap='innerHTML' class='space-y-4'>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Thời gian</label>
                <input type='datetime-local' step='1' name='{}' value='{}' class='w-full px-3 py-2 border rounded-lg'>
                {}
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Số lượng (Lít)</label>
                <input type='text' inputmode='decimal' pattern='[0-9]*[.,]?[0-9]+' name='{}' value='{}' class='w-full px-3 py-2 border rounded-lg'>
                {}
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Trụ</label>
                <select name='{}' class='w-full px-3 py-2 border rounded-lg'>
                    <option value=''>Chọn trụ</option>{}
                </select>
                {}
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Đơn giá (VNĐ)</label>
                <input type='number' min='0' step='any' name='{}' value='{}' class='w-full px-3 py-2 border rounded-lg'>
                {}
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Doanh thu (VNĐ)</label>
                <div id='revenue-preview' hx-post='/records/revenue' hx-include='#record-form' hx-trigger='input from:#record-form' class='px-3 py-2 bg-gray-50 border rounded-lg'>{}</div>
                {}
            </div>
            {}
        </form>"#,
        mode.heading(),
        mode.action(),
        FIELD_DATETIME,
        escape_html(&form.datetime),
        field_error(errors, FIELD_DATETIME),
        FIELD_QUANTITY,
        escape_html(&form.quantity),
        field_error(errors, FIELD_QUANTITY),
        FIELD_PUMP,
        pump_options,
        field_error(errors, FIELD_PUMP),
        FIELD_UNIT_PRICE,
        escape_html(&form.unit_price),
        field_error(errors, FIELD_UNIT_PRICE),
        render_revenue(form.revenue_preview(), &config.currency),
        field_error(errors, FIELD_REVENUE),
        submit_slot
    )
}

/// Submit button; disabled while an edit has no changes
pub fn render_submit_button(mode: FormMode, enabled: bool) -> String {
    let label = match mode {
        FormMode::Create => "Thêm",
        FormMode::Edit(_) => "Cập nhật",
    };
    if enabled {
        format!(
            "<button type='submit' form='record-form' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>{}</button>",
            label
        )
    } else {
        format!(
            "<button type='submit' form='record-form' disabled class='w-full px-4 py-2 bg-gray-300 text-gray-500 rounded-lg cursor-not-allowed'>{}</button>",
            label
        )
    }
}

pub fn render_revenue(value: f64, currency: &CurrencyConfig) -> String {
    format_money(value, currency)
}

fn format_quantity(quantity: f64, currency: &CurrencyConfig) -> String {
    format_number(quantity, &currency.thousands_separator, &currency.decimal_separator, 3)
}

fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!("<p class='mt-1 text-sm text-red-600'>{}</p>", escape_html(message)),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use crate::test_support::*;
    use axum::http::StatusCode;

    #[test]
    fn test_form_for_sample_record() {
        let form = form_for(&TransactionRecord::sample());
        assert_eq!(form.datetime, "2024-10-07T17:25:02");
        assert_eq!(form.quantity, "3.03");
        assert_eq!(form.pump, "1");
        assert_eq!(form.unit_price, "19800");
    }

    #[test]
    fn test_render_form_inline_errors() {
        let mut errors = FieldErrors::new();
        errors.add(FIELD_QUANTITY, "Vui lòng nhập số lượng");
        let html = render_record_form(FormMode::Create, &RecordForm::default(), &errors, &Config::default(), true);
        assert!(html.contains("Vui lòng nhập số lượng"));
        assert!(html.contains("hx-post='/records'"));
        assert!(html.contains("<option value='5' >Trụ 5</option>"));
        assert!(!html.contains("submit-slot"));
    }

    #[test]
    fn test_edit_form_starts_disabled() {
        let form = form_for(&TransactionRecord::sample());
        let html = render_record_form(FormMode::Edit(1), &form, &FieldErrors::new(), &Config::default(), false);
        assert!(html.contains("Cập nhật giao dịch"));
        assert!(html.contains("hx-post='/records/1/changed'"));
        assert!(html.contains("disabled"));
        assert!(html.contains("<option value='1' selected>Trụ 1</option>"));
    }

    #[tokio::test]
    async fn test_records_page_lists_sample() {
        let (status, body) = send(create_router(test_state()), get("/records?toast=created")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Giao dịch đã được thêm thành công."));
        assert!(body.contains("07/10/2024 17:25:02"));
        assert!(body.contains("3,03"));
        assert!(body.contains("Trụ 1"));
        assert!(body.contains("60.000"));
        assert!(body.contains("19.800"));
        assert!(body.contains("/records/form?mode=edit&amp;id=1"));
    }

    #[tokio::test]
    async fn test_form_page_modes() {
        let router = create_router(test_state());

        let (_, body) = send(router.clone(), get("/records/form?mode=create")).await;
        assert!(body.contains("Thêm giao dịch"));
        assert!(body.contains(">Thêm</button>"));

        let (_, body) = send(router.clone(), get("/records/form?mode=edit&id=1")).await;
        assert!(body.contains("Cập nhật giao dịch"));
        assert!(body.contains("value='2024-10-07T17:25:02'"));

        let (_, body) = send(router, get("/records/form?mode=edit&id=9")).await;
        assert!(body.contains("Không tìm thấy giao dịch #9"));
    }
}
