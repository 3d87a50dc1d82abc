//! Report page rendering - Full page and the report panel

use salesweb_config::Config;
use salesweb_core::{format_money, FilterResult, IngestSession};
use salesweb_utils::escape_html;

use crate::AppState;

pub async fn page_report(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let session = state.session.read().await;
    let sheet = &state.config.sheet;

    let inner_content = format!(
        r#"<div class='mb-6'>
            <h2 class='text-2xl font-bold'>Báo cáo doanh số</h2>
            <p class='text-sm text-gray-500 mt-1'>Tải lên file Excel chứa dữ liệu các trường: {}, {}, {} để xem báo cáo</p>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <form hx-post='/report/upload' hx-encoding='multipart/form-data' hx-trigger='change' hx-target='#report-panel' hx-swap='innerHTML' hx-indicator='#upload-indicator'>
                <label class='block text-sm font-medium text-gray-700 mb-2'>Chọn file Excel (.xlsx)</label>
                <input type='file' name='file' accept='.xlsx' class='block w-full text-sm text-gray-600 file:mr-4 file:py-2 file:px-4 file:rounded-lg file:border-0 file:bg-indigo-50 file:text-indigo-600'>
                <span id='upload-indicator' class='htmx-indicator text-sm text-gray-500'>Đang đọc file...</span>
            </form>
        </div>
        <div id='report-panel'>{}</div>"#,
        escape_html(&sheet.date_label),
        escape_html(&sheet.time_label),
        escape_html(&sheet.amount_label),
        render_report_panel(session.as_ref(), &state.config)
    );

    axum::response::Html(crate::page_response(&headers, "Báo cáo doanh số", "/report", &inner_content))
}

/// Upload summary, filter form and the last result
pub fn render_report_panel(session: Option<&IngestSession>, config: &Config) -> String {
    let session = match session {
        Some(session) => session,
        None => {
            return "<div class='text-center text-gray-500 py-12'>Chưa có file nào được tải lên</div>".to_string();
        }
    };

    let dropped_note = if session.dropped_rows > 0 {
        format!(" · bỏ qua {} dòng không hợp lệ", session.dropped_rows)
    } else {
        String::new()
    };

    let file_info = format!(
        r#"<div class='flex items-center justify-between bg-indigo-50 border border-indigo-100 rounded-lg px-4 py-3 mb-4'>
            <span class='font-medium text-indigo-700'>{}</span>
            <span class='text-sm text-indigo-600'>Tiêu đề ở dòng {} · {} giao dịch{}</span>
        </div>"#,
        escape_html(&session.file_name),
        session.header_row,
        session.transactions.len(),
        dropped_note
    );

    if session.unique_dates.is_empty() {
        return format!(
            "{}<div class='text-center text-gray-500 py-8'>Không có giao dịch nào để hiển thị.</div>",
            file_info
        );
    }

    let result_html = match &session.result {
        Some(result) => render_result(result, config),
        None => String::new(),
    };

    format!(
        r#"{}
        <div class='flex flex-wrap gap-6'>
            <div class='w-full lg:w-[460px]'>{}</div>
            <div class='flex-1 min-w-[400px]'>{}</div>
        </div>"#,
        file_info,
        render_filter_form(session),
        result_html
    )
}

fn render_filter_form(session: &IngestSession) -> String {
    let last = session.last_filter.clone().unwrap_or_default();
    let dates_heading = format!(
        "<h3 class='mb-4 text-lg font-semibold text-gray-600'>Trong file là doanh số trong ngày: {}</h3>",
        escape_html(&session.unique_dates.join(", "))
    );

    let date_field = if session.unique_dates.len() == 1 {
        String::new()
    } else {
        let options: String = session
            .unique_dates
            .iter()
            .map(|date| {
                format!(
                    "<option value='{}' {}>{}</option>",
                    escape_html(date),
                    if *date == last.date { "selected" } else { "" },
                    escape_html(date)
                )
            })
            .collect();
        format!(
            r#"<div class='flex items-center gap-2'>
                <label for='date-select' class='block text-lg font-semibold'>Chọn ngày:</label>
                <select id='date-select' name='date' class='w-1/2 px-3 py-2 border rounded-lg text-gray-600'>
                    <option value=''>Chọn ngày</option>{}
                </select>
            </div>"#,
            options
        )
    };

    format!(
        r#"<form hx-post='/report/filter' hx-target='#report-panel' hx-swap='innerHTML' class='space-y-4 bg-white rounded-xl shadow-sm p-6'>
            {}
            {}
            <div>
                <label class='font-semibold text-lg'>Giờ bắt đầu:</label>
                <input type='time' name='start_time' value='{}' class='bg-white border border-black rounded p-2 ml-4 mt-1'
                    onchange="this.form.elements['end_time'].min = this.value">
            </div>
            <div>
                <label class='font-semibold text-lg'>Giờ kết thúc</label>
                <input type='time' name='end_time' value='{}' min='{}' class='bg-white border border-black rounded p-2 ml-4 mt-1'>
            </div>
            <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 font-semibold uppercase'>Truy vấn</button>
        </form>"#,
        dates_heading,
        date_field,
        escape_html(&last.start_time),
        escape_html(&last.end_time),
        escape_html(&last.start_time)
    )
}

fn render_result(result: &FilterResult, config: &Config) -> String {
    let currency = &config.currency;
    let total_heading = format!(
        "<h3 class='text-xl font-semibold text-gray-700 mb-4'>Tổng Thành Tiền: {}</h3>",
        format_money(result.total, currency)
    );

    if result.is_empty() {
        return format!(
            "{}<div class='mt-4 text-center text-gray-500'>Không có giao dịch nào để hiển thị.</div>",
            total_heading
        );
    }

    let rows: String = result
        .transactions
        .iter()
        .enumerate()
        .map(|(i, tx)| {
            format!(
                "<tr class='hover:bg-gray-100 border-t'><td class='px-4 py-2'>{}</td><td class='px-4 py-2'>{}</td><td class='px-4 py-2'>{}</td><td class='px-4 py-2'>{}</td></tr>",
                i + 1,
                escape_html(&tx.date),
                escape_html(&tx.time),
                format_money(tx.amount, currency)
            )
        })
        .collect();

    let sheet = &config.sheet;
    format!(
        r#"{}
        <div class='max-h-[600px] overflow-y-auto border border-gray-300 rounded-lg bg-white'>
            <table class='min-w-full text-sm'>
                <thead class='bg-gray-50 text-left'>
                    <tr><th class='px-4 py-2'>STT</th><th class='px-4 py-2'>{}</th><th class='px-4 py-2'>{}</th><th class='px-4 py-2'>{}</th></tr>
                </thead>
                <tbody>{}</tbody>
                <tfoot>
                    <tr class='border-t font-semibold'><td class='px-4 py-2 text-right' colspan='3'>Tổng:</td><td class='px-4 py-2'>{}</td></tr>
                </tfoot>
            </table>
        </div>"#,
        total_heading,
        escape_html(&sheet.date_label),
        escape_html(&sheet.time_label),
        escape_html(&sheet.amount_label),
        rows,
        format_money(result.total, currency)
    )
}
