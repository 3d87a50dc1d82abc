//! Settings page rendering - Full page endpoints

use salesweb_utils::escape_html;

use crate::AppState;

pub async fn page_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let config = &state.config;

    let pumps: Vec<String> = config.records.pumps.iter().map(|p| salesweb_core::pump_label(p)).collect();

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Cài đặt</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Máy chủ</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Địa chỉ</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Cổng</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Tải lên và file Excel</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Định dạng cho phép</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Dung lượng tối đa</p><p class='font-medium'>{} MB</p></div>
                <div><p class='text-sm text-gray-500'>Cột ngày</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Cột giờ</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Cột thành tiền</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Giao dịch</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Trụ bơm</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Giao dịch mẫu</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>Tiền tệ</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Đơn vị</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Ví dụ</p><p class='font-medium'>{}</p></div>
            </div>
        </div>"#,
        escape_html(&config.server.host),
        config.server.port,
        escape_html(&config.upload.allowed_extensions.join(", ")),
        config.upload.max_size_mb,
        escape_html(&config.sheet.date_label),
        escape_html(&config.sheet.time_label),
        escape_html(&config.sheet.amount_label),
        escape_html(&pumps.join(", ")),
        if config.records.seed_sample { "Bật" } else { "Tắt" },
        escape_html(&config.currency.code),
        escape_html(&salesweb_core::format_money(1234567.5, &config.currency))
    );

    axum::response::Html(crate::page_response(&headers, "Cài đặt", "/settings", &inner_content))
}
