//! Utility functions and helpers

use std::collections::HashMap;

/// Format a number with thousands separators
///
/// Fractional digits are rounded to `max_decimals` and trailing zeros are
/// dropped, so `3000.0` renders as `3.000` and `1234.5` as `1.234,5` with
/// Vietnamese separators.
pub fn format_number(value: f64, thousands_sep: &str, decimal_sep: &str, max_decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.*}", max_decimals, value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i.to_string(), f.trim_end_matches('0').to_string()),
        None => (rounded.clone(), String::new()),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(thousands_sep);
        }
        grouped.push(*c);
    }

    let is_zero = grouped.chars().all(|c| c == '0' || thousands_sep.contains(c)) && frac_part.is_empty();
    let mut result = String::new();
    if value < 0.0 && !is_zero {
        result.push('-');
    }
    result.push_str(&grouped);
    if !frac_part.is_empty() {
        result.push_str(decimal_sep);
        result.push_str(&frac_part);
    }
    result
}

/// Escape text for interpolation into HTML content and attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Decode an `application/x-www-form-urlencoded` body
///
/// Later keys overwrite earlier ones. Pairs without `=` map to an empty value.
pub fn parse_form_body(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode_component(key), decode_component(value));
    }
    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(3000.0, ".", ",", 2), "3.000");
        assert_eq!(format_number(1234567.0, ",", ".", 2), "1,234,567");
        assert_eq!(format_number(999.0, ".", ",", 2), "999");
        assert_eq!(format_number(0.0, ".", ",", 2), "0");
    }

    #[test]
    fn test_format_number_fraction() {
        assert_eq!(format_number(1234.5, ".", ",", 2), "1.234,5");
        assert_eq!(format_number(3.03, ".", ",", 2), "3,03");
        assert_eq!(format_number(59993.999, ".", ",", 0), "59.994");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-1500.0, ".", ",", 2), "-1.500");
        assert_eq!(format_number(-0.001, ".", ",", 2), "0");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Trụ\" & 'x'</b>"),
            "&lt;b&gt;&quot;Trụ&quot; &amp; &#39;x&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_parse_form_body() {
        let params = parse_form_body("date=01%2F01%2F2024&start_time=12%3A00&note=a+b&flag");
        assert_eq!(params.get("date").map(String::as_str), Some("01/01/2024"));
        assert_eq!(params.get("start_time").map(String::as_str), Some("12:00"));
        assert_eq!(params.get("note").map(String::as_str), Some("a b"));
        assert_eq!(params.get("flag").map(String::as_str), Some(""));
    }
}
