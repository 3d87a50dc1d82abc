//! Record form parsing and validation

use std::collections::HashMap;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;
use crate::models::{compute_revenue, is_changed, RecordDraft};

/// Unsigned decimal with `.` or `,` as separator, as accepted by the quantity input
pub static DECIMAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*[.,]?[0-9]+$").expect("valid regex"));

/// Value formats of an HTML `datetime-local` input, with and without seconds
const DATETIME_INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

pub const FIELD_DATETIME: &str = "datetime";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_PUMP: &str = "pump";
pub const FIELD_UNIT_PRICE: &str = "unit_price";
pub const FIELD_REVENUE: &str = "revenue";

/// Raw record form values as submitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordForm {
    pub datetime: String,
    pub quantity: String,
    pub pump: String,
    pub unit_price: String,
}

impl RecordForm {
    /// Read the form from decoded `x-www-form-urlencoded` parameters
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let field = |name: &str| params.get(name).cloned().unwrap_or_default();
        Self {
            datetime: field(FIELD_DATETIME),
            quantity: field(FIELD_QUANTITY),
            pump: field(FIELD_PUMP),
            unit_price: field(FIELD_UNIT_PRICE),
        }
    }

    /// Revenue shown next to the inputs while typing; 0 until both numbers parse
    pub fn revenue_preview(&self) -> f64 {
        compute_revenue(parse_decimal(&self.quantity), parse_decimal(&self.unit_price))
    }

    /// Check every field and build the draft, or report one message per failing field
    pub fn validate(&self, pumps: &[String]) -> Result<RecordDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let datetime = if self.datetime.trim().is_empty() {
            errors.add(FIELD_DATETIME, "Vui lòng chọn thời gian");
            None
        } else {
            let parsed = parse_datetime_input(&self.datetime);
            if parsed.is_none() {
                errors.add(FIELD_DATETIME, "Thời gian không hợp lệ!");
            }
            parsed
        };

        let quantity = positive_number(
            &self.quantity,
            FIELD_QUANTITY,
            "Vui lòng nhập số lượng",
            "Số lượng phải là một số dương",
            &mut errors,
        );

        let pump = self.pump.trim();
        if pump.is_empty() || !pumps.iter().any(|p| p == pump) {
            errors.add(FIELD_PUMP, "Vui lòng chọn trụ bơm");
        }

        let unit_price = positive_number(
            &self.unit_price,
            FIELD_UNIT_PRICE,
            "Vui lòng nhập đơn giá",
            "Đơn giá phải là một số dương",
            &mut errors,
        );

        let revenue = compute_revenue(quantity, unit_price);
        if revenue <= 0.0 {
            errors.add(FIELD_REVENUE, "Doanh thu phải là một số dương");
        }

        match (datetime, quantity, unit_price) {
            (Some(datetime), Some(quantity), Some(unit_price)) if errors.is_empty() => Ok(RecordDraft {
                datetime,
                quantity,
                pump: pump.to_string(),
                revenue,
                unit_price,
            }),
            _ => Err(errors),
        }
    }
}

/// Whether the submitted form differs from the record being edited
///
/// A form that does not validate cannot equal a stored record, so it counts as changed.
pub fn form_changed(snapshot: &RecordDraft, form: &RecordForm, pumps: &[String]) -> bool {
    match form.validate(pumps) {
        Ok(current) => is_changed(snapshot, &current),
        Err(_) => true,
    }
}

/// Parse a `datetime-local` value, e.g. `2024-10-07T17:25` or `2024-10-07T17:25:02`
pub fn parse_datetime_input(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Parse an unsigned decimal written with `.` or `,`
pub fn parse_decimal(value: &str) -> Option<f64> {
    let value = value.trim();
    if !DECIMAL_PATTERN.is_match(value) {
        return None;
    }
    value.replace(',', ".").parse().ok()
}

fn positive_number(
    value: &str,
    field: &str,
    required: &str,
    not_positive: &str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    if value.trim().is_empty() {
        errors.add(field, required);
        return None;
    }
    match parse_decimal(value) {
        Some(n) if n > 0.0 => Some(n),
        _ => {
            errors.add(field, not_positive);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pumps() -> Vec<String> {
        (1..=5).map(|n| n.to_string()).collect()
    }

    fn valid_form() -> RecordForm {
        RecordForm {
            datetime: "2024-10-08T09:15".to_string(),
            quantity: "10".to_string(),
            pump: "3".to_string(),
            unit_price: "20000".to_string(),
        }
    }

    #[test]
    fn test_valid_form_builds_draft() {
        let draft = valid_form().validate(&pumps()).unwrap();
        assert_eq!(draft.revenue, 200000.0);
        assert_eq!(draft.pump, "3");
        assert_eq!(draft.datetime.to_string(), "2024-10-08 09:15:00");
    }

    #[test]
    fn test_comma_decimal_quantity() {
        let form = RecordForm {
            quantity: "3,03".to_string(),
            unit_price: "19800".to_string(),
            ..valid_form()
        };
        let draft = form.validate(&pumps()).unwrap();
        assert_eq!(draft.quantity, 3.03);
        assert!((draft.revenue - 59994.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = RecordForm::default().validate(&pumps()).unwrap_err();
        assert_eq!(errors.get(FIELD_DATETIME), Some("Vui lòng chọn thời gian"));
        assert_eq!(errors.get(FIELD_QUANTITY), Some("Vui lòng nhập số lượng"));
        assert_eq!(errors.get(FIELD_PUMP), Some("Vui lòng chọn trụ bơm"));
        assert_eq!(errors.get(FIELD_UNIT_PRICE), Some("Vui lòng nhập đơn giá"));
        assert_eq!(errors.get(FIELD_REVENUE), Some("Doanh thu phải là một số dương"));
    }

    #[test]
    fn test_non_positive_numbers() {
        let form = RecordForm {
            quantity: "0".to_string(),
            unit_price: "-5".to_string(),
            ..valid_form()
        };
        let errors = form.validate(&pumps()).unwrap_err();
        assert_eq!(errors.get(FIELD_QUANTITY), Some("Số lượng phải là một số dương"));
        assert_eq!(errors.get(FIELD_UNIT_PRICE), Some("Đơn giá phải là một số dương"));
    }

    #[test]
    fn test_unknown_pump_rejected() {
        let form = RecordForm {
            pump: "9".to_string(),
            ..valid_form()
        };
        let errors = form.validate(&pumps()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(FIELD_PUMP).is_some());
    }

    #[test]
    fn test_bad_datetime_rejected() {
        let form = RecordForm {
            datetime: "08/10/2024 09:15".to_string(),
            ..valid_form()
        };
        let errors = form.validate(&pumps()).unwrap_err();
        assert_eq!(errors.get(FIELD_DATETIME), Some("Thời gian không hợp lệ!"));
    }

    #[test]
    fn test_parse_datetime_input_with_seconds() {
        let parsed = parse_datetime_input("2024-10-07T17:25:02").unwrap();
        assert_eq!(parsed.to_string(), "2024-10-07 17:25:02");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("3.5"), Some(3.5));
        assert_eq!(parse_decimal("3,5"), Some(3.5));
        assert_eq!(parse_decimal(".5"), Some(0.5));
        assert_eq!(parse_decimal(" 12 "), Some(12.0));
        assert_eq!(parse_decimal("1.000,5"), None);
        assert_eq!(parse_decimal("5."), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("-1"), None);
    }

    #[test]
    fn test_revenue_preview() {
        assert_eq!(valid_form().revenue_preview(), 200000.0);
        let form = RecordForm {
            quantity: "x".to_string(),
            ..valid_form()
        };
        assert_eq!(form.revenue_preview(), 0.0);
    }

    #[test]
    fn test_form_changed() {
        let snapshot = valid_form().validate(&pumps()).unwrap();
        assert!(!form_changed(&snapshot, &valid_form(), &pumps()));

        let form = RecordForm {
            datetime: "2024-10-08T09:15:00".to_string(),
            ..valid_form()
        };
        assert!(!form_changed(&snapshot, &form, &pumps()));

        let form = RecordForm {
            pump: "4".to_string(),
            ..valid_form()
        };
        assert!(form_changed(&snapshot, &form, &pumps()));

        let form = RecordForm {
            quantity: String::new(),
            ..valid_form()
        };
        assert!(form_changed(&snapshot, &form, &pumps()));
    }

    #[test]
    fn test_from_params() {
        let params: HashMap<String, String> = [
            ("datetime", "2024-10-08T09:15"),
            ("quantity", "10"),
            ("pump", "3"),
            ("unit_price", "20000"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(RecordForm::from_params(&params), valid_form());
    }
}
