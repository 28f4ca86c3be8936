//! Fixed currency code table used for dropdown labels and messages.

use crate::error::AppError;

/// ISO 4217 codes with display names, sorted by code.
pub const CURRENCIES: [(&str, &str); 24] = [
    ("AUD", "Australian Dollar"),
    ("BRL", "Brazilian Real"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CNY", "Chinese Yuan"),
    ("CZK", "Czech Koruna"),
    ("DKK", "Danish Krone"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("HKD", "Hong Kong Dollar"),
    ("HUF", "Hungarian Forint"),
    ("INR", "Indian Rupee"),
    ("JPY", "Japanese Yen"),
    ("KRW", "South Korean Won"),
    ("MXN", "Mexican Peso"),
    ("NOK", "Norwegian Krone"),
    ("NZD", "New Zealand Dollar"),
    ("PLN", "Polish Zloty"),
    ("SEK", "Swedish Krona"),
    ("SGD", "Singapore Dollar"),
    ("THB", "Thai Baht"),
    ("TRY", "Turkish Lira"),
    ("USD", "US Dollar"),
    ("ZAR", "South African Rand"),
];

pub fn currency_name(code: &str) -> Option<&'static str> {
    CURRENCIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code.trim()))
        .map(|(_, name)| *name)
}

/// Normalize a user-supplied code and check it is in the table.
pub fn validate_code(code: &str) -> Result<&'static str, AppError> {
    CURRENCIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code.trim()))
        .map(|(c, _)| *c)
        .ok_or_else(|| AppError::new(2, format!("Unsupported currency code '{code}'.")))
}

/// Label shown in dropdowns: `"EUR - Euro"`.
pub fn dropdown_label(code: &str) -> String {
    match currency_name(code) {
        Some(name) => format!("{} - {name}", code.to_ascii_uppercase()),
        None => code.to_string(),
    }
}
