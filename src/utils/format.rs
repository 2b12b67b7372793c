//! Format - Formatting Utilities

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::i18n::{Locale, t};
use crate::view::FieldValue;

/// Format a UTC datetime in local time
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = dt.with_timezone(&Local);
    local.format("%Y-%m-%d %H:%M").to_string()
}

/// Format a local datetime for display
pub fn format_local_datetime(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Day/month/year as shown on invoices
pub fn format_date(date: &NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Es => date.format("%d/%m/%Y").to_string(),
        Locale::En => date.format("%Y-%m-%d").to_string(),
    }
}

/// Truncate to `max_chars` characters with an ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut out: String = s.chars().take(max_chars - 1).collect();
        out.push('…');
        out
    }
}

fn separators(locale: Locale) -> (char, char) {
    match locale {
        Locale::Es => ('.', ','),
        Locale::En => (',', '.'),
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }
    result
}

/// Integer with locale thousand separators
pub fn format_number(n: i64, locale: Locale) -> String {
    let (thousands, _) = separators(locale);
    let grouped = group_thousands(&n.unsigned_abs().to_string(), thousands);
    if n < 0 { format!("-{grouped}") } else { grouped }
}

/// Decimal with `decimals` places and locale separators
pub fn format_decimal(value: f64, decimals: usize, locale: Locale) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let (thousands, decimal) = separators(locale);
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut out = String::new();
    if value < 0.0 && text.chars().any(|c| c != '0' && c != '.') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, thousands));
    if !frac_part.is_empty() {
        out.push(decimal);
        out.push_str(frac_part);
    }
    out
}

/// Peso amounts: no decimals, `$` prefix
pub fn format_currency(amount: f64, locale: Locale) -> String {
    let text = format_decimal(amount, 0, locale);
    match text.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${text}"),
    }
}

/// Percentage with at most one decimal
pub fn format_percent(value: f64, locale: Locale) -> String {
    let decimals = if value.fract() == 0.0 { 0 } else { 1 };
    format!("{}%", format_decimal(value, decimals, locale))
}

/// Translated label for a stored status value ("activo", "vigente", ...)
pub fn format_status(value: &str, locale: Locale) -> String {
    let key = format!("status-{value}");
    let label = t(locale, &key);
    if label == key { value.to_string() } else { label.to_string() }
}

/// Generic cell text for a field value
pub fn format_field(value: &FieldValue, locale: Locale) -> String {
    match value {
        FieldValue::Null => "-".to_string(),
        FieldValue::Bool(b) => t(locale, if *b { "table-yes" } else { "table-no" }).to_string(),
        FieldValue::Int(n) => format_number(*n, locale),
        FieldValue::Float(f) => format_decimal(*f, 2, locale),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Date(d) => format_datetime(d),
    }
}
