//! Field values exposed by entities to the list-view engine.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

/// Unicode case-insensitive equality, the same folding search uses
pub fn eq_fold(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// A dynamically typed field value read off an entity
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    /// Missing or null field
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(DateTime<Utc>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(n) => Some(*n as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Text used for free-text search; `None` for null
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Text(s) => Some(s.to_lowercase()),
            other => Some(other.to_string().to_lowercase()),
        }
    }

    /// Compare against a raw filter value typed by the user.
    ///
    /// Text compares case-insensitively, numbers parse the input, booleans
    /// accept `true/false/si/no/1/0`. Null never matches.
    pub fn matches_input(&self, input: &str) -> bool {
        let input = input.trim();
        match self {
            FieldValue::Null => false,
            FieldValue::Text(s) => eq_fold(s, input),
            FieldValue::Int(n) => input.parse::<i64>().is_ok_and(|v| v == *n),
            FieldValue::Float(f) => input.parse::<f64>().is_ok_and(|v| v == *f),
            FieldValue::Bool(b) => parse_bool(input).is_some_and(|v| v == *b),
            FieldValue::Date(d) => d.date_naive().to_string() == input,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Int(_) | FieldValue::Float(_) => 2,
            FieldValue::Date(_) => 3,
            FieldValue::Text(_) => 4,
        }
    }

    /// Total order used by the sorter. Null sorts first.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        use FieldValue::*;

        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Int(_) | Float(_), Int(_) | Float(_)) => {
                let a = self.as_f64().unwrap_or_default();
                let b = other.as_f64().unwrap_or_default();
                a.total_cmp(&b)
            }
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

fn parse_bool(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "true" | "si" | "sí" | "1" | "yes" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d.to_rfc3339()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sorts_before_everything() {
        let values = [
            FieldValue::Bool(false),
            FieldValue::Int(-5),
            FieldValue::Float(0.5),
            FieldValue::Text(String::new()),
            FieldValue::Date(Utc::now()),
        ];
        for v in &values {
            assert_eq!(FieldValue::Null.total_cmp(v), Ordering::Less);
            assert_eq!(v.total_cmp(&FieldValue::Null), Ordering::Greater);
        }
    }

    #[test]
    fn ints_and_floats_compare_numerically() {
        assert_eq!(FieldValue::Int(2).total_cmp(&FieldValue::Float(2.5)), Ordering::Less);
        assert_eq!(FieldValue::Float(3.0).total_cmp(&FieldValue::Int(3)), Ordering::Equal);
    }

    #[test]
    fn text_compares_case_insensitively() {
        let a = FieldValue::from("alicate");
        let b = FieldValue::from("Broca");
        assert_eq!(a.total_cmp(&b), Ordering::Less);
    }

    #[test]
    fn matches_input_by_kind() {
        assert!(FieldValue::from("Activo").matches_input("activo"));
        assert!(FieldValue::Int(10).matches_input(" 10 "));
        assert!(!FieldValue::Int(10).matches_input("diez"));
        assert!(FieldValue::Bool(true).matches_input("si"));
        assert!(!FieldValue::Null.matches_input(""));
    }

    #[test]
    fn accented_text_folds_like_search() {
        let value = FieldValue::from("Eléctricos");
        assert!(value.matches_input("ELÉCTRICOS"));
        assert!(value.search_text().is_some_and(|t| t.contains(&"ELÉC".to_lowercase())));
        assert!(!value.matches_input("Electricos"));
        assert!(eq_fold("Ñandú", "ñANDÚ"));
    }

    #[test]
    fn option_converts_to_null() {
        let none: Option<i64> = None;
        assert!(FieldValue::from(none).is_null());
        assert_eq!(FieldValue::from(Some(4i64)), FieldValue::Int(4));
    }
}
