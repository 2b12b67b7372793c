//! Rule table shared by list filters and form validation.
//!
//! A bucket names a range of values on one field ("frecuente" = compras >= 10).
//! The same table drives the filter dropdown, the summary cards, and the
//! modal that checks thresholds on input.

use super::field::{FieldValue, eq_fold};

/// A single predicate over one field value
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Case-insensitive text or exact value equality
    Equals(&'static str),
    /// Any of the listed values
    OneOf(&'static [&'static str]),
    /// Numeric lower bound, inclusive
    AtLeast(f64),
    /// Numeric upper bound, inclusive
    AtMost(f64),
    /// Inclusive numeric range
    Between(f64, f64),
    /// Present and, for text, not blank
    NonEmpty,
}

impl Rule {
    /// Evaluate against a field value. Null fails every rule.
    pub fn eval(&self, value: &FieldValue) -> bool {
        if value.is_null() {
            return false;
        }
        match self {
            Rule::Equals(expected) => value.matches_input(expected),
            Rule::OneOf(options) => options.iter().any(|o| value.matches_input(o)),
            Rule::AtLeast(min) => value.as_f64().is_some_and(|v| v >= *min),
            Rule::AtMost(max) => value.as_f64().is_some_and(|v| v <= *max),
            Rule::Between(min, max) => value.as_f64().is_some_and(|v| v >= *min && v <= *max),
            Rule::NonEmpty => match value {
                FieldValue::Text(s) => !s.trim().is_empty(),
                _ => true,
            },
        }
    }
}

/// A named range on a field
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Filter value / stat suffix (e.g. "frecuente")
    pub id: &'static str,
    /// Translation key for the label
    pub label_key: &'static str,
    pub rule: Rule,
}

/// Buckets over one field
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    pub field: &'static str,
    pub buckets: &'static [Bucket],
}

impl RuleTable {
    pub fn bucket(&self, id: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| eq_fold(b.id, id.trim()))
    }

    /// First bucket whose rule accepts the value
    pub fn classify(&self, value: &FieldValue) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.rule.eval(value))
    }

    /// Whether `value` falls into the bucket named `id`. Unknown buckets fail closed.
    pub fn matches(&self, id: &str, value: &FieldValue) -> bool {
        self.bucket(id).is_some_and(|b| b.rule.eval(value))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.buckets.iter().map(|b| b.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: RuleTable = RuleTable {
        field: "compras",
        buckets: &[
            Bucket { id: "alto", label_key: "x", rule: Rule::AtLeast(10.0) },
            Bucket { id: "medio", label_key: "x", rule: Rule::Between(3.0, 9.0) },
            Bucket { id: "bajo", label_key: "x", rule: Rule::AtMost(2.0) },
        ],
    };

    #[test]
    fn null_fails_closed() {
        assert!(!Rule::AtLeast(0.0).eval(&FieldValue::Null));
        assert!(!Rule::NonEmpty.eval(&FieldValue::Null));
        assert!(!TABLE.matches("bajo", &FieldValue::Null));
    }

    #[test]
    fn classify_picks_first_matching_bucket() {
        assert_eq!(TABLE.classify(&FieldValue::Int(12)).map(|b| b.id), Some("alto"));
        assert_eq!(TABLE.classify(&FieldValue::Int(5)).map(|b| b.id), Some("medio"));
        assert_eq!(TABLE.classify(&FieldValue::Int(0)).map(|b| b.id), Some("bajo"));
    }

    #[test]
    fn unknown_bucket_never_matches() {
        assert!(!TABLE.matches("vip", &FieldValue::Int(100)));
    }

    #[test]
    fn one_of_and_non_empty() {
        let rule = Rule::OneOf(&["admin", "vendedor"]);
        assert!(rule.eval(&FieldValue::from("Vendedor")));
        assert!(!rule.eval(&FieldValue::from("bodeguero")));
        assert!(!Rule::NonEmpty.eval(&FieldValue::from("   ")));
        assert!(Rule::NonEmpty.eval(&FieldValue::Int(0)));
    }
}
