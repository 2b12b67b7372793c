//! Validation - Entity Modal Form Rules
//!
//! Validation never fails with an error: it collects one message per field
//! and the modal renders them next to the inputs. Messages are translation
//! keys, rendered in the caller's locale.

mod forms;
mod wizard;

use std::fmt;
use std::sync::LazyLock;

use hashlink::LinkedHashMap;
use regex::Regex;

use crate::i18n::{Locale, t_format};

pub use forms::Validate;
pub use wizard::{PromotionWizard, WizardStep};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ]{7,15}$").expect("phone pattern is valid"));

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub(crate) fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone.trim())
}

/// A problem with one field: translation key plus `{name}` arguments
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub key: &'static str,
    args: Vec<(&'static str, String)>,
}

impl FieldError {
    pub fn new(key: &'static str) -> Self {
        Self { key, args: Vec::new() }
    }

    pub fn arg(mut self, name: &'static str, value: impl ToString) -> Self {
        self.args.push((name, value.to_string()));
        self
    }

    pub fn render(&self, locale: Locale) -> String {
        let args: Vec<(&str, &str)> = self.args.iter().map(|(k, v)| (*k, v.as_str())).collect();
        t_format(locale, self.key, &args)
    }
}

impl From<&'static str> for FieldError {
    fn from(key: &'static str) -> Self {
        Self::new(key)
    }
}

/// Field -> problem, in the order problems were found
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(LinkedHashMap<&'static str, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem; the first message per field wins
    pub fn add(&mut self, field: &'static str, error: impl Into<FieldError>) {
        if !self.0.contains_key(field) {
            self.0.insert(field, error.into());
        }
    }

    /// Record `error` when `failed` holds
    pub fn check(&mut self, failed: bool, field: &'static str, error: impl Into<FieldError>) {
        if failed {
            self.add(field, error);
        }
    }

    pub fn require(&mut self, field: &'static str, value: &str) {
        self.check(value.trim().is_empty(), field, "validation-required");
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// The message for `field` in `locale`
    pub fn message(&self, field: &str, locale: Locale) -> Option<String> {
        self.get(field).map(|e| e.render(locale))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// `field: message` pairs joined with `; `
    pub fn render(&self, locale: Locale) -> String {
        self.iter()
            .map(|(field, error)| format!("{field}: {}", error.render(locale)))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.add(field, message);
        }
    }

    /// `Ok(())` when clean, otherwise the errors themselves
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Locale::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.require("nombre", " ");
        errors.add("nombre", "validation-email");
        errors.check(true, "precio", "validation-price-positive");
        assert_eq!(errors.get("nombre").map(|e| e.key), Some("validation-required"));
        assert_eq!(
            errors.to_string(),
            "nombre: Campo obligatorio; precio: El precio debe ser mayor que cero"
        );
    }

    #[test]
    fn messages_follow_the_locale() {
        let mut errors = FieldErrors::new();
        errors.add("password", FieldError::new("validation-password-length").arg("min", 8));

        assert_eq!(
            errors.message("password", Locale::Es).as_deref(),
            Some("La contraseña debe tener al menos 8 caracteres")
        );
        assert_eq!(
            errors.render(Locale::En),
            "password: Password must be at least 8 characters"
        );
    }

    #[test]
    fn email_and_phone_shapes() {
        assert!(is_valid_email("ana@ferremarket.co"));
        assert!(!is_valid_email("ana@ferremarket"));
        assert!(!is_valid_email("ana ferre@x.co"));
        assert!(is_valid_phone("+57 300 123 4567"));
        assert!(!is_valid_phone("12ab"));
    }
}
