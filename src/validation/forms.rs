//! Per-entity form checks.

use super::wizard::{check_code, check_discount, check_schedule};
use super::{FieldError, FieldErrors, is_valid_email, is_valid_phone};
use crate::constants::MIN_PASSWORD_LEN;
use crate::domain::{
    CLIENT_SEGMENTS, Client, ClientDraft, EntityId, Product, ProductDraft, Promotion,
    PromotionDraft, Sale, SaleDraft, User, UserDraft,
};
use crate::view::{FieldValue, Rule, eq_fold};

/// A modal payload that can be checked against the current collection
pub trait Validate<T> {
    /// `editing` is the id of the record being edited, `None` on create
    fn validate(&self, existing: &[T], editing: Option<&EntityId>) -> FieldErrors;
}

/// Whether any other record already uses `value` for a unique column
fn taken<'a, T: 'a>(
    existing: impl IntoIterator<Item = &'a T>,
    editing: Option<&EntityId>,
    id: impl Fn(&T) -> &EntityId,
    column: impl Fn(&T) -> &str,
    value: &str,
) -> bool {
    let value = value.trim();
    !value.is_empty()
        && existing
            .into_iter()
            .any(|r| Some(id(r)) != editing && eq_fold(column(r).trim(), value))
}

impl Validate<Product> for ProductDraft {
    fn validate(&self, existing: &[Product], editing: Option<&EntityId>) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.require("codigo", &self.codigo);
        errors.check(
            taken(existing, editing, |p| &p.id, |p| &p.codigo, &self.codigo),
            "codigo",
            "validation-product-code-taken",
        );
        errors.require("nombre", &self.nombre);
        errors.require("categoria", &self.categoria);
        errors.check(
            !Rule::AtLeast(0.01).eval(&FieldValue::Float(self.precio)),
            "precio",
            "validation-price-positive",
        );
        errors.check(self.stock < 0, "stock", "validation-stock-negative");
        errors.check(
            self.stock_minimo < 0,
            "stock_minimo",
            "validation-min-stock-negative",
        );
        if let Some(url) = &self.imagen_url {
            errors.check(
                !(url.starts_with("https://") || url.starts_with("http://")),
                "imagen_url",
                "validation-image-url",
            );
        }

        errors
    }
}

impl Validate<Client> for ClientDraft {
    fn validate(&self, existing: &[Client], editing: Option<&EntityId>) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.require("nombre", &self.nombre);
        errors.require("documento", &self.documento);
        errors.check(
            taken(existing, editing, |c| &c.id, |c| &c.documento, &self.documento),
            "documento",
            "validation-document-taken",
        );
        errors.check(
            !self.email.trim().is_empty() && !is_valid_email(&self.email),
            "email",
            "validation-email",
        );
        errors.check(
            !self.telefono.trim().is_empty() && !is_valid_phone(&self.telefono),
            "telefono",
            "validation-phone",
        );
        // Same buckets as the segment filter: a count outside every bucket is invalid.
        errors.check(
            CLIENT_SEGMENTS.classify(&FieldValue::Int(self.compras)).is_none(),
            "compras",
            "validation-purchases-negative",
        );

        errors
    }
}

impl Validate<Sale> for SaleDraft {
    fn validate(&self, _existing: &[Sale], _editing: Option<&EntityId>) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.check(self.items.is_empty(), "items", "validation-sale-empty");
        for item in &self.items {
            errors.check(
                item.cantidad < 1,
                "items",
                FieldError::new("validation-item-quantity").arg("name", &item.nombre),
            );
            errors.check(
                item.precio_unitario < 0.0,
                "items",
                FieldError::new("validation-item-price").arg("name", &item.nombre),
            );
        }
        errors.check(
            (self.total - self.items_total()).abs() > 0.01,
            "total",
            "validation-total-mismatch",
        );

        errors
    }
}

impl Validate<User> for UserDraft {
    fn validate(&self, existing: &[User], editing: Option<&EntityId>) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.require("nombre", &self.nombre);
        errors.require("email", &self.email);
        errors.check(
            !self.email.trim().is_empty() && !is_valid_email(&self.email),
            "email",
            "validation-email",
        );
        errors.check(
            taken(existing, editing, |u| &u.id, |u| &u.email, &self.email),
            "email",
            "validation-user-email-taken",
        );
        if editing.is_none() {
            let short = self
                .password
                .as_deref()
                .is_none_or(|p| p.chars().count() < MIN_PASSWORD_LEN);
            errors.check(
                short,
                "password",
                FieldError::new("validation-password-length").arg("min", MIN_PASSWORD_LEN),
            );
        }

        errors
    }
}

impl Validate<Promotion> for PromotionDraft {
    fn validate(&self, existing: &[Promotion], editing: Option<&EntityId>) -> FieldErrors {
        let codes: Vec<&str> = existing
            .iter()
            .filter(|p| Some(&p.id) != editing)
            .map(|p| p.codigo.as_str())
            .collect();

        let mut errors = FieldErrors::new();
        errors.merge(check_code(&self.codigo, &codes));
        errors.merge(check_discount(self.tipo, self.valor));
        errors.merge(check_schedule(self.fecha_inicio, self.fecha_fin, self.usos_maximos));
        errors
    }
}
