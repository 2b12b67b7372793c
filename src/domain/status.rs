//! Status - Enumerated Field Values Stored by the Backend
//!
//! All serialize as lowercase Spanish strings, matching the table columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Parse user input, case-insensitive
            pub fn parse(input: &str) -> Result<Self> {
                let input = input.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| crate::view::eq_fold(v.as_str(), input))
                    .ok_or_else(|| Error::Invalid {
                        message: format!("Unknown {} value: {input}", stringify!($name)),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Active/inactive flag used by products and clients
    EntityStatus {
        Activo => "activo",
        Inactivo => "inactivo",
    }
}

impl Default for EntityStatus {
    fn default() -> Self {
        EntityStatus::Activo
    }
}

string_enum! {
    /// Sale lifecycle
    SaleStatus {
        Completada => "completada",
        Pendiente => "pendiente",
        Anulada => "anulada",
    }
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Completada
    }
}

string_enum! {
    /// How a sale was paid
    PaymentMethod {
        Efectivo => "efectivo",
        Tarjeta => "tarjeta",
        Transferencia => "transferencia",
        Credito => "credito",
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Efectivo
    }
}

string_enum! {
    /// Dashboard user role
    Role {
        Admin => "admin",
        Vendedor => "vendedor",
        Bodeguero => "bodeguero",
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Vendedor
    }
}

string_enum! {
    /// Promotion discount kind
    DiscountKind {
        Porcentaje => "porcentaje",
        MontoFijo => "monto_fijo",
    }
}

impl Default for DiscountKind {
    fn default() -> Self {
        DiscountKind::Porcentaje
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_lowercase_spanish() {
        assert_eq!(serde_json::to_string(&DiscountKind::MontoFijo).unwrap(), "\"monto_fijo\"");
        let role: Role = serde_json::from_str("\"bodeguero\"").unwrap();
        assert_eq!(role, Role::Bodeguero);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(EntityStatus::parse(" Inactivo ").unwrap(), EntityStatus::Inactivo);
        assert!(SaleStatus::parse("perdida").is_err());
    }
}
