//! User - Dashboard Account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, Record};
use super::status::Role;
use crate::view::FieldValue;

/// A dashboard user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub nombre: String,
    pub email: String,
    #[serde(default)]
    pub rol: Role,
    #[serde(default)]
    pub activo: bool,
    #[serde(default)]
    pub ultimo_acceso: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.rol == Role::Admin
    }
}

/// Create/edit payload from the user modal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub nombre: String,
    pub email: String,
    pub rol: Role,
    pub activo: bool,
    /// Only sent on create; the backend hashes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl From<&User> for UserDraft {
    fn from(u: &User) -> Self {
        Self {
            nombre: u.nombre.clone(),
            email: u.email.clone(),
            rol: u.rol,
            activo: u.activo,
            password: None,
        }
    }
}

impl Entity for User {
    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.as_str().into(),
            "nombre" => self.nombre.as_str().into(),
            "email" => self.email.as_str().into(),
            "rol" => self.rol.as_str().into(),
            "activo" => self.activo.into(),
            "estado" => (if self.activo { "activo" } else { "inactivo" }).into(),
            "ultimo_acceso" => self.ultimo_acceso.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Record for User {
    type Draft = UserDraft;

    const TABLE: &'static str = "usuarios";
    const LABEL: &'static str = "User";

    fn from_draft(id: EntityId, draft: &UserDraft) -> Self {
        Self {
            id,
            nombre: draft.nombre.clone(),
            email: draft.email.clone(),
            rol: draft.rol,
            activo: draft.activo,
            ultimo_acceso: None,
        }
    }

    fn apply_draft(&mut self, draft: &UserDraft) {
        self.nombre = draft.nombre.clone();
        self.email = draft.email.clone();
        self.rol = draft.rol;
        self.activo = draft.activo;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_not_serialized_on_edit() {
        let draft = UserDraft {
            nombre: "Luis".into(),
            email: "luis@ferremarket.co".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["rol"], "vendedor");
    }

    #[test]
    fn estado_mirrors_activo_flag() {
        let mut user = User::from_draft(EntityId::from("u1"), &UserDraft::default());
        assert_eq!(user.field("estado"), FieldValue::from("inactivo"));
        user.activo = true;
        assert_eq!(user.field("estado"), FieldValue::from("activo"));
        assert!(user.field("ultimo_acceso").is_null());
    }
}
