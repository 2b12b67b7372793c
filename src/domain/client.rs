//! Client - Customer Record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, Record};
use super::status::EntityStatus;
use crate::constants::{FREQUENT_CLIENT_MIN_PURCHASES, REGULAR_CLIENT_MIN_PURCHASES};
use crate::view::{Bucket, FieldValue, Rule, RuleTable};

/// Customer segments by purchase count.
///
/// Drives the "segmento" list filter, the segment summary cards, and the
/// purchase-count check in the client modal.
pub static CLIENT_SEGMENTS: RuleTable = RuleTable {
    field: "compras",
    buckets: &[
        Bucket {
            id: "frecuente",
            label_key: "segment-frequent",
            rule: Rule::AtLeast(FREQUENT_CLIENT_MIN_PURCHASES),
        },
        Bucket {
            id: "regular",
            label_key: "segment-regular",
            rule: Rule::Between(REGULAR_CLIENT_MIN_PURCHASES, FREQUENT_CLIENT_MIN_PURCHASES - 1.0),
        },
        Bucket {
            id: "nuevo",
            label_key: "segment-new",
            rule: Rule::Between(0.0, REGULAR_CLIENT_MIN_PURCHASES - 1.0),
        },
    ],
};

/// A customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: EntityId,
    pub nombre: String,
    /// National id / tax number
    #[serde(default)]
    pub documento: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub estado: EntityStatus,
    /// Number of purchases
    #[serde(default)]
    pub compras: i64,
    #[serde(default)]
    pub total_gastado: f64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Segment id, if the purchase count is valid
    pub fn segment(&self) -> Option<&'static str> {
        CLIENT_SEGMENTS
            .classify(&FieldValue::Int(self.compras))
            .map(|b| b.id)
    }
}

/// Create/edit payload from the client modal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub nombre: String,
    pub documento: String,
    pub email: String,
    pub telefono: String,
    pub direccion: String,
    pub estado: EntityStatus,
    pub compras: i64,
}

impl From<&Client> for ClientDraft {
    fn from(c: &Client) -> Self {
        Self {
            nombre: c.nombre.clone(),
            documento: c.documento.clone(),
            email: c.email.clone(),
            telefono: c.telefono.clone(),
            direccion: c.direccion.clone(),
            estado: c.estado,
            compras: c.compras,
        }
    }
}

impl Entity for Client {
    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.as_str().into(),
            "nombre" => self.nombre.as_str().into(),
            "documento" => self.documento.as_str().into(),
            "email" => self.email.as_str().into(),
            "telefono" => self.telefono.as_str().into(),
            "direccion" => self.direccion.as_str().into(),
            "estado" => self.estado.as_str().into(),
            "compras" => self.compras.into(),
            "segmento" => self.segment().into(),
            "total_gastado" => self.total_gastado.into(),
            "created_at" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Record for Client {
    type Draft = ClientDraft;

    const TABLE: &'static str = "clientes";
    const LABEL: &'static str = "Client";

    fn from_draft(id: EntityId, draft: &ClientDraft) -> Self {
        let mut client = Self {
            id,
            nombre: String::new(),
            documento: String::new(),
            email: String::new(),
            telefono: String::new(),
            direccion: String::new(),
            estado: EntityStatus::default(),
            compras: 0,
            total_gastado: 0.0,
            created_at: Utc::now(),
        };
        client.apply_draft(draft);
        client
    }

    fn apply_draft(&mut self, draft: &ClientDraft) {
        self.nombre = draft.nombre.clone();
        self.documento = draft.documento.clone();
        self.email = draft.email.clone();
        self.telefono = draft.telefono.clone();
        self.direccion = draft.direccion.clone();
        self.estado = draft.estado;
        self.compras = draft.compras;
    }
}
