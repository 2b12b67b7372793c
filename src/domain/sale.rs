//! Sale - Point-of-Sale Transaction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, Record};
use super::status::{PaymentMethod, SaleStatus};
use crate::view::FieldValue;

/// One line of a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub producto_id: EntityId,
    pub nombre: String,
    pub cantidad: i64,
    pub precio_unitario: f64,
}

impl SaleItem {
    pub fn subtotal(&self) -> f64 {
        self.cantidad as f64 * self.precio_unitario
    }
}

/// A sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: EntityId,
    #[serde(default)]
    pub cliente_id: Option<EntityId>,
    /// Denormalized for listing; "Consumidor final" for walk-ins
    #[serde(default)]
    pub cliente_nombre: String,
    #[serde(default)]
    pub items: Vec<SaleItem>,
    pub total: f64,
    #[serde(default)]
    pub metodo_pago: PaymentMethod,
    #[serde(default)]
    pub estado: SaleStatus,
    #[serde(default = "Utc::now")]
    pub fecha: DateTime<Utc>,
}

impl Sale {
    pub fn units(&self) -> i64 {
        self.items.iter().map(|i| i.cantidad).sum()
    }

    /// Revenue counted in reports; voided sales count zero
    pub fn revenue(&self) -> f64 {
        match self.estado {
            SaleStatus::Anulada => 0.0,
            _ => self.total,
        }
    }
}

/// Create/edit payload from the sale entry form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub cliente_id: Option<EntityId>,
    pub cliente_nombre: String,
    pub items: Vec<SaleItem>,
    pub metodo_pago: PaymentMethod,
    pub estado: SaleStatus,
    /// Always recomputed from the items
    pub total: f64,
}

impl SaleDraft {
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(SaleItem::subtotal).sum()
    }

    /// Recompute `total` from the lines
    pub fn with_computed_total(mut self) -> Self {
        self.total = self.items_total();
        self
    }
}

impl From<&Sale> for SaleDraft {
    fn from(s: &Sale) -> Self {
        Self {
            cliente_id: s.cliente_id.clone(),
            cliente_nombre: s.cliente_nombre.clone(),
            items: s.items.clone(),
            metodo_pago: s.metodo_pago,
            estado: s.estado,
            total: s.total,
        }
    }
}

impl Entity for Sale {
    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.as_str().into(),
            "cliente_id" => self.cliente_id.as_ref().map(EntityId::as_str).into(),
            "cliente_nombre" => self.cliente_nombre.as_str().into(),
            "total" => self.total.into(),
            "unidades" => self.units().into(),
            "metodo_pago" => self.metodo_pago.as_str().into(),
            "estado" => self.estado.as_str().into(),
            "fecha" => self.fecha.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Record for Sale {
    type Draft = SaleDraft;

    const TABLE: &'static str = "ventas";
    const LABEL: &'static str = "Sale";

    fn from_draft(id: EntityId, draft: &SaleDraft) -> Self {
        let mut sale = Self {
            id,
            cliente_id: None,
            cliente_nombre: String::new(),
            items: Vec::new(),
            total: 0.0,
            metodo_pago: PaymentMethod::default(),
            estado: SaleStatus::default(),
            fecha: Utc::now(),
        };
        sale.apply_draft(draft);
        sale
    }

    fn apply_draft(&mut self, draft: &SaleDraft) {
        self.cliente_id = draft.cliente_id.clone();
        self.cliente_nombre = draft.cliente_nombre.clone();
        self.items = draft.items.clone();
        self.total = draft.total;
        self.metodo_pago = draft.metodo_pago;
        self.estado = draft.estado;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cantidad: i64, precio: f64) -> SaleItem {
        SaleItem {
            producto_id: EntityId::from("p"),
            nombre: "Tornillo".into(),
            cantidad,
            precio_unitario: precio,
        }
    }

    #[test]
    fn total_is_computed_from_lines() {
        let draft = SaleDraft {
            items: vec![item(3, 500.0), item(1, 12_000.0)],
            total: 1.0,
            ..Default::default()
        }
        .with_computed_total();
        assert_eq!(draft.total, 13_500.0);
    }

    #[test]
    fn voided_sales_have_no_revenue() {
        let mut sale = Sale::from_draft(
            EntityId::from("v1"),
            &SaleDraft {
                items: vec![item(2, 100.0)],
                ..Default::default()
            }
            .with_computed_total(),
        );
        assert_eq!(sale.revenue(), 200.0);
        assert_eq!(sale.units(), 2);
        sale.estado = SaleStatus::Anulada;
        assert_eq!(sale.revenue(), 0.0);
    }
}
