//! Product - Catalog Item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, Record};
use super::status::EntityStatus;
use crate::view::FieldValue;

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    /// Internal SKU / barcode
    pub codigo: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub categoria: String,
    /// Unit price
    pub precio: f64,
    pub stock: i64,
    /// Reorder threshold
    #[serde(default)]
    pub stock_minimo: i64,
    #[serde(default)]
    pub imagen_url: Option<String>,
    #[serde(default)]
    pub estado: EntityStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Stock situation relative to the reorder threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Agotado,
    Bajo,
    Disponible,
}

impl StockLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::Agotado => "agotado",
            StockLevel::Bajo => "bajo",
            StockLevel::Disponible => "disponible",
        }
    }
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        if self.stock <= 0 {
            StockLevel::Agotado
        } else if self.stock <= self.stock_minimo {
            StockLevel::Bajo
        } else {
            StockLevel::Disponible
        }
    }

    /// Inventory value at list price
    pub fn inventory_value(&self) -> f64 {
        self.precio * self.stock.max(0) as f64
    }
}

/// Create/edit payload from the product modal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub categoria: String,
    pub precio: f64,
    pub stock: i64,
    pub stock_minimo: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen_url: Option<String>,
    pub estado: EntityStatus,
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            codigo: p.codigo.clone(),
            nombre: p.nombre.clone(),
            descripcion: p.descripcion.clone(),
            categoria: p.categoria.clone(),
            precio: p.precio,
            stock: p.stock,
            stock_minimo: p.stock_minimo,
            imagen_url: p.imagen_url.clone(),
            estado: p.estado,
        }
    }
}

impl Entity for Product {
    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.as_str().into(),
            "codigo" => self.codigo.as_str().into(),
            "nombre" => self.nombre.as_str().into(),
            "descripcion" => self.descripcion.as_str().into(),
            "categoria" => self.categoria.as_str().into(),
            "precio" => self.precio.into(),
            "stock" => self.stock.into(),
            "stock_minimo" => self.stock_minimo.into(),
            "nivel_stock" => self.stock_level().as_str().into(),
            "valor_inventario" => self.inventory_value().into(),
            "imagen_url" => self.imagen_url.as_deref().into(),
            "estado" => self.estado.as_str().into(),
            "created_at" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Record for Product {
    type Draft = ProductDraft;

    const TABLE: &'static str = "productos";
    const LABEL: &'static str = "Product";

    fn from_draft(id: EntityId, draft: &ProductDraft) -> Self {
        let mut product = Self {
            id,
            codigo: String::new(),
            nombre: String::new(),
            descripcion: String::new(),
            categoria: String::new(),
            precio: 0.0,
            stock: 0,
            stock_minimo: 0,
            imagen_url: None,
            estado: EntityStatus::default(),
            created_at: Utc::now(),
        };
        product.apply_draft(draft);
        product
    }

    fn apply_draft(&mut self, draft: &ProductDraft) {
        self.codigo = draft.codigo.clone();
        self.nombre = draft.nombre.clone();
        self.descripcion = draft.descripcion.clone();
        self.categoria = draft.categoria.clone();
        self.precio = draft.precio;
        self.stock = draft.stock;
        self.stock_minimo = draft.stock_minimo;
        if draft.imagen_url.is_some() {
            self.imagen_url = draft.imagen_url.clone();
        }
        self.estado = draft.estado;
    }
}
