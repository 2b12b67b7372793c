//! Promotion - Discount Code

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, Record};
use super::status::DiscountKind;
use crate::view::FieldValue;

/// Where a promotion stands on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionStatus {
    /// Starts in the future
    Programada,
    /// Redeemable today
    Vigente,
    /// End date has passed
    Expirada,
    /// Switched off by an admin
    Inactiva,
    /// Usage cap reached
    Agotada,
}

impl PromotionStatus {
    pub const ALL: &'static [PromotionStatus] = &[
        PromotionStatus::Programada,
        PromotionStatus::Vigente,
        PromotionStatus::Expirada,
        PromotionStatus::Inactiva,
        PromotionStatus::Agotada,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromotionStatus::Programada => "programada",
            PromotionStatus::Vigente => "vigente",
            PromotionStatus::Expirada => "expirada",
            PromotionStatus::Inactiva => "inactiva",
            PromotionStatus::Agotada => "agotada",
        }
    }
}

/// A promotional code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: EntityId,
    /// Uppercase code typed at checkout
    pub codigo: String,
    #[serde(default)]
    pub descripcion: String,
    pub tipo: DiscountKind,
    /// Percentage (0-100] or fixed amount, depending on `tipo`
    pub valor: f64,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    #[serde(default)]
    pub usos: i64,
    #[serde(default)]
    pub usos_maximos: Option<i64>,
    #[serde(default = "default_true")]
    pub activa: bool,
}

fn default_true() -> bool {
    true
}

impl Promotion {
    pub fn status_at(&self, today: NaiveDate) -> PromotionStatus {
        if !self.activa {
            PromotionStatus::Inactiva
        } else if self.usos_maximos.is_some_and(|max| self.usos >= max) {
            PromotionStatus::Agotada
        } else if today < self.fecha_inicio {
            PromotionStatus::Programada
        } else if today > self.fecha_fin {
            PromotionStatus::Expirada
        } else {
            PromotionStatus::Vigente
        }
    }

    /// Discount applied to an order `amount`, never more than the amount
    pub fn discount_for(&self, amount: f64) -> f64 {
        let discount = match self.tipo {
            DiscountKind::Porcentaje => amount * self.valor / 100.0,
            DiscountKind::MontoFijo => self.valor,
        };
        discount.clamp(0.0, amount.max(0.0))
    }

    pub fn remaining_uses(&self) -> Option<i64> {
        self.usos_maximos.map(|max| (max - self.usos).max(0))
    }
}

fn date_value(date: NaiveDate) -> FieldValue {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| FieldValue::Date(dt.and_utc()))
        .unwrap_or_default()
}

/// Payload produced by the promotion wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionDraft {
    pub codigo: String,
    pub descripcion: String,
    pub tipo: DiscountKind,
    pub valor: f64,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub usos_maximos: Option<i64>,
    pub activa: bool,
}

impl From<&Promotion> for PromotionDraft {
    fn from(p: &Promotion) -> Self {
        Self {
            codigo: p.codigo.clone(),
            descripcion: p.descripcion.clone(),
            tipo: p.tipo,
            valor: p.valor,
            fecha_inicio: p.fecha_inicio,
            fecha_fin: p.fecha_fin,
            usos_maximos: p.usos_maximos,
            activa: p.activa,
        }
    }
}

impl Entity for Promotion {
    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.as_str().into(),
            "codigo" => self.codigo.as_str().into(),
            "descripcion" => self.descripcion.as_str().into(),
            "tipo" => self.tipo.as_str().into(),
            "valor" => self.valor.into(),
            "fecha_inicio" => date_value(self.fecha_inicio),
            "fecha_fin" => date_value(self.fecha_fin),
            "usos" => self.usos.into(),
            "usos_maximos" => self.usos_maximos.into(),
            "activa" => self.activa.into(),
            "estado" => self.status_at(Utc::now().date_naive()).as_str().into(),
            _ => FieldValue::Null,
        }
    }
}

impl Record for Promotion {
    type Draft = PromotionDraft;

    const TABLE: &'static str = "promociones";
    const LABEL: &'static str = "Promotion";

    fn from_draft(id: EntityId, draft: &PromotionDraft) -> Self {
        Self {
            id,
            codigo: draft.codigo.clone(),
            descripcion: draft.descripcion.clone(),
            tipo: draft.tipo,
            valor: draft.valor,
            fecha_inicio: draft.fecha_inicio,
            fecha_fin: draft.fecha_fin,
            usos: 0,
            usos_maximos: draft.usos_maximos,
            activa: draft.activa,
        }
    }

    fn apply_draft(&mut self, draft: &PromotionDraft) {
        self.codigo = draft.codigo.clone();
        self.descripcion = draft.descripcion.clone();
        self.tipo = draft.tipo;
        self.valor = draft.valor;
        self.fecha_inicio = draft.fecha_inicio;
        self.fecha_fin = draft.fecha_fin;
        self.usos_maximos = draft.usos_maximos;
        self.activa = draft.activa;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn promo() -> Promotion {
        Promotion::from_draft(
            EntityId::from("pr1"),
            &PromotionDraft {
                codigo: "FERRE10".into(),
                descripcion: String::new(),
                tipo: DiscountKind::Porcentaje,
                valor: 10.0,
                fecha_inicio: date("2026-03-01"),
                fecha_fin: date("2026-03-31"),
                usos_maximos: Some(5),
                activa: true,
            },
        )
    }

    #[test]
    fn status_follows_calendar() {
        let p = promo();
        assert_eq!(p.status_at(date("2026-02-28")), PromotionStatus::Programada);
        assert_eq!(p.status_at(date("2026-03-01")), PromotionStatus::Vigente);
        assert_eq!(p.status_at(date("2026-03-31")), PromotionStatus::Vigente);
        assert_eq!(p.status_at(date("2026-04-01")), PromotionStatus::Expirada);
    }

    #[test]
    fn inactive_and_exhausted_win_over_dates() {
        let mut p = promo();
        p.usos = 5;
        assert_eq!(p.status_at(date("2026-03-10")), PromotionStatus::Agotada);
        assert_eq!(p.remaining_uses(), Some(0));
        p.activa = false;
        assert_eq!(p.status_at(date("2026-03-10")), PromotionStatus::Inactiva);
    }

    #[test]
    fn discount_never_exceeds_amount() {
        let mut p = promo();
        assert_eq!(p.discount_for(50_000.0), 5_000.0);
        p.tipo = DiscountKind::MontoFijo;
        p.valor = 80_000.0;
        assert_eq!(p.discount_for(50_000.0), 50_000.0);
    }
}
