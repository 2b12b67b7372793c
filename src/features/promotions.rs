//! Promotions Page
//!
//! Promotion status is derived from a reference date. The page config pins
//! that date when it is built, so one config always classifies rows the same
//! way.

use chrono::{NaiveDate, Utc};

use crate::components::Column;
use crate::domain::{DiscountKind, Promotion, PromotionStatus};
use crate::i18n::Locale;
use crate::utils::format::{format_currency, format_date, format_number, format_percent, format_status};
use crate::view::{Aggregator, SortSpec, ViewConfig, eq_fold, filter, stats};

use super::Page;

fn status_count(status: PromotionStatus, today: NaiveDate) -> Aggregator<Promotion> {
    stats::count_where(move |p: &Promotion| p.status_at(today) == status)
}

impl Promotion {
    /// Page config with status filters and cards evaluated on `today`
    pub fn view_config_on(today: NaiveDate) -> ViewConfig<Self> {
        ViewConfig::new()
            .searchable(&["codigo", "descripcion"])
            .filter("tipo", filter::equals("tipo"))
            .filter("estado", move |p: &Promotion, value: &str| {
                eq_fold(p.status_at(today).as_str(), value.trim())
            })
            .filter("activa", filter::equals("activa"))
            .stat("total", stats::count())
            .stat("current", status_count(PromotionStatus::Vigente, today))
            .stat("scheduled", status_count(PromotionStatus::Programada, today))
            .stat("expired", status_count(PromotionStatus::Expirada, today))
            .stat("redemptions", stats::sum("usos"))
            .default_sort(SortSpec::desc("fecha_inicio"))
    }
}

fn value_text(p: &Promotion, locale: Locale) -> String {
    match p.tipo {
        DiscountKind::Porcentaje => format_percent(p.valor, locale),
        DiscountKind::MontoFijo => format_currency(p.valor, locale),
    }
}

fn uses_text(p: &Promotion, locale: Locale) -> String {
    match p.usos_maximos {
        Some(max) => format!("{}/{}", format_number(p.usos, locale), format_number(max, locale)),
        None => format_number(p.usos, locale),
    }
}

impl Page for Promotion {
    const TITLE_KEY: &'static str = "route-promotions";

    fn view_config() -> ViewConfig<Self> {
        Self::view_config_on(Utc::now().date_naive())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::field("codigo", "col-code").fixed_width(12),
            Column::new("tipo", "col-type", |p: &Promotion, _| p.tipo.to_string()).fixed_width(11),
            Column::new("valor", "col-value", value_text).fixed_width(9).align_right(),
            Column::new("fecha_inicio", "col-valid-from", |p: &Promotion, locale| {
                format_date(&p.fecha_inicio, locale)
            })
            .fixed_width(10),
            Column::new("fecha_fin", "col-valid-to", |p: &Promotion, locale| {
                format_date(&p.fecha_fin, locale)
            })
            .fixed_width(10),
            Column::new("usos", "col-uses", uses_text).fixed_width(9).align_right(),
            Column::new("estado", "col-status", |p: &Promotion, locale| {
                format_status(p.status_at(Utc::now().date_naive()).as_str(), locale)
            })
            .fixed_width(11),
        ]
    }
}
