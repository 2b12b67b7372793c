//! Sales Page

use std::sync::Arc;

use crate::components::{Column, StatFormat};
use crate::domain::{Sale, SaleStatus};
use crate::utils::format::{format_datetime, format_status};
use crate::view::{Aggregator, SortSpec, ViewConfig, filter, stats};

use super::Page;

/// Revenue over non-voided sales; zero when there are none
fn average_ticket() -> Aggregator<Sale> {
    Aggregator::Single(Arc::new(|items: &[&Sale]| {
        let counted: Vec<f64> = items
            .iter()
            .filter(|s| s.estado != SaleStatus::Anulada)
            .map(|s| s.total)
            .collect();
        if counted.is_empty() {
            0.0
        } else {
            counted.iter().sum::<f64>() / counted.len() as f64
        }
    }))
}

impl Page for Sale {
    const TITLE_KEY: &'static str = "route-sales";

    fn view_config() -> ViewConfig<Self> {
        ViewConfig::new()
            .searchable(&["id", "cliente_nombre", "metodo_pago"])
            .filter("estado", filter::equals("estado"))
            .filter("metodo_pago", filter::equals("metodo_pago"))
            .filter("cliente_id", filter::equals("cliente_id"))
            .filter("total_min", filter::at_least("total"))
            .stat("total", stats::count())
            .stat("revenue", stats::sum_by(Sale::revenue))
            .stat("units", stats::sum("unidades"))
            .stat("average-ticket", average_ticket())
            .stat(
                "pending",
                stats::count_where(|s: &Sale| s.estado == SaleStatus::Pendiente),
            )
            .default_sort(SortSpec::desc("fecha"))
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::field("id", "col-id").fixed_width(8),
            Column::new("fecha", "col-date", |s: &Sale, _| format_datetime(&s.fecha)).fixed_width(16),
            Column::field("cliente_nombre", "col-client").fixed_width(20),
            Column::field("unidades", "col-units").fixed_width(6).align_right(),
            Column::currency("total", "col-total").fixed_width(11),
            Column::new("metodo_pago", "col-payment", |s: &Sale, _| s.metodo_pago.to_string())
                .fixed_width(13),
            Column::new("estado", "col-status", |s: &Sale, locale| {
                format_status(s.estado.as_str(), locale)
            })
            .fixed_width(11),
        ]
    }

    fn stat_format(name: &str) -> StatFormat {
        match name {
            "revenue" | "average-ticket" => StatFormat::Currency,
            _ => StatFormat::Count,
        }
    }
}
