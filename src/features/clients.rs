//! Clients Page

use crate::components::{Column, StatFormat};
use crate::domain::{CLIENT_SEGMENTS, Client, EntityStatus};
use crate::i18n::t;
use crate::view::{SortSpec, ViewConfig, filter, stats};

use super::Page;

impl Page for Client {
    const TITLE_KEY: &'static str = "route-clients";

    fn view_config() -> ViewConfig<Self> {
        ViewConfig::new()
            .searchable(&["nombre", "documento", "email", "telefono"])
            .filter("estado", filter::equals("estado"))
            .filter("segmento", filter::bucket(&CLIENT_SEGMENTS))
            .filter("compras_min", filter::at_least("compras"))
            .stat("total", stats::count())
            .stat("active", stats::count_where(|c: &Client| c.estado == EntityStatus::Activo))
            .stat("segment", stats::group_count("segmento"))
            .stat("total-spent", stats::sum("total_gastado"))
            .default_sort(SortSpec::asc("nombre"))
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::field("nombre", "col-name").fixed_width(20),
            Column::field("documento", "col-document").fixed_width(11),
            Column::field("email", "col-email").fixed_width(22),
            Column::field("telefono", "col-phone").fixed_width(16),
            Column::field("compras", "col-purchases").fixed_width(7).align_right(),
            Column::new("segmento", "col-segment", |c: &Client, locale| {
                c.segment()
                    .and_then(|id| CLIENT_SEGMENTS.bucket(id))
                    .map(|b| t(locale, b.label_key).to_string())
                    .unwrap_or_else(|| "-".to_string())
            })
            .fixed_width(10),
            Column::currency("total_gastado", "col-total-spent").fixed_width(12),
        ]
    }

    fn stat_format(name: &str) -> StatFormat {
        match name {
            "total-spent" => StatFormat::Currency,
            _ => StatFormat::Count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::demo;
    use crate::view::derive_view;

    #[test]
    fn segment_stats_cover_the_filtered_set() {
        let items = demo::clients();
        let config = Client::view_config();
        let view = derive_view(&items, &config.initial_state(), &config);

        let by_segment: f64 = ["frecuente", "regular", "nuevo"]
            .iter()
            .map(|s| view.stats.get(&format!("segment.{s}")))
            .sum();
        assert_eq!(by_segment, view.stats.get("total"));
        assert!(view.stats.get("segment.frecuente") > 0.0);
    }

    #[test]
    fn segment_filter_uses_the_rule_table() {
        let items = demo::clients();
        let config = Client::view_config();
        let mut state = config.initial_state();
        state.set_filter("segmento", "frecuente");

        let view = derive_view(&items, &state, &config);
        assert!(view.total_count > 0);
        assert!(view.filtered.iter().all(|c| c.compras >= 10));
        assert_eq!(view.stats.get("segment.frecuente"), view.total_count as f64);
        assert!(!view.stats.contains("segment.nuevo"));
    }

    #[test]
    fn unknown_segment_matches_nothing() {
        let items = demo::clients();
        let config = Client::view_config();
        let mut state = config.initial_state();
        state.set_filter("segmento", "vip");
        assert!(derive_view(&items, &state, &config).is_empty());
    }
}
