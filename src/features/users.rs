//! Users Page

use crate::components::Column;
use crate::domain::User;
use crate::utils::format::{format_datetime, format_status};
use crate::view::{SortSpec, ViewConfig, filter, stats};

use super::Page;

impl Page for User {
    const TITLE_KEY: &'static str = "route-users";

    fn view_config() -> ViewConfig<Self> {
        ViewConfig::new()
            .searchable(&["nombre", "email"])
            .filter("rol", filter::equals("rol"))
            .filter("estado", filter::equals("estado"))
            .stat("total", stats::count())
            .stat("active", stats::count_where(|u: &User| u.activo))
            .stat("admins", stats::count_where(User::is_admin))
            .default_sort(SortSpec::asc("nombre"))
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::field("nombre", "col-name").fixed_width(20),
            Column::field("email", "col-email").fixed_width(24),
            Column::new("rol", "col-role", |u: &User, _| u.rol.to_string()).fixed_width(10),
            Column::new("estado", "col-status", |u: &User, locale| {
                format_status(if u.activo { "activo" } else { "inactivo" }, locale)
            })
            .fixed_width(9),
            Column::new("ultimo_acceso", "col-last-access", |u: &User, _| {
                u.ultimo_acceso
                    .as_ref()
                    .map(format_datetime)
                    .unwrap_or_else(|| "-".to_string())
            })
            .fixed_width(16),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::demo;
    use crate::view::derive_view;

    #[test]
    fn role_and_status_filters() {
        let items = demo::users();
        let config = User::view_config();
        let mut state = config.initial_state();
        state.set_filter("rol", "VENDEDOR");

        let view = derive_view(&items, &state, &config);
        assert_eq!(view.total_count, 2);
        assert_eq!(view.stats.get("active"), 1.0);

        state.set_filter("estado", "activo");
        let view = derive_view(&items, &state, &config);
        assert_eq!(view.page_items[0].email, "laura@ferremarket.co");
    }

    #[test]
    fn never_signed_in_sorts_first() {
        let items = demo::users();
        let config = User::view_config();
        let mut state = config.initial_state();
        state.toggle_sort("ultimo_acceso");

        let view = derive_view(&items, &state, &config);
        assert!(view.page_items[0].ultimo_acceso.is_none());
        assert_eq!(view.stats.get("admins"), 1.0);
    }
}
