//! Products Page
//!
//! Inventory list with stock-level filters and image upload.

use std::sync::Arc;

use crate::components::{Column, StatFormat};
use crate::domain::{EntityId, EntityStatus, Product, ProductDraft, StockLevel};
use crate::error::{Error, Result};
use crate::i18n::t;
use crate::services::{EntityStore, ObjectStorage, ServiceAction, ServiceEvent, image_key};
use crate::utils::format::format_status;
use crate::view::{SortSpec, ViewConfig, filter, stats};

use super::{ListController, Page};

impl Page for Product {
    const TITLE_KEY: &'static str = "route-products";

    fn view_config() -> ViewConfig<Self> {
        ViewConfig::new()
            .searchable(&["codigo", "nombre", "categoria", "descripcion"])
            .filter("categoria", filter::equals("categoria"))
            .filter("estado", filter::equals("estado"))
            .filter("nivel_stock", filter::equals("nivel_stock"))
            .filter("precio_min", filter::at_least("precio"))
            .filter("precio_max", filter::at_most("precio"))
            .stat("total", stats::count())
            .stat("active", stats::count_where(|p: &Product| p.estado == EntityStatus::Activo))
            .stat(
                "low-stock",
                stats::count_where(|p: &Product| p.stock_level() == StockLevel::Bajo),
            )
            .stat(
                "out-of-stock",
                stats::count_where(|p: &Product| p.stock_level() == StockLevel::Agotado),
            )
            .stat("inventory-value", stats::sum("valor_inventario"))
            .default_sort(SortSpec::asc("nombre"))
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::field("codigo", "col-code").fixed_width(8),
            Column::field("nombre", "col-name").fixed_width(24),
            Column::field("categoria", "col-category").fixed_width(14),
            Column::currency("precio", "col-price").fixed_width(10),
            Column::field("stock", "col-stock").fixed_width(6).align_right(),
            Column::new("nivel_stock", "col-stock-level", |p: &Product, locale| {
                t(locale, &format!("stock-{}", p.stock_level().as_str())).to_string()
            })
            .fixed_width(11),
            Column::new("estado", "col-status", |p: &Product, locale| {
                format_status(p.estado.as_str(), locale)
            })
            .fixed_width(9),
        ]
    }

    fn stat_format(name: &str) -> StatFormat {
        match name {
            "inventory-value" => StatFormat::Currency,
            _ => StatFormat::Count,
        }
    }
}

impl<S: EntityStore<Product>> ListController<Product, S> {
    /// Store an image for `id` and point the product at it
    pub async fn upload_image(
        &mut self,
        id: &EntityId,
        file_name: &str,
        bytes: Vec<u8>,
        storage: &dyn ObjectStorage,
    ) -> Result<String> {
        let product = self
            .state()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                entity: "Product",
                id: id.to_string(),
            })?;

        let result = async {
            let url = storage.upload(&image_key(id, file_name), bytes).await?;
            let draft = ProductDraft {
                imagen_url: Some(url.clone()),
                ..ProductDraft::from(&product)
            };
            let saved = self.store().update(id, &draft).await?;
            Ok::<_, Error>((url, saved))
        }
        .await;

        match result {
            Ok((url, saved)) => {
                self.replace(saved);
                self.emit(ServiceEvent::ImageUploaded {
                    product: id.clone(),
                    url: Arc::from(url.as_str()),
                });
                Ok(url)
            }
            Err(e) => {
                self.report(ServiceAction::Upload, &e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MemoryStorage, MemoryStore, ServiceHub, demo};
    use crate::view::{ViewState, derive_view};

    fn products() -> Vec<Product> {
        demo::products()
    }

    #[test]
    fn stock_filter_and_stats() {
        let items = products();
        let config = Product::view_config();
        let mut state = config.initial_state();
        state.set_filter("nivel_stock", "agotado");

        let view = derive_view(&items, &state, &config);
        assert_eq!(view.total_count, 2);
        assert_eq!(view.stats.get("out-of-stock"), 2.0);
        assert_eq!(view.stats.get("inventory-value"), 0.0);
    }

    #[test]
    fn default_sort_is_by_name() {
        let items = products();
        let config = Product::view_config();
        let view = derive_view(&items, &config.initial_state(), &config);
        assert_eq!(view.page_items[0].nombre, "Cemento gris 50kg");
    }

    #[test]
    fn price_range_filters_combine() {
        let items = products();
        let config = Product::view_config();
        let mut state = ViewState::default();
        state.set_filter("precio_min", "30000");
        state.set_filter("precio_max", "70000");

        let view = derive_view(&items, &state, &config);
        let codes: Vec<&str> = view.filtered.iter().map(|p| p.codigo.as_str()).collect();
        assert_eq!(codes, ["HM-001", "HM-003", "PI-001", "CO-001"]);
    }

    #[test]
    fn category_filter_folds_accents_like_search() {
        let mut items = products();
        for p in items.iter_mut().filter(|p| p.categoria == "electricas") {
            p.categoria = "Eléctricos".to_string();
        }
        let config = Product::view_config();

        let mut searched = ViewState::default();
        searched.set_search("ELÉCTRICOS");
        let mut filtered = ViewState::default();
        filtered.set_filter("categoria", "ELÉCTRICOS");

        let by_search = derive_view(&items, &searched, &config).total_count;
        let by_filter = derive_view(&items, &filtered, &config).total_count;
        assert_eq!(by_search, 2);
        assert_eq!(by_filter, by_search);
    }

    #[tokio::test]
    async fn upload_links_the_image() {
        let hub = ServiceHub::new();
        let mut controller = ListController::new(MemoryStore::with_rows(products()), hub.clone());
        controller.refresh().await.unwrap();
        let storage = MemoryStorage::new();

        let id = EntityId::from("prod-01");
        let url = controller
            .upload_image(&id, "martillo.PNG", vec![0; 64], &storage)
            .await
            .unwrap();

        assert!(url.starts_with("memory://prod-01/"));
        assert_eq!(controller.state().get(&id).unwrap().imagen_url.as_deref(), Some(url.as_str()));
        assert!(matches!(hub.drain().last(), Some(ServiceEvent::ImageUploaded { .. })));
    }

    #[tokio::test]
    async fn rejected_upload_leaves_product_alone() {
        let hub = ServiceHub::new();
        let mut controller = ListController::new(MemoryStore::with_rows(products()), hub.clone());
        controller.refresh().await.unwrap();

        let id = EntityId::from("prod-01");
        let err = controller
            .upload_image(&id, "notes.txt", vec![1, 2, 3], &MemoryStorage::new())
            .await;
        assert!(matches!(err, Err(Error::Invalid { .. })));
        assert!(controller.state().get(&id).unwrap().imagen_url.is_none());
        assert!(hub.drain().last().is_some_and(ServiceEvent::is_failure));
    }
}
