//! Dashboard Overview
//!
//! Loads every collection at once and shows each page's summary cards.

use std::sync::Arc;

use crate::components::{StatFormat, render_stats};
use crate::domain::{Client, Product, Promotion, Sale, User};
use crate::error::Result;
use crate::i18n::{Locale, t};
use crate::services::{EntityStore, ServiceAction, ServiceEvent, ServiceHub};
use crate::view::{Stats, derive_view};

use super::Page;

/// One store per page. `users` is `None` for accounts that may not see it.
#[derive(Clone)]
pub struct DashboardStores {
    pub products: Arc<dyn EntityStore<Product>>,
    pub clients: Arc<dyn EntityStore<Client>>,
    pub sales: Arc<dyn EntityStore<Sale>>,
    pub promotions: Arc<dyn EntityStore<Promotion>>,
    pub users: Option<Arc<dyn EntityStore<User>>>,
}

/// Headline numbers for one page
#[derive(Clone)]
pub struct PageSummary {
    pub title_key: &'static str,
    pub stats: Stats,
    /// Set when the collection failed to load
    pub error: Option<Arc<str>>,
    format: fn(&str) -> StatFormat,
}

impl std::fmt::Debug for PageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSummary")
            .field("title_key", &self.title_key)
            .field("stats", &self.stats)
            .field("error", &self.error)
            .finish()
    }
}

impl PageSummary {
    pub fn is_loaded(&self) -> bool {
        self.error.is_none()
    }

    pub fn render(&self, locale: Locale) -> String {
        let mut out = format!("== {} ==\n", t(locale, self.title_key));
        match &self.error {
            Some(message) => {
                out.push_str(message);
                out.push('\n');
            }
            None => out.push_str(&render_stats(&self.stats, self.format, locale)),
        }
        out
    }
}

fn summarize<T: Page>(result: Result<Vec<T>>, hub: &ServiceHub) -> PageSummary {
    let (stats, error) = match result {
        Ok(items) => {
            hub.emit(ServiceEvent::Loaded {
                entity: T::LABEL,
                count: items.len(),
            });
            let config = T::view_config();
            let view = derive_view(&items, &config.initial_state(), &config);
            (view.stats, None)
        }
        Err(e) => {
            tracing::warn!(entity = T::LABEL, error = %e, "Dashboard load failed");
            hub.emit(ServiceEvent::failed(T::LABEL, ServiceAction::Load, &e));
            (Stats::default(), Some(Arc::from(e.to_string())))
        }
    };
    PageSummary {
        title_key: T::TITLE_KEY,
        stats,
        error,
        format: T::stat_format,
    }
}

/// The overview shown after sign-in
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub pages: Vec<PageSummary>,
}

impl Dashboard {
    /// Fetch all collections concurrently. A failing page does not stop the
    /// others from loading.
    pub async fn load(stores: &DashboardStores, hub: &ServiceHub) -> Self {
        let users = async {
            match &stores.users {
                Some(store) => Some(store.fetch_all().await),
                None => None,
            }
        };
        let (products, clients, sales, promotions, users) = futures::join!(
            stores.products.fetch_all(),
            stores.clients.fetch_all(),
            stores.sales.fetch_all(),
            stores.promotions.fetch_all(),
            users,
        );

        let mut pages = vec![
            summarize(products, hub),
            summarize(clients, hub),
            summarize(sales, hub),
            summarize(promotions, hub),
        ];
        if let Some(users) = users {
            pages.push(summarize(users, hub));
        }
        tracing::info!(pages = pages.len(), "Dashboard loaded");
        Self { pages }
    }

    pub fn page(&self, title_key: &str) -> Option<&PageSummary> {
        self.pages.iter().find(|p| p.title_key == title_key)
    }

    pub fn render(&self, locale: Locale) -> String {
        self.pages
            .iter()
            .map(|p| p.render(locale))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityId, UserDraft};
    use crate::error::Error;
    use crate::services::{MemoryStore, demo};
    use async_trait::async_trait;

    struct Offline;

    #[async_trait]
    impl EntityStore<User> for Offline {
        async fn fetch_all(&self) -> Result<Vec<User>> {
            Err(Error::Backend {
                status: 503,
                message: "unavailable".into(),
            })
        }

        async fn create(&self, _draft: &UserDraft) -> Result<User> {
            unreachable!()
        }

        async fn update(&self, _id: &EntityId, _draft: &UserDraft) -> Result<User> {
            unreachable!()
        }

        async fn remove(&self, _id: &EntityId) -> Result<()> {
            unreachable!()
        }
    }

    fn stores(users: Option<Arc<dyn EntityStore<User>>>) -> DashboardStores {
        let products = demo::products();
        let clients = demo::clients();
        DashboardStores {
            sales: Arc::new(MemoryStore::with_rows(demo::sales(&products, &clients))),
            products: Arc::new(MemoryStore::with_rows(products)),
            clients: Arc::new(MemoryStore::with_rows(clients)),
            promotions: Arc::new(MemoryStore::with_rows(demo::promotions())),
            users,
        }
    }

    #[tokio::test]
    async fn loads_every_page() {
        let hub = ServiceHub::new();
        let users: Arc<dyn EntityStore<User>> = Arc::new(MemoryStore::with_rows(demo::users()));
        let dashboard = Dashboard::load(&stores(Some(users)), &hub).await;

        assert_eq!(dashboard.pages.len(), 5);
        assert!(dashboard.pages.iter().all(PageSummary::is_loaded));
        assert_eq!(dashboard.page("route-products").unwrap().stats.get("total"), 12.0);
        assert_eq!(dashboard.page("route-clients").unwrap().stats.get("total"), 25.0);
        assert_eq!(hub.drain().len(), 5);

        let text = dashboard.render(Locale::En);
        assert!(text.contains("== Products =="));
        assert!(text.contains("Inventory value: $"));
    }

    #[tokio::test]
    async fn one_failure_does_not_hide_the_rest() {
        let hub = ServiceHub::new();
        let offline: Arc<dyn EntityStore<User>> = Arc::new(Offline);
        let dashboard = Dashboard::load(&stores(Some(offline)), &hub).await;

        let users = dashboard.page("route-users").unwrap();
        assert!(!users.is_loaded());
        assert!(dashboard.page("route-sales").unwrap().is_loaded());
        assert_eq!(hub.drain().iter().filter(|e| e.is_failure()).count(), 1);
    }

    #[tokio::test]
    async fn users_are_skipped_without_a_store() {
        let dashboard = Dashboard::load(&stores(None), &ServiceHub::new()).await;
        assert_eq!(dashboard.pages.len(), 4);
        assert!(dashboard.page("route-users").is_none());
    }
}
