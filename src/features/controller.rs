//! List Controller
//!
//! Drives one management page: loads the collection from its store, applies
//! modal saves and deletes, and forwards user input to the view state.
//! Every outcome is reported on the service hub.

use crate::domain::EntityId;
use crate::error::Result;
use crate::services::{EntityStore, ServiceAction, ServiceEvent, ServiceHub};
use crate::state::{ListState, LoadState};
use crate::validation::Validate;
use crate::view::{DerivedView, SortSpec, ViewConfig, ViewState, derive_view};

use super::Page;

/// Generic page controller over any entity store
pub struct ListController<T: Page, S> {
    store: S,
    config: ViewConfig<T>,
    state: ListState<T>,
    hub: ServiceHub,
}

impl<T: Page, S: EntityStore<T>> ListController<T, S> {
    pub fn new(store: S, hub: ServiceHub) -> Self {
        let config = T::view_config();
        let state = ListState::new(config.initial_state());
        Self {
            store,
            config,
            state,
            hub,
        }
    }

    /// Start with a configured page size instead of the page default
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.state.view_mut().set_page_size(size);
        self
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn config(&self) -> &ViewConfig<T> {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view_state(&self) -> &ViewState {
        self.state.view()
    }

    pub fn load_state(&self) -> &LoadState {
        self.state.load_state()
    }

    /// Derive what the page shows right now
    pub fn view(&self) -> DerivedView<'_, T> {
        derive_view(self.state.items(), self.state.view(), &self.config)
    }

    fn page_count(&self) -> usize {
        self.view().page_count
    }

    fn clamp_page(&mut self) {
        let pages = self.page_count();
        self.state.view_mut().clamp_page(pages);
    }

    pub(super) fn emit(&self, event: ServiceEvent) {
        self.hub.emit(event);
    }

    pub(super) fn report(&self, action: ServiceAction, error: &crate::error::Error) {
        tracing::warn!(entity = T::LABEL, action = action.as_str(), error = %error, "Request failed");
        self.hub.emit(ServiceEvent::failed(T::LABEL, action, error));
    }

    /// Swap in a record the store returned
    pub(super) fn replace(&mut self, record: T) {
        self.state.upsert(record);
        self.clamp_page();
    }

    // ==================== Store ====================

    /// Reload the collection. On failure the previous rows stay visible.
    pub async fn refresh(&mut self) -> Result<()> {
        self.state.set_loading();
        match self.store.fetch_all().await {
            Ok(items) => {
                let count = items.len();
                self.state.set_items(items);
                self.clamp_page();
                tracing::debug!(entity = T::LABEL, count, "Loaded collection");
                self.hub.emit(ServiceEvent::Loaded {
                    entity: T::LABEL,
                    count,
                });
                Ok(())
            }
            Err(e) => {
                self.state.set_error(e.to_string());
                self.report(ServiceAction::Load, &e);
                Err(e)
            }
        }
    }

    /// Remove `id` from the backend and from the page
    pub async fn delete(&mut self, id: &EntityId) -> Result<()> {
        if let Err(e) = self.store.remove(id).await {
            self.report(ServiceAction::Delete, &e);
            return Err(e);
        }
        self.state.remove(std::slice::from_ref(id));
        self.clamp_page();
        self.hub.emit(ServiceEvent::Deleted {
            entity: T::LABEL,
            ids: vec![id.clone()],
        });
        Ok(())
    }

    /// Delete every selected record that still exists, one call each.
    ///
    /// Stops at the first failure; records deleted before it stay deleted.
    pub async fn delete_selected(&mut self) -> Result<usize> {
        let ids = self.state.view().selection.selected_in(self.state.items());
        let mut deleted = Vec::with_capacity(ids.len());
        let mut failure = None;

        for id in ids {
            match self.store.remove(&id).await {
                Ok(()) => deleted.push(id),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if !deleted.is_empty() {
            self.state.remove(&deleted);
            self.clamp_page();
            self.hub.emit(ServiceEvent::Deleted {
                entity: T::LABEL,
                ids: deleted.clone(),
            });
        }

        match failure {
            Some(e) => {
                self.report(ServiceAction::Delete, &e);
                Err(e)
            }
            None => {
                self.state.view_mut().clear_selection();
                Ok(deleted.len())
            }
        }
    }

    // ==================== View State ====================

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.state.view_mut().set_search(text);
        self.clamp_page();
    }

    pub fn set_filter(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.state.view_mut().set_filter(id, value);
        self.clamp_page();
    }

    pub fn clear_filter(&mut self, id: &str) {
        self.state.view_mut().clear_filter(id);
        self.clamp_page();
    }

    pub fn clear_filters(&mut self) {
        self.state.view_mut().clear_filters();
        self.clamp_page();
    }

    pub fn toggle_sort(&mut self, field: &str) {
        self.state.view_mut().toggle_sort(field);
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.state.view_mut().set_sort(sort);
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.state.view_mut().set_page_size(size);
    }

    pub fn next_page(&mut self) {
        let pages = self.page_count();
        self.state.view_mut().next_page(pages);
    }

    pub fn previous_page(&mut self) {
        self.state.view_mut().previous_page();
    }

    pub fn go_to_page(&mut self, index: usize) {
        let pages = self.page_count();
        self.state.view_mut().go_to_page(index, pages);
    }

    pub fn toggle_selection(&mut self, id: EntityId) {
        self.state.view_mut().toggle_selection(id);
    }

    /// Header checkbox: select or clear the rows on the current page
    pub fn toggle_all_visible(&mut self) {
        let visible = self.view().visible_ids();
        self.state.view_mut().toggle_all_visible(&visible);
    }

    pub fn clear_selection(&mut self) {
        self.state.view_mut().clear_selection();
    }
}

impl<T, S> ListController<T, S>
where
    T: Page,
    T::Draft: Validate<T>,
    S: EntityStore<T>,
{
    /// Validate and insert a new record
    pub async fn create(&mut self, draft: T::Draft) -> Result<EntityId> {
        draft.validate(self.state.items(), None).into_result()?;

        match self.store.create(&draft).await {
            Ok(record) => {
                let id = record.id();
                self.state.upsert(record);
                self.clamp_page();
                self.hub.emit(ServiceEvent::Saved {
                    entity: T::LABEL,
                    id: id.clone(),
                    created: true,
                });
                Ok(id)
            }
            Err(e) => {
                self.report(ServiceAction::Create, &e);
                Err(e)
            }
        }
    }

    /// Validate and save changes to `id`
    pub async fn update(&mut self, id: &EntityId, draft: T::Draft) -> Result<()> {
        draft.validate(self.state.items(), Some(id)).into_result()?;

        match self.store.update(id, &draft).await {
            Ok(record) => {
                self.state.upsert(record);
                self.clamp_page();
                self.hub.emit(ServiceEvent::Saved {
                    entity: T::LABEL,
                    id: id.clone(),
                    created: false,
                });
                Ok(())
            }
            Err(e) => {
                self.report(ServiceAction::Update, &e);
                Err(e)
            }
        }
    }
}
