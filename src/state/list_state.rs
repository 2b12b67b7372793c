//! ListState - One Management Page
//!
//! The loaded collection, its view state and where loading stands.

use std::sync::Arc;

use crate::domain::{Entity, EntityId};
use crate::view::ViewState;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(Arc<str>),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// State for rendering one entity collection as a paginated table
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    view: ViewState,
    load_state: LoadState,
}

impl<T: Entity> ListState<T> {
    pub fn new(view: ViewState) -> Self {
        Self {
            items: Vec::new(),
            view,
            load_state: LoadState::Idle,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn set_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Replace the collection after a fetch. The view state is kept.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.load_state = LoadState::Ready;
    }

    /// Keep the old rows visible; only the status changes
    pub fn set_error(&mut self, message: impl Into<Arc<str>>) {
        self.load_state = LoadState::Error(message.into());
    }

    /// Replace the row with the same id, or append
    pub fn upsert(&mut self, item: T) {
        let id = item.id();
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, ids: &[EntityId]) {
        self.items.retain(|item| !ids.contains(&item.id()));
    }

    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.items.iter().find(|item| &item.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, i64);

    impl Entity for Row {
        fn id(&self) -> EntityId {
            EntityId::from(self.0)
        }

        fn field(&self, _name: &str) -> FieldValue {
            self.1.into()
        }
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut state = ListState::new(ViewState::default());
        state.set_items(vec![Row("a", 1), Row("b", 2)]);
        state.upsert(Row("a", 10));
        state.upsert(Row("c", 3));
        assert_eq!(state.items(), &[Row("a", 10), Row("b", 2), Row("c", 3)]);

        state.remove(&[EntityId::from("b")]);
        assert_eq!(state.items().len(), 2);
        assert!(state.get(&EntityId::from("b")).is_none());
    }

    #[test]
    fn error_keeps_rows() {
        let mut state = ListState::new(ViewState::default());
        state.set_items(vec![Row("a", 1)]);
        state.set_error("timeout");
        assert_eq!(state.load_state().error(), Some("timeout"));
        assert_eq!(state.items().len(), 1);
    }
}
