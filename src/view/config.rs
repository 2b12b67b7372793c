//! ViewConfig - per-entity knobs for the list-view engine.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use super::filter::FilterFn;
use super::state::{SortSpec, ViewState};
use super::stats::Aggregator;
use crate::constants::DEFAULT_PAGE_SIZE;

/// Searchable fields, named filters, summary stats and defaults for one page
pub struct ViewConfig<T> {
    pub(crate) searchable_fields: Vec<&'static str>,
    pub(crate) filters: AHashMap<&'static str, FilterFn<T>>,
    pub(crate) stats: Vec<(&'static str, Aggregator<T>)>,
    default_sort: Option<SortSpec>,
    default_page_size: usize,
}

impl<T> ViewConfig<T> {
    pub fn new() -> Self {
        Self {
            searchable_fields: Vec::new(),
            filters: AHashMap::new(),
            stats: Vec::new(),
            default_sort: None,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Fields matched by the free-text search box
    pub fn searchable(mut self, fields: &[&'static str]) -> Self {
        self.searchable_fields.extend_from_slice(fields);
        self
    }

    /// Register a named filter predicate
    pub fn filter(
        mut self,
        id: &'static str,
        predicate: impl Fn(&T, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filters.insert(id, Arc::new(predicate));
        self
    }

    /// Register a summary stat; stats keep registration order
    pub fn stat(mut self, name: &'static str, aggregator: Aggregator<T>) -> Self {
        self.stats.push((name, aggregator));
        self
    }

    pub fn default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = Some(sort);
        self
    }

    pub fn default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    pub fn searchable_fields(&self) -> &[&'static str] {
        &self.searchable_fields
    }

    pub fn has_filter(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    /// Registered filter ids, sorted
    pub fn filter_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.filters.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn stat_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stats.iter().map(|(name, _)| *name)
    }

    /// Fresh state for a page that just mounted
    pub fn initial_state(&self) -> ViewState {
        ViewState::new(self.default_sort.clone(), self.default_page_size)
    }
}

impl<T> Default for ViewConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ViewConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewConfig")
            .field("searchable_fields", &self.searchable_fields)
            .field("filters", &self.filter_ids())
            .field("stats", &self.stat_names().collect::<Vec<_>>())
            .field("default_sort", &self.default_sort)
            .field("default_page_size", &self.default_page_size)
            .finish()
    }
}
