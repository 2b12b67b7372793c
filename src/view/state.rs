//! ViewState - page-owned search, filter, sort, page and selection.
//!
//! The engine only reads this; the page mutates it through the methods here
//! in response to user input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::constants::DEFAULT_PAGE_SIZE;
use crate::domain::EntityId;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Field plus direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Zero-based page index and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub index: usize,
    pub size: usize,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            index: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Everything the user has dialed into a list page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub search_text: String,
    /// Filter id -> raw value; empty values are inactive
    pub field_filters: BTreeMap<String, String>,
    /// `None` keeps the collection order
    pub sort: Option<SortSpec>,
    pub page: PageSpec,
    pub selection: Selection,
}

impl ViewState {
    pub fn new(sort: Option<SortSpec>, page_size: usize) -> Self {
        Self {
            sort,
            page: PageSpec {
                index: 0,
                size: page_size.max(1),
            },
            ..Self::default()
        }
    }

    // ==================== Search / Filters ====================

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Set a filter value; an empty value clears the filter
    pub fn set_filter(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.field_filters.remove(&id);
        } else {
            self.field_filters.insert(id, value);
        }
    }

    pub fn clear_filter(&mut self, id: &str) {
        self.field_filters.remove(id);
    }

    /// Drop search text and every field filter
    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.field_filters.clear();
    }

    /// Filters whose value is non-blank
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.field_filters
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }

    // ==================== Sort ====================

    /// Same field flips direction, a new field starts ascending
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.field == field => SortSpec {
                direction: current.direction.flipped(),
                ..current
            },
            _ => SortSpec::asc(field),
        });
    }

    /// Replace the sort outright; `None` restores collection order
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    // ==================== Pagination ====================

    /// Changing the size always returns to the first page
    pub fn set_page_size(&mut self, size: usize) {
        self.page.size = size.max(1);
        self.page.index = 0;
    }

    pub fn next_page(&mut self, page_count: usize) {
        if self.page.index + 1 < page_count.max(1) {
            self.page.index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page.index = self.page.index.saturating_sub(1);
    }

    pub fn go_to_page(&mut self, index: usize, page_count: usize) {
        self.page.index = index.min(page_count.max(1) - 1);
    }

    /// Pull the index back in range after the result set shrank
    pub fn clamp_page(&mut self, page_count: usize) {
        self.page.index = self.page.index.min(page_count.max(1) - 1);
    }

    // ==================== Selection ====================

    pub fn toggle_selection(&mut self, id: EntityId) {
        self.selection.toggle(id);
    }

    pub fn toggle_all_visible(&mut self, visible: &[EntityId]) {
        self.selection.toggle_all(visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_sort_flips_then_resets() {
        let mut state = ViewState::default();
        state.toggle_sort("stock");
        assert_eq!(state.sort, Some(SortSpec::asc("stock")));
        state.toggle_sort("stock");
        assert_eq!(state.sort, Some(SortSpec::desc("stock")));
        state.toggle_sort("precio");
        assert_eq!(state.sort, Some(SortSpec::asc("precio")));
    }

    #[test]
    fn page_size_change_resets_index() {
        let mut state = ViewState::new(None, 10);
        state.go_to_page(3, 5);
        assert_eq!(state.page.index, 3);
        state.set_page_size(0);
        assert_eq!(state.page, PageSpec { index: 0, size: 1 });
    }

    #[test]
    fn navigation_clamps_without_wrapping() {
        let mut state = ViewState::new(None, 10);
        state.previous_page();
        assert_eq!(state.page.index, 0);

        state.next_page(2);
        state.next_page(2);
        assert_eq!(state.page.index, 1);

        state.go_to_page(99, 2);
        assert_eq!(state.page.index, 1);

        state.next_page(0);
        state.clamp_page(0);
        assert_eq!(state.page.index, 0);
    }

    #[test]
    fn blank_filter_value_removes_filter() {
        let mut state = ViewState::default();
        state.set_filter("estado", "activo");
        assert_eq!(state.active_filters().count(), 1);
        state.set_filter("estado", "  ");
        assert!(state.field_filters.is_empty());
    }
}
