//! derive_view - `(collection, ViewState, ViewConfig) -> DerivedView`.

use super::config::ViewConfig;
use super::state::ViewState;
use super::stats::{self, Stats};
use super::{filter, paginate, sort};
use crate::domain::{Entity, EntityId};

/// Everything a list page renders, recomputed on every state change
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a, T> {
    /// Filtered and sorted entities
    pub filtered: Vec<&'a T>,
    pub total_count: usize,
    /// The slice of `filtered` on the current page
    pub page_items: Vec<&'a T>,
    /// At least 1
    pub page_count: usize,
    /// Page index after clamping
    pub page_index: usize,
    /// Summary cards over `filtered`
    pub stats: Stats,
    /// Selected ids still present in the collection
    pub selected: Vec<EntityId>,
    /// Header checkbox state for the current page
    pub all_visible_selected: bool,
}

impl<T: Entity> DerivedView<'_, T> {
    /// Ids on the current page, in display order
    pub fn visible_ids(&self) -> Vec<EntityId> {
        self.page_items.iter().map(|e| e.id()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

/// Apply `state` to `collection`.
///
/// Pure and total: bad page indexes are clamped, unknown filters match
/// nothing, missing fields compare as null.
pub fn derive_view<'a, T: Entity>(
    collection: &'a [T],
    state: &ViewState,
    config: &ViewConfig<T>,
) -> DerivedView<'a, T> {
    let mut filtered: Vec<&T> = collection
        .iter()
        .filter(|e| filter::matches(*e, state, config))
        .collect();

    if let Some(spec) = &state.sort {
        sort::sort_stable(&mut filtered, spec);
    }

    let total_count = filtered.len();
    let page_count = paginate::page_count(total_count, state.page.size);
    let (page_index, range) = paginate::page_bounds(total_count, state.page.size, state.page.index);
    let page_items = filtered[range].to_vec();

    let stats = stats::aggregate(&filtered, config);
    let selected = state.selection.selected_in(collection);
    let all_visible_selected = !page_items.is_empty()
        && page_items.iter().all(|e| state.selection.contains(&e.id()));

    tracing::trace!(
        total = collection.len(),
        filtered = total_count,
        page = page_index,
        pages = page_count,
        "derived list view"
    );

    DerivedView {
        filtered,
        total_count,
        page_items,
        page_count,
        page_index,
        stats,
        selected,
        all_visible_selected,
    }
}
