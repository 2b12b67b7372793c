//! Pagination Footer
//!
//! Page position, result count and selection count under a list table.

use crate::domain::Entity;
use crate::i18n::{Locale, t_format};
use crate::view::DerivedView;

/// Footer numbers for one derived view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// One-based page shown to the user
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub selected: usize,
}

impl Pagination {
    pub fn new(current_page: usize, total_pages: usize, total_items: usize) -> Self {
        Self {
            current_page,
            total_pages,
            total_items,
            selected: 0,
        }
    }

    pub fn from_view<T: Entity>(view: &DerivedView<'_, T>) -> Self {
        Self {
            selected: view.selected.len(),
            ..Self::new(view.page_index + 1, view.page_count, view.total_count)
        }
    }

    pub fn can_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn render(&self, locale: Locale) -> String {
        let page = self.current_page.to_string();
        let pages = self.total_pages.to_string();
        let mut parts = vec![
            t_format(locale, "table-page", &[("page", page.as_str()), ("pages", pages.as_str())]),
            t_format(locale, "table-results", &[("count", self.total_items.to_string().as_str())]),
        ];
        if self.selected > 0 {
            parts.push(t_format(
                locale,
                "table-selected",
                &[("count", self.selected.to_string().as_str())],
            ));
        }
        parts.join(" · ")
    }
}
