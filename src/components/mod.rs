//! Components - Text Rendering for List Pages
//!
//! Pure rendering helpers that don't depend on services or do I/O.

mod pagination;
mod table;

pub use pagination::Pagination;
pub use table::{Align, Column, ColumnWidth, StatFormat, render_stats, render_table, stat_label_key};
