//! Features - Management Pages
//!
//! Each page module describes how one entity is listed: its view config,
//! table columns and stat formatting. [`ListController`] runs any of them.

pub mod clients;
mod controller;
pub mod dashboard;
pub mod products;
pub mod promotions;
pub mod sales;
pub mod users;

pub use controller::ListController;
pub use dashboard::{Dashboard, DashboardStores, PageSummary};

use crate::components::{Column, StatFormat};
use crate::domain::Record;
use crate::view::ViewConfig;

/// A listable, editable entity with its own management page
pub trait Page: Record {
    /// Translation key of the page title
    const TITLE_KEY: &'static str;

    fn view_config() -> ViewConfig<Self>;

    fn columns() -> Vec<Column<Self>>;

    /// How a stat card prints its value
    fn stat_format(_name: &str) -> StatFormat {
        StatFormat::Count
    }
}
