//! View - Generic List-View Engine
//!
//! One filter -> sort -> paginate -> aggregate pipeline shared by every
//! management page. Pages own a [`ViewState`], describe themselves with a
//! [`ViewConfig`], and call [`derive_view`] on each change.
//!
//! ```text
//! collection ──► filter (search AND field filters)
//!                  │
//!                  ├──► stats (summary cards)
//!                  ▼
//!                sort (stable) ──► paginate ──► page_items
//! ```

mod config;
mod derive;
mod field;
pub mod filter;
mod paginate;
pub mod rules;
mod selection;
mod sort;
mod state;
pub mod stats;

pub use config::ViewConfig;
pub use derive::{DerivedView, derive_view};
pub use field::{FieldValue, eq_fold};
pub use paginate::{page_bounds, page_count};
pub use rules::{Bucket, Rule, RuleTable};
pub use selection::Selection;
pub use sort::compare;
pub use state::{PageSpec, SortDirection, SortSpec, ViewState};
pub use stats::{Aggregator, Stats};
