//! Application Layer
//!
//! Command-line surface, page routing and the dispatcher that ties services,
//! state and pages together.

pub mod application;
pub mod cli;
pub mod navigation;
