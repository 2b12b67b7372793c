//! FerreMarket Admin Library
//!
//! Back-office logic for the FerreMarket hardware store: product catalog,
//! customers, sales, promotions and user accounts, each exposed as a list
//! page with search, filters, sorting, paging, selection and summary cards.

pub mod app;
pub mod components;
pub mod constants;
pub mod domain;
pub mod error;
pub mod features;
pub mod helpers;
pub mod i18n;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;
pub mod view;
