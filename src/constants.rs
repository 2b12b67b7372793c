//! Application Constants
//!
//! Centralized defaults shared across pages and services.

/// Rows per page when a page mounts
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_OPTIONS: &[usize] = &[5, 10, 20, 50];

/// Notice (toast) ring buffer capacity
pub const NOTICE_CAPACITY: usize = 200;

/// HTTP request timeout for backend calls
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Client purchase-count thresholds for segments
pub const FREQUENT_CLIENT_MIN_PURCHASES: f64 = 10.0;
pub const REGULAR_CLIENT_MIN_PURCHASES: f64 = 3.0;

/// Promotion code length bounds
pub const PROMO_CODE_MIN_LEN: usize = 3;
pub const PROMO_CODE_MAX_LEN: usize = 20;

/// Minimum password length for new users
pub const MIN_PASSWORD_LEN: usize = 8;

/// Product image upload limit
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Column width used when rendering tables as text
pub const TEXT_COLUMN_WIDTH: usize = 16;

/// Application identifiers for platform directories
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "ferremarket";
pub const APP_NAME: &str = "ferremarket-admin";
