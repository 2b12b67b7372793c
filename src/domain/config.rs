//! Config - Application Configuration

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, HTTP_TIMEOUT_SECS};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Backend-as-a-service connection
    pub backend: BackendConfig,
    /// Object storage edge function
    pub storage: StorageConfig,
    /// Display preferences
    pub ui: UiConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Project base URL (e.g., "https://xyz.supabase.co")
    pub url: String,
    /// Public anon key sent as `apikey`
    pub anon_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    /// REST endpoint for a table
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), table)
    }

    /// Auth endpoint (e.g., "token", "logout")
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url.trim_end_matches('/'), path)
    }
}

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Edge function URL; empty means derive from the backend URL
    pub function_url: String,
    /// Bucket product images go to
    pub bucket: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            function_url: String::new(),
            bucket: "productos".to_string(),
        }
    }
}

impl StorageConfig {
    /// Upload endpoint, falling back to `<backend>/functions/v1/upload-image`
    pub fn upload_url(&self, backend: &BackendConfig) -> String {
        if self.function_url.trim().is_empty() {
            format!("{}/functions/v1/upload-image", backend.url.trim_end_matches('/'))
        } else {
            self.function_url.clone()
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// "es" or "en"; empty means detect from the system
    pub locale: String,
    /// Rows per page on list pages
    pub page_size: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [backend]
            url = "https://demo.supabase.co/"
            anon_key = "k"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.timeout_secs, HTTP_TIMEOUT_SECS);
        assert_eq!(config.ui.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(
            config.backend.table_url("productos"),
            "https://demo.supabase.co/rest/v1/productos"
        );
        assert_eq!(
            config.storage.upload_url(&config.backend),
            "https://demo.supabase.co/functions/v1/upload-image"
        );
    }
}
