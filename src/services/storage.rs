//! Image Storage
//!
//! Product images go to an object-storage edge function which answers with
//! the public URL of the stored object.

use std::path::Path;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use super::rest::{RestClient, check_status};
use crate::constants::MAX_IMAGE_BYTES;
use crate::domain::EntityId;
use crate::domain::config::AppConfig;
use crate::error::{Error, Result};

/// Somewhere to put image bytes
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `key`, returning the public URL
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String>;
}

/// MIME type for an object key, by extension
pub fn content_type_for(key: &str) -> Result<&'static str> {
    let ext = Path::new(key)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        _ => Err(Error::Invalid {
            message: format!("Unsupported image type: {key}"),
        }),
    }
}

/// Object key for a product image: `<product-id>/<uuid>.<ext>`
pub fn image_key(product: &EntityId, file_name: &str) -> String {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "bin".to_string());
    format!("{product}/{}.{ext}", uuid::Uuid::new_v4())
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(alias = "publicUrl", alias = "public_url")]
    url: String,
}

/// Edge-function backed storage
pub struct ImageStorage {
    client: RestClient,
    upload_url: String,
    bucket: String,
}

impl ImageStorage {
    pub fn new(client: RestClient, config: &AppConfig) -> Self {
        Self {
            upload_url: config.storage.upload_url(&config.backend),
            bucket: config.storage.bucket.clone(),
            client,
        }
    }
}

#[async_trait]
impl ObjectStorage for ImageStorage {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String> {
        let content_type = content_type_for(key)?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(Error::Invalid {
                message: format!("Image exceeds {MAX_IMAGE_BYTES} bytes"),
            });
        }

        tracing::info!(bucket = %self.bucket, key, size = bytes.len(), "Uploading image");

        let response = self
            .client
            .authorized(self.client.http().post(&self.upload_url))
            .query(&[("bucket", self.bucket.as_str()), ("path", key)])
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let body: UploadResponse = check_status(response).await?.json().await?;
        Ok(body.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type_for("a/b.PNG").unwrap(), "image/png");
        assert_eq!(content_type_for("b.jpeg").unwrap(), "image/jpeg");
        assert!(content_type_for("b.svg").is_err());
        assert!(content_type_for("sin-extension").is_err());
    }

    #[test]
    fn keys_are_scoped_by_product() {
        let key = image_key(&EntityId::from("p-7"), "Taladro.JPG");
        assert!(key.starts_with("p-7/"));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn upload_response_accepts_public_url_alias() {
        let body: UploadResponse =
            serde_json::from_str(r#"{"publicUrl":"https://cdn/x.png"}"#).unwrap();
        assert_eq!(body.url, "https://cdn/x.png");
    }
}
