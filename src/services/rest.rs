//! REST Store
//!
//! PostgREST-style table access: `/rest/v1/{table}` with the project key in
//! `apikey` and the session token as bearer.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;

use super::store::EntityStore;
use crate::domain::config::BackendConfig;
use crate::domain::{EntityId, Record};
use crate::error::{Error, Result};

const PREFER_REPRESENTATION: (&str, &str) = ("Prefer", "return=representation");

/// HTTP client plus the credentials every backend call carries
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    backend: Arc<BackendConfig>,
    access_token: Option<Arc<str>>,
}

impl RestClient {
    pub fn new(backend: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(backend.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            backend: Arc::new(backend.clone()),
            access_token: None,
        })
    }

    /// Same client, calling as the signed-in user
    pub fn with_token(mut self, token: impl Into<Arc<str>>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    /// Attach `apikey` and bearer; without a session the anon key is the bearer
    pub fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .access_token
            .as_deref()
            .unwrap_or(self.backend.anon_key.as_str());
        request
            .header("apikey", &self.backend.anon_key)
            .bearer_auth(bearer)
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("url", &self.backend.url)
            .field("signed_in", &self.access_token.is_some())
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Map a non-success answer to an error, pulling the message out of the body
pub(crate) fn backend_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.msg).or(b.error_description).or(b.error))
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        401 | 403 => Error::Unauthorized { message },
        _ => Error::Backend { status, message },
    }
}

/// Pass successful responses through, turn the rest into errors
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let error = backend_error(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), %error, "Backend rejected request");
    Err(error)
}

/// One backend table of `T`
pub struct RestStore<T> {
    client: RestClient,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> RestStore<T> {
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    fn url(&self) -> String {
        self.client.backend().table_url(T::TABLE)
    }

    fn id_filter(id: &EntityId) -> [(&'static str, String); 1] {
        [("id", format!("eq.{id}"))]
    }

    fn first(rows: Vec<T>, id: Option<&EntityId>) -> Result<T> {
        rows.into_iter().next().ok_or_else(|| match id {
            Some(id) => Error::NotFound {
                entity: T::LABEL,
                id: id.to_string(),
            },
            None => Error::Backend {
                status: 200,
                message: format!("{} insert returned no rows", T::LABEL),
            },
        })
    }
}

#[async_trait]
impl<T: Record> EntityStore<T> for RestStore<T> {
    async fn fetch_all(&self) -> Result<Vec<T>> {
        tracing::debug!(table = T::TABLE, "Fetching rows");
        let request = self.client.http().get(self.url()).query(&[("select", "*")]);
        let response = self.client.authorized(request).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn create(&self, draft: &T::Draft) -> Result<T> {
        let request = self
            .client
            .http()
            .post(self.url())
            .header(PREFER_REPRESENTATION.0, PREFER_REPRESENTATION.1)
            .json(draft);
        let response = self.client.authorized(request).send().await?;
        let rows: Vec<T> = check_status(response).await?.json().await?;
        Self::first(rows, None)
    }

    async fn update(&self, id: &EntityId, draft: &T::Draft) -> Result<T> {
        let request = self
            .client
            .http()
            .patch(self.url())
            .query(&Self::id_filter(id))
            .header(PREFER_REPRESENTATION.0, PREFER_REPRESENTATION.1)
            .json(draft);
        let response = self.client.authorized(request).send().await?;
        let rows: Vec<T> = check_status(response).await?.json().await?;
        Self::first(rows, Some(id))
    }

    async fn remove(&self, id: &EntityId) -> Result<()> {
        let request = self
            .client
            .http()
            .delete(self.url())
            .query(&Self::id_filter(id))
            .header(PREFER_REPRESENTATION.0, PREFER_REPRESENTATION.1);
        let response = self.client.authorized(request).send().await?;
        let rows: Vec<serde_json::Value> = check_status(response).await?.json().await?;
        if rows.is_empty() {
            return Err(Error::NotFound {
                entity: T::LABEL,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    #[test]
    fn error_body_message_is_extracted() {
        let err = backend_error(409, r#"{"code":"23505","message":"duplicate key"}"#);
        assert!(matches!(err, Error::Backend { status: 409, ref message } if message == "duplicate key"));

        let err = backend_error(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#);
        assert!(matches!(err, Error::Backend { ref message, .. } if message == "Invalid login credentials"));
    }

    #[test]
    fn auth_statuses_map_to_unauthorized() {
        assert!(matches!(backend_error(401, "JWT expired"), Error::Unauthorized { .. }));
        assert!(backend_error(403, "").is_remote());
    }

    #[test]
    fn plain_text_bodies_are_kept() {
        let err = backend_error(502, " Bad Gateway \n");
        assert!(matches!(err, Error::Backend { ref message, .. } if message == "Bad Gateway"));
    }

    #[test]
    fn store_targets_record_table() {
        let client = RestClient::new(&BackendConfig {
            url: "https://demo.supabase.co".into(),
            ..Default::default()
        })
        .unwrap();
        let store: RestStore<Product> = RestStore::new(client);
        assert_eq!(store.url(), "https://demo.supabase.co/rest/v1/productos");
        assert_eq!(RestStore::<Product>::id_filter(&EntityId::from("7"))[0].1, "eq.7");
    }

    #[test]
    fn missing_row_after_update_is_not_found() {
        let err = RestStore::<Product>::first(Vec::new(), Some(&EntityId::from("9"))).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "Product", .. }));
    }
}
