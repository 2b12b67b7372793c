//! Auth Client
//!
//! Password sign-in against the backend auth API. The resulting session is
//! kept encrypted on disk so later CLI runs stay signed in until it expires.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::rest::{RestClient, check_status};
use crate::domain::{EntityId, Role, Session, SessionUser};
use crate::error::{Error, Result};
use crate::helpers::{decrypt, encrypt, get_or_create_data_dir, remove_if_exists, write_atomic};

const SESSION_FILE: &str = "session.dat";

/// Encrypted session file
#[derive(Debug, Clone)]
pub struct SessionVault {
    path: PathBuf,
    key: [u8; 32],
}

impl SessionVault {
    pub fn new(path: impl Into<PathBuf>, key: [u8; 32]) -> Self {
        Self {
            path: path.into(),
            key,
        }
    }

    /// Vault at `<data dir>/session.dat`
    pub fn in_data_dir(key: [u8; 32]) -> Result<Self> {
        Ok(Self::new(get_or_create_data_dir()?.join(SESSION_FILE), key))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session)?;
        write_atomic(&self.path, encrypt(&self.key, &json)?.as_bytes())
    }

    /// The saved session, if any and not yet expired.
    ///
    /// Expired or unreadable files are removed.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let sealed = std::fs::read_to_string(&self.path)?;
        let session = decrypt(&self.key, &sealed)
            .and_then(|json| serde_json::from_str::<Session>(&json).map_err(Error::from));

        match session {
            Ok(session) if !session.is_expired() => Ok(Some(session)),
            Ok(_) => {
                tracing::info!("Saved session expired");
                self.clear()?;
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session file");
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> Result<()> {
        remove_if_exists(&self.path)
    }
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    rol: Option<Role>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: EntityId,
    email: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    rol: Role,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let user = SessionUser {
            id: self.user.id,
            email: self.user.email,
            rol: self.user.user_metadata.rol,
        };
        Session::new(self.access_token, self.refresh_token, self.expires_in, user)
    }
}

/// Sign-in, sign-out and the current session
pub struct AuthClient {
    client: RestClient,
    vault: SessionVault,
}

impl AuthClient {
    pub fn new(client: RestClient, vault: SessionVault) -> Self {
        Self { client, vault }
    }

    /// Password grant; the session is saved before returning
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::Invalid {
                message: "Email and password are required".to_string(),
            });
        }

        tracing::info!(email, "Signing in");

        let url = self.client.backend().auth_url("token");
        let request = self
            .client
            .http()
            .post(url)
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }));
        let response = self.client.authorized(request).send().await?;
        let token: TokenResponse = check_status(response).await?.json().await?;

        let mut session = token.into_session();
        if session.user.rol.is_none() {
            session.user.rol = self.fetch_role(&session).await;
        }

        self.vault.save(&session)?;
        Ok(session)
    }

    /// Role from the `usuarios` profile row. Missing rows leave the role unknown.
    async fn fetch_role(&self, session: &Session) -> Option<Role> {
        let client = self.client.clone().with_token(session.access_token.as_str());
        let request = client
            .http()
            .get(client.backend().table_url("usuarios"))
            .query(&[
                ("select", "rol".to_string()),
                ("email", format!("eq.{}", session.user.email)),
            ]);

        let result: Result<Vec<RoleRow>> = async {
            let response = client.authorized(request).send().await?;
            Ok(check_status(response).await?.json().await?)
        }
        .await;

        match result {
            Ok(rows) => rows.into_iter().next().map(|r| r.rol),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read user role");
                None
            }
        }
    }

    /// Revoke the token remotely, then forget it locally either way
    pub async fn sign_out(&self) -> Result<()> {
        let Some(session) = self.vault.load()? else {
            return Ok(());
        };

        let client = self.client.clone().with_token(session.access_token.as_str());
        let request = client.http().post(client.backend().auth_url("logout"));
        let remote = match client.authorized(request).send().await {
            Ok(response) => check_status(response).await.map(|_| ()),
            Err(e) => Err(e.into()),
        };

        self.vault.clear()?;
        if let Err(e) = &remote {
            tracing::warn!(error = %e, "Remote sign-out failed; local session cleared");
        }
        remote
    }

    pub fn current_session(&self) -> Result<Option<Session>> {
        self.vault.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::DEFAULT_SESSION_KEY;
    use chrono::{Duration, Utc};

    fn session(expires_in: i64) -> Session {
        Session::new(
            "access".into(),
            "refresh".into(),
            expires_in,
            SessionUser {
                id: EntityId::from("u1"),
                email: "admin@ferremarket.co".into(),
                rol: Some(Role::Admin),
            },
        )
    }

    #[test]
    fn vault_round_trip_is_encrypted() {
        let dir = tempfile::tempdir().unwrap();
        let vault = SessionVault::new(dir.path().join(SESSION_FILE), *DEFAULT_SESSION_KEY);

        let saved = session(3600);
        vault.save(&saved).unwrap();

        let raw = std::fs::read_to_string(vault.path()).unwrap();
        assert!(!raw.contains("access"));
        assert_eq!(vault.load().unwrap(), Some(saved));
    }

    #[test]
    fn expired_session_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let vault = SessionVault::new(dir.path().join(SESSION_FILE), *DEFAULT_SESSION_KEY);

        let mut old = session(3600);
        old.expires_at = Utc::now() - Duration::minutes(1);
        vault.save(&old).unwrap();

        assert_eq!(vault.load().unwrap(), None);
        assert!(!vault.path().exists());
    }

    #[test]
    fn garbage_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let vault = SessionVault::new(dir.path().join(SESSION_FILE), *DEFAULT_SESSION_KEY);
        std::fs::write(vault.path(), "not a session").unwrap();

        assert_eq!(vault.load().unwrap(), None);
        assert!(!vault.path().exists());
    }

    #[test]
    fn token_response_carries_metadata_role() {
        let token: TokenResponse = serde_json::from_str(
            r#"{
                "access_token": "a", "refresh_token": "r", "expires_in": 3600,
                "token_type": "bearer",
                "user": {"id": "u1", "email": "v@ferremarket.co", "user_metadata": {"rol": "vendedor"}}
            }"#,
        )
        .unwrap();
        let session = token.into_session();
        assert_eq!(session.user.rol, Some(Role::Vendedor));
        assert!(!session.is_admin());
    }

    #[tokio::test]
    async fn sign_in_requires_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let auth = AuthClient::new(
            RestClient::new(&Default::default()).unwrap(),
            SessionVault::new(dir.path().join(SESSION_FILE), *DEFAULT_SESSION_KEY),
        );
        assert!(matches!(auth.sign_in(" ", "x").await, Err(Error::Invalid { .. })));
        assert!(auth.sign_out().await.is_ok());
    }
}
