//! Session - Signed-in Identity

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::status::Role;

/// Identity returned by the auth provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: EntityId,
    pub email: String,
    /// Role from the user profile, when known
    #[serde(default)]
    pub rol: Option<Role>,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

impl Session {
    /// Build from an `expires_in` seconds value as the auth API returns it
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: SessionUser,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(expires_in),
            user,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_admin(&self) -> bool {
        self.user.rol == Some(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_relative_to_creation() {
        let session = Session::new(
            "a".into(),
            "r".into(),
            3600,
            SessionUser {
                id: EntityId::from("u"),
                email: "admin@ferremarket.co".into(),
                rol: Some(Role::Admin),
            },
        );
        assert!(!session.is_expired());
        assert!(session.is_expired_at(Utc::now() + Duration::hours(2)));
        assert!(session.is_admin());
    }
}
