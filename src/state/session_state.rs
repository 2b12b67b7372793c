//! SessionState - Who Is Signed In

use crate::domain::Session;
use crate::i18n::Locale;

/// Current session and display locale
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Option<Session>,
    pub locale: Locale,
}

impl SessionState {
    pub fn new(session: Option<Session>, locale: Locale) -> Self {
        Self { session, locale }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// A session that has not expired
    pub fn active(&self) -> Option<&Session> {
        self.session.as_ref().filter(|s| !s.is_expired())
    }

    pub fn is_authenticated(&self) -> bool {
        self.active().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.active().is_some_and(Session::is_admin)
    }

    pub fn email(&self) -> Option<&str> {
        self.active().map(|s| s.user.email.as_str())
    }

    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn sign_out(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityId, Role, SessionUser};
    use chrono::{Duration, Utc};

    fn session(rol: Role) -> Session {
        Session::new(
            "a".into(),
            "r".into(),
            600,
            SessionUser {
                id: EntityId::from("u"),
                email: "v@ferremarket.co".into(),
                rol: Some(rol),
            },
        )
    }

    #[test]
    fn expired_sessions_do_not_count() {
        let mut state = SessionState::default();
        assert!(!state.is_authenticated());

        let mut s = session(Role::Admin);
        state.sign_in(s.clone());
        assert!(state.is_admin());
        assert_eq!(state.email(), Some("v@ferremarket.co"));

        s.expires_at = Utc::now() - Duration::seconds(1);
        state.sign_in(s);
        assert!(!state.is_authenticated());
        assert!(!state.is_admin());

        state.sign_out();
        assert!(state.session().is_none());
    }

    #[test]
    fn sellers_are_not_admins() {
        let state = SessionState::new(Some(session(Role::Vendedor)), Locale::En);
        assert!(state.is_authenticated());
        assert!(!state.is_admin());
    }
}
