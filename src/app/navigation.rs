//! Navigation - Routes and Access Guard
//!
//! Defines the pages available in the application and who may open them.

use serde::{Deserialize, Serialize};

use crate::state::SessionState;

/// Available pages in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Public landing page
    #[default]
    Landing,
    Login,
    Dashboard,
    Products,
    Clients,
    Sales,
    Promotions,
    /// Account management, administrators only
    Users,
}

impl Route {
    /// Get the translation key for the page title
    pub fn title_key(&self) -> &'static str {
        match self {
            Route::Landing => "route-landing",
            Route::Login => "route-login",
            Route::Dashboard => "route-dashboard",
            Route::Products => "route-products",
            Route::Clients => "route-clients",
            Route::Sales => "route-sales",
            Route::Promotions => "route-promotions",
            Route::Users => "route-users",
        }
    }

    /// URL-style path
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Products => "/productos",
            Route::Clients => "/clientes",
            Route::Sales => "/ventas",
            Route::Promotions => "/promociones",
            Route::Users => "/usuarios",
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Landing | Route::Login)
    }

    pub fn admin_only(&self) -> bool {
        matches!(self, Route::Users)
    }

    /// Pages shown in the sidebar, in order
    pub fn sidebar() -> &'static [Route] {
        &[
            Route::Dashboard,
            Route::Products,
            Route::Clients,
            Route::Sales,
            Route::Promotions,
            Route::Users,
        ]
    }
}

/// Why a route was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denied {
    SignInRequired,
    AdminOnly,
}

impl Denied {
    pub fn message_key(&self) -> &'static str {
        match self {
            Denied::SignInRequired => "access-sign-in-required",
            Denied::AdminOnly => "access-admin-only",
        }
    }
}

/// Where the user actually lands when asking for `route`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow(Route),
    Redirect { to: Route, reason: Denied },
}

impl GuardOutcome {
    pub fn route(&self) -> Route {
        match self {
            GuardOutcome::Allow(route) => *route,
            GuardOutcome::Redirect { to, .. } => *to,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allow(_))
    }
}

/// Signed-out users go to `Login`; non-admins are kept out of `Users`.
/// A signed-in user asking for `Login` lands on the dashboard instead.
pub fn guard(route: Route, session: &SessionState) -> GuardOutcome {
    if route.requires_session() && !session.is_authenticated() {
        return GuardOutcome::Redirect {
            to: Route::Login,
            reason: Denied::SignInRequired,
        };
    }
    if route.admin_only() && !session.is_admin() {
        return GuardOutcome::Redirect {
            to: Route::Dashboard,
            reason: Denied::AdminOnly,
        };
    }
    if route == Route::Login && session.is_authenticated() {
        return GuardOutcome::Allow(Route::Dashboard);
    }
    GuardOutcome::Allow(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityId, Role, Session, SessionUser};
    use crate::i18n::Locale;

    fn signed_in(rol: Role) -> SessionState {
        let user = SessionUser {
            id: EntityId::from("u1"),
            email: "ana@ferremarket.co".into(),
            rol: Some(rol),
        };
        SessionState::new(Some(Session::new("a".into(), "r".into(), 3600, user)), Locale::Es)
    }

    #[test]
    fn signed_out_users_go_to_login() {
        let session = SessionState::default();
        assert_eq!(guard(Route::Landing, &session), GuardOutcome::Allow(Route::Landing));
        assert_eq!(guard(Route::Login, &session), GuardOutcome::Allow(Route::Login));
        for route in Route::sidebar() {
            let outcome = guard(*route, &session);
            assert_eq!(outcome.route(), Route::Login);
            assert!(!outcome.is_allowed());
        }
    }

    #[test]
    fn sellers_cannot_manage_users() {
        let session = signed_in(Role::Vendedor);
        assert!(guard(Route::Products, &session).is_allowed());
        assert_eq!(
            guard(Route::Users, &session),
            GuardOutcome::Redirect {
                to: Route::Dashboard,
                reason: Denied::AdminOnly
            }
        );
    }

    #[test]
    fn admins_see_everything() {
        let session = signed_in(Role::Admin);
        assert!(Route::sidebar().iter().all(|r| guard(*r, &session).is_allowed()));
        assert_eq!(guard(Route::Login, &session).route(), Route::Dashboard);
    }
}
