// ── Route guard ──
//
// Home and Login are public. Every other screen needs an authenticated
// session; unauthenticated access is redirected to Login. No roles.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::error::CoreError;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Route {
    Home,
    Login,
    Users,
    Pharmacies,
    Owners,
    Shifts,
}

impl Route {
    pub fn is_public(self) -> bool {
        matches!(self, Self::Home | Self::Login)
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: Session,
}

impl RouteGuard {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The route to actually render: `route` itself when allowed,
    /// `Route::Login` otherwise.
    pub fn resolve(&self, route: Route) -> Route {
        if route.is_public() || self.session.is_authenticated() {
            route
        } else {
            Route::Login
        }
    }

    /// Like [`resolve`](Self::resolve), but a redirect is an error.
    pub fn require(&self, route: Route) -> Result<Route, CoreError> {
        match self.resolve(route) {
            Route::Login if route != Route::Login => Err(CoreError::LoginRequired {
                route: route.to_string(),
            }),
            resolved => Ok(resolved),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use strum::IntoEnumIterator;

    #[test]
    fn public_routes_always_resolve() {
        let guard = RouteGuard::new(Session::new());
        assert_eq!(guard.resolve(Route::Home), Route::Home);
        assert_eq!(guard.resolve(Route::Login), Route::Login);
    }

    #[test]
    fn protected_routes_redirect_when_logged_out() {
        let guard = RouteGuard::new(Session::new());
        for route in Route::iter().filter(|r| !r.is_public()) {
            assert_eq!(guard.resolve(route), Route::Login);
            assert!(matches!(guard.require(route), Err(CoreError::LoginRequired { .. })));
        }
    }

    #[test]
    fn guard_follows_session_changes() {
        let session = Session::new();
        let guard = RouteGuard::new(session.clone());

        session.login(SecretString::from("t".to_owned()));
        assert_eq!(guard.require(Route::Shifts).ok(), Some(Route::Shifts));

        session.logout();
        assert_eq!(guard.resolve(Route::Pharmacies), Route::Login);
    }

    #[test]
    fn route_names_parse() {
        assert_eq!("owners".parse::<Route>().ok(), Some(Route::Owners));
        assert_eq!(Route::Pharmacies.to_string(), "pharmacies");
    }
}
