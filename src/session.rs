//! Client-side session: the authentication token and the pages it unlocks.

use std::collections::HashMap;

use derive_more::{Display, Error};
use serde::Serialize;

use crate::prelude::*;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_EMAIL_KEY: &str = "user_email";
pub const USERNAME_KEY: &str = "username";

/// Token stored on successful login.
pub const SENTINEL_TOKEN: &str = "mock_jwt_token";

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password123";

/// Shown when no username has been stored.
pub const DEFAULT_USERNAME: &str = "User";

/// String key-value storage backing the session.
pub trait Store {
    fn get(&self, key: &str) -> Option<&str>;

    fn set(&mut self, key: &str, value: String);

    fn remove(&mut self, key: &str);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore(HashMap<String, String>);

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) {
        self.0.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Identity {
    pub email: Option<String>,
    pub username: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AuthState {
    /// An authentication token is present.
    pub present: bool,

    pub identity: Option<Identity>,
}

impl AuthState {
    pub const fn is_authenticated(&self) -> bool {
        self.present
    }
}

#[derive(Copy, Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum LoginRejection {
    #[display("invalid email or password")]
    InvalidCredentials,
}

#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(into = "String")]
pub enum Route {
    #[display("/")]
    Root,

    #[display("/login")]
    Login,

    #[display("/signup")]
    Signup,

    #[display("/forgot-password")]
    ForgotPassword,

    #[display("/dashboard")]
    Dashboard,

    #[display("/summary")]
    Summary,

    #[display("/comparison")]
    Comparison,

    #[display("/forecasting")]
    Forecasting,

    #[display("/rewards")]
    Rewards,

    #[display("/appliances")]
    Appliances,

    #[display("/alerts")]
    Alerts,

    #[display("/settings")]
    Settings,

    #[display("*")]
    NotFound,
}

impl Route {
    /// Match the path case-insensitively, ignoring a trailing slash.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        match path.to_lowercase().as_str() {
            "/" | "" => Self::Root,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/forgot-password" => Self::ForgotPassword,
            "/dashboard" => Self::Dashboard,
            "/summary" => Self::Summary,
            "/comparison" => Self::Comparison,
            "/forecasting" => Self::Forecasting,
            "/rewards" => Self::Rewards,
            "/appliances" => Self::Appliances,
            "/alerts" => Self::Alerts,
            "/settings" => Self::Settings,
            _ => Self::NotFound,
        }
    }

    /// Requires an authentication token.
    pub const fn is_protected(self) -> bool {
        matches!(
            self,
            Self::Dashboard
                | Self::Summary
                | Self::Comparison
                | Self::Forecasting
                | Self::Rewards
                | Self::Appliances
                | Self::Alerts
                | Self::Settings
        )
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.to_string()
    }
}

pub struct Session<S> {
    store: S,
}

impl<S: Store> Session<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The only place where the stored token is interpreted.
    pub fn auth_state(&self) -> AuthState {
        let present = self.store.get(AUTH_TOKEN_KEY).is_some_and(|token| !token.is_empty());
        let identity = present.then(|| Identity {
            email: self.store.get(USER_EMAIL_KEY).map(ToString::to_string),
            username: self
                .store
                .get(USERNAME_KEY)
                .filter(|username| !username.is_empty())
                .unwrap_or(DEFAULT_USERNAME)
                .to_string(),
        });
        AuthState { present, identity }
    }

    #[instrument(skip_all, fields(email = email))]
    pub fn login(&mut self, email: &str, password: &str) -> Result<AuthState, LoginRejection> {
        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            warn!("login failed");
            return Err(LoginRejection::InvalidCredentials);
        }
        self.store.set(AUTH_TOKEN_KEY, SENTINEL_TOKEN.to_string());
        self.store.set(USER_EMAIL_KEY, email.to_string());
        info!("logged in");
        Ok(self.auth_state())
    }

    pub fn logout(&mut self) {
        for key in [AUTH_TOKEN_KEY, USER_EMAIL_KEY, USERNAME_KEY] {
            self.store.remove(key);
        }
        debug!("logged out");
    }

    /// Where the requested route actually leads.
    pub fn resolve(&self, route: Route) -> Route {
        let authenticated = self.auth_state().is_authenticated();
        match route {
            Route::Root if authenticated => Route::Dashboard,
            Route::Root => Route::Login,
            route if route.is_protected() && !authenticated => Route::Login,
            route => route,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> Session<MemoryStore> {
        let mut session = Session::new(MemoryStore::default());
        session.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        session
    }

    #[test]
    fn test_anonymous() {
        let session = Session::new(MemoryStore::default());
        assert_eq!(session.auth_state(), AuthState { present: false, identity: None });
    }

    #[test]
    fn test_login() {
        let session = logged_in();
        assert_eq!(session.store().get(AUTH_TOKEN_KEY), Some(SENTINEL_TOKEN));
        let state = session.auth_state();
        assert!(state.is_authenticated());
        assert_eq!(
            state.identity,
            Some(Identity { email: Some(DEMO_EMAIL.to_string()), username: DEFAULT_USERNAME.to_string() })
        );
    }

    #[test]
    fn test_stored_username() {
        let mut store = MemoryStore::default();
        store.set(AUTH_TOKEN_KEY, "anything".to_string());
        store.set(USERNAME_KEY, "Asha".to_string());
        let identity = Session::new(store).auth_state().identity.unwrap();
        assert_eq!(identity.username, "Asha");
        assert_eq!(identity.email, None);
    }

    #[test]
    fn test_empty_token_is_absent() {
        let mut store = MemoryStore::default();
        store.set(AUTH_TOKEN_KEY, String::new());
        assert!(!Session::new(store).auth_state().is_authenticated());
    }

    #[test]
    fn test_invalid_credentials() {
        let mut session = Session::new(MemoryStore::default());
        assert_eq!(session.login(DEMO_EMAIL, "password"), Err(LoginRejection::InvalidCredentials));
        assert_eq!(session.login("DEMO@example.com", DEMO_PASSWORD), Err(LoginRejection::InvalidCredentials));
        assert!(!session.auth_state().is_authenticated());
    }

    #[test]
    fn test_logout() {
        let mut session = logged_in();
        session.store.set(USERNAME_KEY, "Asha".to_string());
        session.logout();
        assert!(!session.auth_state().is_authenticated());
        assert_eq!(session.store().get(USER_EMAIL_KEY), None);
        assert_eq!(session.store().get(USERNAME_KEY), None);
    }

    #[test]
    fn test_parse_route() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse("/Dashboard/"), Route::Dashboard);
        assert_eq!(Route::parse("/forgot-password"), Route::ForgotPassword);
        assert_eq!(Route::parse("/nope"), Route::NotFound);
        assert_eq!(Route::Forecasting.to_string(), "/forecasting");
    }

    #[test]
    fn test_resolve_anonymous() {
        let session = Session::new(MemoryStore::default());
        assert_eq!(session.resolve(Route::Root), Route::Login);
        assert_eq!(session.resolve(Route::Dashboard), Route::Login);
        assert_eq!(session.resolve(Route::Settings), Route::Login);
        assert_eq!(session.resolve(Route::Signup), Route::Signup);
        assert_eq!(session.resolve(Route::NotFound), Route::NotFound);
    }

    #[test]
    fn test_resolve_authenticated() {
        let session = logged_in();
        assert_eq!(session.resolve(Route::Root), Route::Dashboard);
        assert_eq!(session.resolve(Route::Rewards), Route::Rewards);
        assert_eq!(session.resolve(Route::Login), Route::Login);
    }
}
