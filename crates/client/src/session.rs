//! Session state and its persistence.
//!
//! A [`SessionContext`] is an immutable snapshot of "who is signed in". It is
//! passed explicitly to every API call that needs a bearer token, so there is
//! no hidden global state. [`SessionStore`] loads and saves that snapshot
//! through a [`SessionStorage`] under fixed keys.

use std::fmt;

use chrono::{DateTime, Utc};
use inventory_panel_core::models::{AuthResponse, User};
use inventory_panel_core::routes::Route;
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::storage::{SessionStorage, StorageError};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the JSON-encoded user profile.
pub const USER_KEY: &str = "current_user";
/// Storage key for the RFC 3339 time the session was established.
pub const STARTED_AT_KEY: &str = "session_started_at";

/// Snapshot of the signed-in user, if any.
#[derive(Clone, Default)]
pub struct SessionContext {
    token: Option<SecretString>,
    user: Option<User>,
}

impl SessionContext {
    /// No token, no user.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session holding `token` and, when known, the user's profile.
    #[must_use]
    pub fn new(token: impl Into<String>, user: Option<User>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then(|| SecretString::from(token)),
            user,
        }
    }

    /// Whether a token is present. Expiry is not checked locally.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Whether the stored profile has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.is_admin())
    }

    /// The stored profile.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub(crate) const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Apply the navigation gate to `route` for this session.
    #[must_use]
    pub fn resolve(&self, route: Route) -> Route {
        route.resolve(self.is_authenticated(), self.is_admin())
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user.as_ref().map(|u| &u.username))
            .finish()
    }
}

/// Loads and persists the session.
#[derive(Debug)]
pub struct SessionStore<S, C = SystemClock> {
    storage: S,
    clock: C,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Store using the wall clock.
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            clock: SystemClock,
        }
    }
}

impl<S: SessionStorage, C: Clock> SessionStore<S, C> {
    /// Store using an explicit clock.
    pub const fn with_clock(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    /// Underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted session.
    ///
    /// A profile that fails to decode is dropped; the token alone still
    /// counts as signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub fn load(&self) -> Result<SessionContext, StorageError> {
        let token = self.storage.get(TOKEN_KEY)?.unwrap_or_default();
        let user = match self.storage.get(USER_KEY)? {
            Some(raw) => serde_json::from_str::<User>(&raw)
                .inspect_err(|e| warn!(error = %e, "Discarding unreadable stored profile"))
                .ok(),
            None => None,
        };
        Ok(SessionContext::new(token, user))
    }

    /// Persist the token and profile from a login or registration.
    ///
    /// A response without a token leaves storage untouched and returns the
    /// session as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub fn establish(&mut self, response: &AuthResponse) -> Result<SessionContext, StorageError> {
        if response.token.is_empty() {
            debug!("Auth response carried no token; session unchanged");
            return self.load();
        }

        let user_json = serde_json::to_string(&response.user)?;
        self.storage.set(TOKEN_KEY, &response.token)?;
        self.storage.set(USER_KEY, &user_json)?;
        self.storage
            .set(STARTED_AT_KEY, &self.clock.now().to_rfc3339())?;

        debug!(user_id = %response.user.id, "Session established");
        Ok(SessionContext::new(
            response.token.clone(),
            Some(response.user.clone()),
        ))
    }

    /// Replace the stored profile, e.g. after refreshing it from the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub fn update_user(&mut self, user: &User) -> Result<(), StorageError> {
        self.storage.set(USER_KEY, &serde_json::to_string(user)?)
    }

    /// Remove every session key.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        self.storage.remove(STARTED_AT_KEY)?;
        debug!("Session cleared");
        Ok(())
    }

    /// When the current session was established.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub fn started_at(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        Ok(self
            .storage
            .get(STARTED_AT_KEY)?
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|t| t.with_timezone(&Utc)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use inventory_panel_core::types::{Role, UserId};

    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStorage;

    fn user(role: Role) -> User {
        User {
            id: UserId::new(7),
            username: "marta".to_owned(),
            email: "marta@example.com".to_owned(),
            role,
            created_at: None,
            updated_at: None,
        }
    }

    fn response(token: &str, role: Role) -> AuthResponse {
        AuthResponse {
            message: "Login exitoso".to_owned(),
            token: token.to_owned(),
            user: user(role),
        }
    }

    fn store() -> SessionStore<MemoryStorage, FixedClock> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap());
        SessionStore::with_clock(MemoryStorage::new(), clock)
    }

    #[test]
    fn test_establish_then_load() {
        let mut store = store();
        let session = store.establish(&response("tok", Role::Admin)).unwrap();
        assert!(session.is_authenticated());
        assert!(session.is_admin());

        let loaded = store.load().unwrap();
        assert!(loaded.is_authenticated());
        assert_eq!(loaded.user().unwrap().username, "marta");
        assert_eq!(
            store.started_at().unwrap(),
            Some(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_clear_removes_every_key() {
        let mut store = store();
        store.establish(&response("tok", Role::Employee)).unwrap();
        store.clear().unwrap();

        assert!(store.storage().is_empty());
        let session = store.load().unwrap();
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_response_without_token_is_not_persisted() {
        let mut store = store();
        let session = store.establish(&response("", Role::Admin)).unwrap();
        assert!(!session.is_authenticated());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_employee_is_not_admin() {
        let session = SessionContext::new("tok", Some(user(Role::Employee)));
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
        assert_eq!(session.resolve(Route::NewProduct), Route::Dashboard);
    }

    #[test]
    fn test_unreadable_profile_keeps_token() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_KEY, "{broken").unwrap();

        let session = SessionStore::new(storage).load().unwrap();
        assert!(session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = SessionContext::new("super-secret-token", None);
        let debug = format!("{session:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
