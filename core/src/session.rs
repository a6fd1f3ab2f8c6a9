//! Session token handling.
//!
//! The token lives in a key-value `SessionStore` under [`TOKEN_KEY`]. A
//! `SessionContext` is created around a store and handed to whatever needs
//! authenticated calls; nothing reads the token from global state.

use std::collections::HashMap;

use crate::error::{ApiError, SessionError};

/// The single storage key holding the bearer token.
pub const TOKEN_KEY: &str = "userToken";

/// String key-value storage scoped to one user session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// In-process store; forgotten when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.values.remove(key);
        Ok(())
    }
}

/// A signed-in user's bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// The `authorization` header attached to authenticated requests.
    pub fn authorization_header(&self) -> (String, String) {
        ("authorization".to_string(), format!("Bearer {}", self.token))
    }
}

/// Owns the session store for the lifetime of the app.
#[derive(Debug, Clone, Default)]
pub struct SessionContext<S> {
    store: S,
}

impl<S: SessionStore> SessionContext<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist `token` and return the session for it. A blank token is
    /// refused and leaves the store untouched.
    pub fn sign_in(&mut self, token: &str) -> Result<Session, SessionError> {
        if token.trim().is_empty() {
            return Err(SessionError::BlankToken);
        }
        self.store.set(TOKEN_KEY, token)?;
        tracing::debug!("session token stored");
        Ok(Session::new(token))
    }

    /// The stored session, if any. A blank stored token counts as none.
    pub fn current(&self) -> Result<Option<Session>, SessionError> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .filter(|token| !token.trim().is_empty())
            .map(Session::new))
    }

    /// Like `current`, but a missing session is an error.
    pub fn require(&self) -> Result<Session, ApiError> {
        self.current()?.ok_or(ApiError::NotSignedIn)
    }

    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        self.store.remove(TOKEN_KEY)?;
        tracing::debug!("session token cleared");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
