//! Registration and login orchestration
//!
//! Each operation is a single synchronous transaction over the injected
//! store; the service never retries or recovers from domain failures.

use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{hash_password, TokenService};
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::models::{Phone, RegisterRequest, User, UserResponse};
use crate::store::UserStore;
use crate::validation::{validate_email, validate_password};


/// Orchestrates credential validation, hashing, token issuance and the
/// user store to implement `register` and `login`.
pub struct UserService<S: UserStore> {
    store: S,
    tokens: Arc<TokenService>,
    clock: Arc<dyn Clock>,
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: S, tokens: Arc<TokenService>) -> Self {
        Self::with_clock(store, tokens, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, tokens: Arc<TokenService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            tokens,
            clock,
        }
    }

    /// Register a new user.
    ///
    /// Validates the credential formats, rejects duplicate emails, then
    /// persists a fresh record carrying a bcrypt hash and an issued token.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse> {
        if !validate_email(&request.email) {
            return Err(Error::InvalidEmailFormat);
        }
        if !validate_password(&request.password) {
            return Err(Error::InvalidPasswordFormat);
        }
        if self.store.find_by_email(&request.email).await?.is_some() {
            return Err(Error::UserAlreadyExists);
        }

        let now = self.clock.now();
        let token = self.tokens.issue(&request.email, now)?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            email: request.email,
            password_hash: hash_password(&request.password)?,
            created_at: now,
            last_login_at: now,
            is_active: true,
            token,
            phones: request.phones.into_iter().map(Phone::from).collect(),
        };

        // find/save is not atomic; a concurrent register for the same email
        // is decided by the store's uniqueness constraint instead.
        let saved = self.store.save(&user).await?;
        log::info!("registered user {}", saved.id);

        Ok(UserResponse::from(saved))
    }

    /// Log in with a bearer token, refreshing `last_login_at` and issuing a
    /// replacement token. The previous token stays valid until it expires.
    pub async fn login(&self, token: &str) -> Result<UserResponse> {
        let subject = self.tokens.extract_subject(token)?;

        let mut user = self
            .store
            .find_by_email(&subject)
            .await?
            .ok_or(Error::UserNotFound)?;

        if !self.tokens.verify(token, &user.email) {
            return Err(Error::InvalidOrExpiredToken);
        }

        let now = self.clock.now();
        user.last_login_at = now;
        user.token = self.tokens.issue(&user.email, now)?;

        let saved = self.store.save(&user).await?;
        log::debug!("login for user {}", saved.id);

        Ok(UserResponse::from(saved))
    }

    /// Look up a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.store.find_by_email(email).await
    }
}
