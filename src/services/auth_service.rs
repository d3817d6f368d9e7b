use std::sync::Arc;

use crate::errors::ApiError;
use crate::services::{crypto, TokenService};
use crate::stores::UserStore;
use crate::types::db::user;

/// Credential verification and bearer-token resolution
pub struct AuthService {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(user_store: Arc<UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }

    /// Verify a username/password pair and return the matching user
    ///
    /// An unknown username and a wrong password produce the same error so
    /// the response does not leak which part failed.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, ApiError> {
        let user = self.user_store.find_by_username(username).await?;

        match user {
            Some(user) if crypto::verify_password(password, &user.password_hash) => Ok(user),
            _ => Err(ApiError::unauthenticated("Incorrect username or password")),
        }
    }

    /// Resolve a bearer token to its user row
    ///
    /// Fails with `Unauthenticated` when the token is malformed, expired,
    /// wrongly signed, or references a user that no longer exists.
    pub async fn resolve(&self, token: &str) -> Result<user::Model, ApiError> {
        let claims = self.token_service.decode(token)?;

        self.user_store
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| ApiError::unauthenticated("Could not validate credentials"))
    }
}
