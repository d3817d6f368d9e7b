use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{crypto, policy, AuthService, TokenService};
use crate::stores::UserStore;
use crate::types::dto::auth::{LoginRequest, TokenResponse};
use crate::types::dto::user::{CreateUserRequest, UserResponse};
use crate::types::internal::role::Role;

/// Authentication API endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
    token_service: Arc<TokenService>,
    user_store: Arc<UserStore>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_service: app_data.auth_service.clone(),
            token_service: app_data.token_service.clone(),
            user_store: app_data.user_store.clone(),
        }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT")]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi]
impl AuthApi {
    /// Login with username and password to receive an access token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    pub async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, ApiError> {
        let user = self
            .auth_service
            .authenticate(&body.username, &body.password)
            .await?;

        let access_token = self.token_service.issue(&user)?;

        Ok(Json(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        }))
    }

    /// Create a staff account (admin only)
    #[oai(path = "/users", method = "post", tag = "AuthTags::Authentication")]
    pub async fn create_user(
        &self,
        auth: BearerAuth,
        body: Json<CreateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;
        policy::require_admin(&actor)?;

        if Role::parse(&body.role).is_none() {
            return Err(ApiError::invalid_input(
                "Invalid role. Valid options: admin, manager",
            ));
        }

        if self
            .user_store
            .find_by_username(&body.username)
            .await?
            .is_some()
        {
            return Err(ApiError::conflict("Username already registered"));
        }

        if self.user_store.find_by_email(&body.email).await?.is_some() {
            return Err(ApiError::conflict("Email already registered"));
        }

        let password_hash = crypto::hash_password(&body.password)?;
        let user = self.user_store.insert(&body.0, password_hash).await?;

        Ok(Json(UserResponse::from(user)))
    }
}
