use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{crypto, policy, AuthService};
use crate::stores::{CityStore, ProductStore, RequestStore, ServiceStore, UserStore};
use crate::types::dto::admin::{EntityTotals, RequestCounts, StatsResponse};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::user::{UpdateUserRequest, UserResponse};
use crate::types::internal::role::Role;
use crate::types::internal::status::RequestStatus;

/// Admin API endpoints: staff administration and aggregate statistics
pub struct AdminApi {
    user_store: Arc<UserStore>,
    city_store: Arc<CityStore>,
    product_store: Arc<ProductStore>,
    service_store: Arc<ServiceStore>,
    request_store: Arc<RequestStore>,
    auth_service: Arc<AuthService>,
}

impl AdminApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            city_store: app_data.city_store.clone(),
            product_store: app_data.product_store.clone(),
            service_store: app_data.service_store.clone(),
            request_store: app_data.request_store.clone(),
            auth_service: app_data.auth_service.clone(),
        }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Staff administration
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List all staff accounts
    #[oai(path = "/users", method = "get", tag = "AdminTags::Admin")]
    pub async fn list_users(&self, auth: BearerAuth) -> Result<Json<Vec<UserResponse>>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;
        policy::require_admin(&actor)?;

        let users = self.user_store.list().await?;

        Ok(Json(users.into_iter().map(UserResponse::from).collect()))
    }

    /// Get a staff account by id
    #[oai(path = "/users/:user_id", method = "get", tag = "AdminTags::Admin")]
    pub async fn get_user(
        &self,
        auth: BearerAuth,
        user_id: Path<i32>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;
        policy::require_admin(&actor)?;

        let user = self
            .user_store
            .find_by_id(user_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        Ok(Json(UserResponse::from(user)))
    }

    /// Update a staff account
    ///
    /// Full replace; the password is re-hashed only when a new one is
    /// supplied. Changed usernames and emails are checked for collisions.
    #[oai(path = "/users/:user_id", method = "put", tag = "AdminTags::Admin")]
    pub async fn update_user(
        &self,
        auth: BearerAuth,
        user_id: Path<i32>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;
        policy::require_admin(&actor)?;

        let existing = self
            .user_store
            .find_by_id(user_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        if body.username != existing.username
            && self
                .user_store
                .find_by_username(&body.username)
                .await?
                .is_some()
        {
            return Err(ApiError::conflict("Username already registered"));
        }

        if body.email != existing.email
            && self.user_store.find_by_email(&body.email).await?.is_some()
        {
            return Err(ApiError::conflict("Email already registered"));
        }

        if Role::parse(&body.role).is_none() {
            return Err(ApiError::invalid_input(
                "Invalid role. Valid options: admin, manager",
            ));
        }

        let password_hash = match &body.password {
            Some(password) => Some(crypto::hash_password(password)?),
            None => None,
        };

        let user = self
            .user_store
            .update(existing, &body.0, password_hash)
            .await?;

        Ok(Json(UserResponse::from(user)))
    }

    /// Delete a staff account
    ///
    /// Admins cannot delete their own account.
    #[oai(path = "/users/:user_id", method = "delete", tag = "AdminTags::Admin")]
    pub async fn delete_user(
        &self,
        auth: BearerAuth,
        user_id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;
        policy::require_admin(&actor)?;

        if user_id.0 == actor.id {
            return Err(ApiError::invalid_operation("Cannot delete yourself"));
        }

        let existing = self
            .user_store
            .find_by_id(user_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        self.user_store.delete(existing).await?;

        Ok(Json(MessageResponse {
            detail: "User deleted successfully".to_string(),
        }))
    }

    /// Aggregate system statistics
    #[oai(path = "/stats", method = "get", tag = "AdminTags::Admin")]
    pub async fn stats(&self, auth: BearerAuth) -> Result<Json<StatsResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;
        policy::require_admin(&actor)?;

        let total = EntityTotals {
            products: self.product_store.count().await?,
            services: self.service_store.count().await?,
            requests: self.request_store.count().await?,
            users: self.user_store.count().await?,
            cities: self.city_store.count().await?,
        };

        let requests = RequestCounts {
            new: self
                .request_store
                .count_by_status(RequestStatus::New)
                .await?,
            processing: self
                .request_store
                .count_by_status(RequestStatus::Processing)
                .await?,
            completed: self
                .request_store
                .count_by_status(RequestStatus::Completed)
                .await?,
            cancelled: self
                .request_store
                .count_by_status(RequestStatus::Cancelled)
                .await?,
        };

        Ok(Json(StatsResponse { total, requests }))
    }
}
