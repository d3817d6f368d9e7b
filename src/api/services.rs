use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{policy, AuthService};
use crate::stores::ServiceStore;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::service::{ServicePayload, ServiceResponse};

/// Service catalog API endpoints; mirrors the product catalog
pub struct ServiceApi {
    service_store: Arc<ServiceStore>,
    auth_service: Arc<AuthService>,
}

impl ServiceApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            service_store: app_data.service_store.clone(),
            auth_service: app_data.auth_service.clone(),
        }
    }
}

/// API tags for service endpoints
#[derive(Tags)]
enum ServiceTags {
    /// Service catalog
    Services,
}

#[OpenApi]
impl ServiceApi {
    /// List available services, optionally filtered by city
    #[oai(path = "/services", method = "get", tag = "ServiceTags::Services")]
    pub async fn list_services(
        &self,
        city_id: Query<Option<i32>>,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<ServiceResponse>>, ApiError> {
        let services = self
            .service_store
            .list_available(city_id.0, skip.0.unwrap_or(0), limit.0.unwrap_or(100))
            .await?;

        Ok(Json(
            services.into_iter().map(ServiceResponse::from).collect(),
        ))
    }

    /// Get a service by id
    #[oai(path = "/services/:service_id", method = "get", tag = "ServiceTags::Services")]
    pub async fn get_service(&self, service_id: Path<i32>) -> Result<Json<ServiceResponse>, ApiError> {
        let service = self
            .service_store
            .find_by_id(service_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Service not found"))?;

        Ok(Json(ServiceResponse::from(service)))
    }

    /// Create a service (admin or manager of the owning city)
    #[oai(path = "/services", method = "post", tag = "ServiceTags::Services")]
    pub async fn create_service(
        &self,
        auth: BearerAuth,
        body: Json<ServicePayload>,
    ) -> Result<Json<ServiceResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;

        if !policy::can_access_scope(&actor, body.city_id) {
            return Err(ApiError::forbidden("Not enough permissions for this city"));
        }

        let service = self.service_store.insert(&body.0).await?;

        Ok(Json(ServiceResponse::from(service)))
    }

    /// Update a service (full replace)
    #[oai(path = "/services/:service_id", method = "put", tag = "ServiceTags::Services")]
    pub async fn update_service(
        &self,
        auth: BearerAuth,
        service_id: Path<i32>,
        body: Json<ServicePayload>,
    ) -> Result<Json<ServiceResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;

        let existing = self
            .service_store
            .find_by_id(service_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Service not found"))?;

        if !policy::can_access_scope(&actor, existing.city_id) {
            return Err(ApiError::forbidden(
                "Not enough permissions for this service",
            ));
        }

        if !policy::can_access_scope(&actor, body.city_id) {
            return Err(ApiError::forbidden("Cannot assign service to another city"));
        }

        let service = self.service_store.update(existing, &body.0).await?;

        Ok(Json(ServiceResponse::from(service)))
    }

    /// Delete a service
    #[oai(path = "/services/:service_id", method = "delete", tag = "ServiceTags::Services")]
    pub async fn delete_service(
        &self,
        auth: BearerAuth,
        service_id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;

        let existing = self
            .service_store
            .find_by_id(service_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Service not found"))?;

        if !policy::can_access_scope(&actor, existing.city_id) {
            return Err(ApiError::forbidden(
                "Not enough permissions for this service",
            ));
        }

        self.service_store.delete(existing).await?;

        Ok(Json(MessageResponse {
            detail: "Service deleted successfully".to_string(),
        }))
    }
}
