use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::{policy, AuthService, Notifier};
use crate::stores::{CityStore, ProductStore, RequestStore, ServiceStore};
use crate::types::dto::request::{CreateRequestPayload, RequestResponse, RequestStatusUpdate};
use crate::types::internal::status::RequestStatus;

/// Customer request API endpoints
pub struct RequestApi {
    request_store: Arc<RequestStore>,
    city_store: Arc<CityStore>,
    product_store: Arc<ProductStore>,
    service_store: Arc<ServiceStore>,
    auth_service: Arc<AuthService>,
    notifier: Arc<Notifier>,
}

impl RequestApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            request_store: app_data.request_store.clone(),
            city_store: app_data.city_store.clone(),
            product_store: app_data.product_store.clone(),
            service_store: app_data.service_store.clone(),
            auth_service: app_data.auth_service.clone(),
            notifier: app_data.notifier.clone(),
        }
    }
}

/// API tags for request endpoints
#[derive(Tags)]
enum RequestTags {
    /// Customer requests
    Requests,
}

#[OpenApi]
impl RequestApi {
    /// Submit a new customer request (public)
    ///
    /// Persists the request and schedules manager notifications to run
    /// after the response; the caller never waits for delivery and gets
    /// no indication of notification success or failure.
    #[oai(path = "/requests", method = "post", tag = "RequestTags::Requests")]
    pub async fn create_request(
        &self,
        body: Json<CreateRequestPayload>,
    ) -> Result<Json<RequestResponse>, ApiError> {
        if self.city_store.find_by_id(body.city_id).await?.is_none() {
            return Err(ApiError::not_found("City not found"));
        }

        if let Some(service_id) = body.service_id {
            if self.service_store.find_by_id(service_id).await?.is_none() {
                return Err(ApiError::not_found("Service not found"));
            }
        }

        if let Some(product_id) = body.product_id {
            if self.product_store.find_by_id(product_id).await?.is_none() {
                return Err(ApiError::not_found("Product not found"));
            }
        }

        let request = self.request_store.insert(&body.0).await?;

        // Fire-and-forget fan-out, detached from the response path
        let notifier = self.notifier.clone();
        let request_id = request.id;
        tokio::spawn(async move {
            notifier.notify_managers(request_id).await;
        });

        Ok(Json(RequestResponse::from(request)))
    }

    /// List requests (staff only)
    ///
    /// Admins may filter by any city; managers always see their own city
    /// regardless of the requested filter. Newest first.
    #[oai(path = "/requests", method = "get", tag = "RequestTags::Requests")]
    pub async fn list_requests(
        &self,
        auth: BearerAuth,
        city_id: Query<Option<i32>>,
        status: Query<Option<String>>,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<RequestResponse>>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;

        let city_filter = if actor.is_admin() {
            city_id.0
        } else {
            Some(actor.city_id)
        };

        let requests = self
            .request_store
            .list(
                city_filter,
                status.0.as_deref(),
                skip.0.unwrap_or(0),
                limit.0.unwrap_or(100),
            )
            .await?;

        Ok(Json(
            requests.into_iter().map(RequestResponse::from).collect(),
        ))
    }

    /// Get a request by id (staff only, city-scoped)
    #[oai(path = "/requests/:request_id", method = "get", tag = "RequestTags::Requests")]
    pub async fn get_request(
        &self,
        auth: BearerAuth,
        request_id: Path<i32>,
    ) -> Result<Json<RequestResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;

        let request = self
            .request_store
            .find_by_id(request_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Request not found"))?;

        if !policy::can_access_city(&actor, request.city_id) {
            return Err(ApiError::forbidden(
                "Not enough permissions to view this request",
            ));
        }

        Ok(Json(RequestResponse::from(request)))
    }

    /// Update a request's status (staff only, city-scoped)
    #[oai(path = "/requests/:request_id", method = "put", tag = "RequestTags::Requests")]
    pub async fn update_request_status(
        &self,
        auth: BearerAuth,
        request_id: Path<i32>,
        body: Json<RequestStatusUpdate>,
    ) -> Result<Json<RequestResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;

        let existing = self
            .request_store
            .find_by_id(request_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Request not found"))?;

        if !policy::can_access_city(&actor, existing.city_id) {
            return Err(ApiError::forbidden(
                "Not enough permissions to update this request",
            ));
        }

        let status = RequestStatus::parse(&body.status).ok_or_else(|| {
            ApiError::invalid_input(
                "Invalid status. Valid options: new, processing, completed, cancelled",
            )
        })?;

        let request = self.request_store.update_status(existing, status).await?;

        Ok(Json(RequestResponse::from(request)))
    }
}
