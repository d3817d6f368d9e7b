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
use crate::stores::CityStore;
use crate::types::dto::city::{CityPayload, CityResponse};
use crate::types::dto::common::MessageResponse;

/// City administration API endpoints
pub struct CityApi {
    city_store: Arc<CityStore>,
    auth_service: Arc<AuthService>,
}

impl CityApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            city_store: app_data.city_store.clone(),
            auth_service: app_data.auth_service.clone(),
        }
    }
}

/// API tags for city endpoints
#[derive(Tags)]
enum CityTags {
    /// City management
    Cities,
}

#[OpenApi]
impl CityApi {
    /// List cities, optionally including inactive ones
    #[oai(path = "/cities", method = "get", tag = "CityTags::Cities")]
    pub async fn list_cities(
        &self,
        active: Query<Option<bool>>,
    ) -> Result<Json<Vec<CityResponse>>, ApiError> {
        let cities = self.city_store.list(active.0.unwrap_or(true)).await?;

        Ok(Json(cities.into_iter().map(CityResponse::from).collect()))
    }

    /// Get a city by id
    #[oai(path = "/cities/:city_id", method = "get", tag = "CityTags::Cities")]
    pub async fn get_city(&self, city_id: Path<i32>) -> Result<Json<CityResponse>, ApiError> {
        let city = self
            .city_store
            .find_by_id(city_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("City not found"))?;

        Ok(Json(CityResponse::from(city)))
    }

    /// Create a new city (admin only)
    #[oai(path = "/cities", method = "post", tag = "CityTags::Cities")]
    pub async fn create_city(
        &self,
        auth: BearerAuth,
        body: Json<CityPayload>,
    ) -> Result<Json<CityResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;
        policy::require_admin(&actor)?;

        if self.city_store.find_by_name(&body.name).await?.is_some() {
            return Err(ApiError::conflict("City already exists"));
        }

        let city = self.city_store.insert(&body.0).await?;

        Ok(Json(CityResponse::from(city)))
    }

    /// Update a city (admin only, full replace)
    #[oai(path = "/cities/:city_id", method = "put", tag = "CityTags::Cities")]
    pub async fn update_city(
        &self,
        auth: BearerAuth,
        city_id: Path<i32>,
        body: Json<CityPayload>,
    ) -> Result<Json<CityResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;
        policy::require_admin(&actor)?;

        let existing = self
            .city_store
            .find_by_id(city_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("City not found"))?;

        if body.name != existing.name && self.city_store.find_by_name(&body.name).await?.is_some() {
            return Err(ApiError::conflict("City already exists"));
        }

        let city = self.city_store.update(existing, &body.0).await?;

        Ok(Json(CityResponse::from(city)))
    }

    /// Delete a city (admin only)
    #[oai(path = "/cities/:city_id", method = "delete", tag = "CityTags::Cities")]
    pub async fn delete_city(
        &self,
        auth: BearerAuth,
        city_id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;
        policy::require_admin(&actor)?;

        let existing = self
            .city_store
            .find_by_id(city_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("City not found"))?;

        self.city_store.delete(existing).await?;

        Ok(Json(MessageResponse {
            detail: "City deleted successfully".to_string(),
        }))
    }
}
