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
use crate::stores::ProductStore;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::product::{ProductPayload, ProductResponse};

/// Product catalog API endpoints
pub struct ProductApi {
    product_store: Arc<ProductStore>,
    auth_service: Arc<AuthService>,
}

impl ProductApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            product_store: app_data.product_store.clone(),
            auth_service: app_data.auth_service.clone(),
        }
    }
}

/// API tags for product endpoints
#[derive(Tags)]
enum ProductTags {
    /// Product catalog
    Products,
}

#[OpenApi]
impl ProductApi {
    /// List available products, optionally filtered by city
    ///
    /// A city filter returns products scoped to that city plus products
    /// available in every city.
    #[oai(path = "/products", method = "get", tag = "ProductTags::Products")]
    pub async fn list_products(
        &self,
        city_id: Query<Option<i32>>,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<ProductResponse>>, ApiError> {
        let products = self
            .product_store
            .list_available(city_id.0, skip.0.unwrap_or(0), limit.0.unwrap_or(100))
            .await?;

        Ok(Json(
            products.into_iter().map(ProductResponse::from).collect(),
        ))
    }

    /// Get a product by id
    #[oai(path = "/products/:product_id", method = "get", tag = "ProductTags::Products")]
    pub async fn get_product(&self, product_id: Path<i32>) -> Result<Json<ProductResponse>, ApiError> {
        let product = self
            .product_store
            .find_by_id(product_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Product not found"))?;

        Ok(Json(ProductResponse::from(product)))
    }

    /// Create a product (admin or manager of the owning city)
    #[oai(path = "/products", method = "post", tag = "ProductTags::Products")]
    pub async fn create_product(
        &self,
        auth: BearerAuth,
        body: Json<ProductPayload>,
    ) -> Result<Json<ProductResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;

        if !policy::can_access_scope(&actor, body.city_id) {
            return Err(ApiError::forbidden("Not enough permissions for this city"));
        }

        let product = self.product_store.insert(&body.0).await?;

        Ok(Json(ProductResponse::from(product)))
    }

    /// Update a product (full replace)
    #[oai(path = "/products/:product_id", method = "put", tag = "ProductTags::Products")]
    pub async fn update_product(
        &self,
        auth: BearerAuth,
        product_id: Path<i32>,
        body: Json<ProductPayload>,
    ) -> Result<Json<ProductResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;

        let existing = self
            .product_store
            .find_by_id(product_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Product not found"))?;

        if !policy::can_access_scope(&actor, existing.city_id) {
            return Err(ApiError::forbidden(
                "Not enough permissions for this product",
            ));
        }

        if !policy::can_access_scope(&actor, body.city_id) {
            return Err(ApiError::forbidden("Cannot assign product to another city"));
        }

        let product = self.product_store.update(existing, &body.0).await?;

        Ok(Json(ProductResponse::from(product)))
    }

    /// Delete a product
    #[oai(path = "/products/:product_id", method = "delete", tag = "ProductTags::Products")]
    pub async fn delete_product(
        &self,
        auth: BearerAuth,
        product_id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let actor = self.auth_service.resolve(&auth.0.token).await?;

        let existing = self
            .product_store
            .find_by_id(product_id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Product not found"))?;

        if !policy::can_access_scope(&actor, existing.city_id) {
            return Err(ApiError::forbidden(
                "Not enough permissions for this product",
            ));
        }

        self.product_store.delete(existing).await?;

        Ok(Json(MessageResponse {
            detail: "Product deleted successfully".to_string(),
        }))
    }
}
