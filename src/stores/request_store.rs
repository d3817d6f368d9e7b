use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::errors::InternalError;
use crate::types::db::request::{self, Entity as Request};
use crate::types::dto::request::CreateRequestPayload;
use crate::types::internal::status::RequestStatus;

/// RequestStore manages customer request rows
///
/// Requests are never deleted; staff only move them between statuses.
pub struct RequestStore {
    db: DatabaseConnection,
}

impl RequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persist a new customer request
    ///
    /// Status starts at `new` and both timestamps are set to the same
    /// creation instant.
    pub async fn insert(
        &self,
        payload: &CreateRequestPayload,
    ) -> Result<request::Model, InternalError> {
        let now = Utc::now().timestamp();

        request::ActiveModel {
            name: Set(payload.name.clone()),
            phone: Set(payload.phone.clone()),
            email: Set(payload.email.clone()),
            city_id: Set(payload.city_id),
            message: Set(payload.message.clone()),
            service_id: Set(payload.service_id),
            product_id: Set(payload.product_id),
            status: Set(RequestStatus::New.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_request", e))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<request::Model>, InternalError> {
        Request::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_request_by_id", e))
    }

    /// List requests, newest first, with optional city and status filters
    pub async fn list(
        &self,
        city_id: Option<i32>,
        status: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<request::Model>, InternalError> {
        let mut query = Request::find();

        if let Some(city_id) = city_id {
            query = query.filter(request::Column::CityId.eq(city_id));
        }

        if let Some(status) = status {
            query = query.filter(request::Column::Status.eq(status));
        }

        query
            .order_by_desc(request::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_requests", e))
    }

    /// Move a request to a new status, refreshing `updated_at`
    pub async fn update_status(
        &self,
        existing: request::Model,
        status: RequestStatus,
    ) -> Result<request::Model, InternalError> {
        let mut model: request::ActiveModel = existing.into();
        model.status = Set(status.as_str().to_string());
        model.updated_at = Set(Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_request_status", e))
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Request::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_requests", e))
    }

    pub async fn count_by_status(&self, status: RequestStatus) -> Result<u64, InternalError> {
        Request::find()
            .filter(request::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_requests_by_status", e))
    }
}
