use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Set,
};

use crate::errors::InternalError;
use crate::types::db::service::{self, Entity as Service};
use crate::types::dto::service::ServicePayload;

/// ServiceStore manages catalog service rows
pub struct ServiceStore {
    db: DatabaseConnection,
}

impl ServiceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List available services; same city-or-global union rule as products
    pub async fn list_available(
        &self,
        city_id: Option<i32>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<service::Model>, InternalError> {
        let mut query = Service::find().filter(service::Column::IsAvailable.eq(true));

        if let Some(city_id) = city_id {
            query = query.filter(
                Condition::any()
                    .add(service::Column::CityId.eq(city_id))
                    .add(service::Column::CityId.is_null()),
            );
        }

        query
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_services", e))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<service::Model>, InternalError> {
        Service::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_service_by_id", e))
    }

    pub async fn insert(&self, payload: &ServicePayload) -> Result<service::Model, InternalError> {
        service::ActiveModel {
            name: Set(payload.name.clone()),
            description: Set(payload.description.clone()),
            price: Set(payload.price),
            estimated_time: Set(payload.estimated_time.clone()),
            is_available: Set(payload.is_available),
            city_id: Set(payload.city_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_service", e))
    }

    /// Overwrite every payload field of an existing service (full replace)
    pub async fn update(
        &self,
        existing: service::Model,
        payload: &ServicePayload,
    ) -> Result<service::Model, InternalError> {
        let mut model: service::ActiveModel = existing.into();
        model.name = Set(payload.name.clone());
        model.description = Set(payload.description.clone());
        model.price = Set(payload.price);
        model.estimated_time = Set(payload.estimated_time.clone());
        model.is_available = Set(payload.is_available);
        model.city_id = Set(payload.city_id);

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_service", e))
    }

    pub async fn delete(&self, existing: service::Model) -> Result<(), InternalError> {
        let model: service::ActiveModel = existing.into();
        model
            .delete(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_service", e))?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Service::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_services", e))
    }
}
