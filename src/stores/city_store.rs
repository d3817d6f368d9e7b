use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::errors::InternalError;
use crate::types::db::city::{self, Entity as City};
use crate::types::dto::city::CityPayload;

/// CityStore manages city rows
pub struct CityStore {
    db: DatabaseConnection,
}

impl CityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List cities, optionally restricted to active ones
    pub async fn list(&self, active_only: bool) -> Result<Vec<city::Model>, InternalError> {
        let mut query = City::find();

        if active_only {
            query = query.filter(city::Column::Active.eq(true));
        }

        query
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_cities", e))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<city::Model>, InternalError> {
        City::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_city_by_id", e))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<city::Model>, InternalError> {
        City::find()
            .filter(city::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_city_by_name", e))
    }

    pub async fn insert(&self, payload: &CityPayload) -> Result<city::Model, InternalError> {
        city::ActiveModel {
            name: Set(payload.name.clone()),
            active: Set(payload.active),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_city", e))
    }

    /// Overwrite every payload field of an existing city (full replace)
    pub async fn update(
        &self,
        existing: city::Model,
        payload: &CityPayload,
    ) -> Result<city::Model, InternalError> {
        let mut model: city::ActiveModel = existing.into();
        model.name = Set(payload.name.clone());
        model.active = Set(payload.active);

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_city", e))
    }

    pub async fn delete(&self, existing: city::Model) -> Result<(), InternalError> {
        let model: city::ActiveModel = existing.into();
        model
            .delete(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_city", e))?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        City::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_cities", e))
    }
}
