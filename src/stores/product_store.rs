use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Set,
};

use crate::errors::InternalError;
use crate::types::db::product::{self, Entity as Product};
use crate::types::dto::product::ProductPayload;

/// ProductStore manages catalog product rows
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List available products for the public catalog
    ///
    /// With a city filter the result is the union of products scoped to
    /// that city and products with no city (available everywhere).
    pub async fn list_available(
        &self,
        city_id: Option<i32>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<product::Model>, InternalError> {
        let mut query = Product::find().filter(product::Column::IsAvailable.eq(true));

        if let Some(city_id) = city_id {
            query = query.filter(
                Condition::any()
                    .add(product::Column::CityId.eq(city_id))
                    .add(product::Column::CityId.is_null()),
            );
        }

        query
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_products", e))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<product::Model>, InternalError> {
        Product::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_product_by_id", e))
    }

    pub async fn insert(&self, payload: &ProductPayload) -> Result<product::Model, InternalError> {
        product::ActiveModel {
            name: Set(payload.name.clone()),
            description: Set(payload.description.clone()),
            price: Set(payload.price),
            image_url: Set(payload.image_url.clone()),
            is_available: Set(payload.is_available),
            city_id: Set(payload.city_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_product", e))
    }

    /// Overwrite every payload field of an existing product (full replace)
    pub async fn update(
        &self,
        existing: product::Model,
        payload: &ProductPayload,
    ) -> Result<product::Model, InternalError> {
        let mut model: product::ActiveModel = existing.into();
        model.name = Set(payload.name.clone());
        model.description = Set(payload.description.clone());
        model.price = Set(payload.price);
        model.image_url = Set(payload.image_url.clone());
        model.is_available = Set(payload.is_available);
        model.city_id = Set(payload.city_id);

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_product", e))
    }

    pub async fn delete(&self, existing: product::Model) -> Result<(), InternalError> {
        let model: product::ActiveModel = existing.into();
        model
            .delete(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_product", e))?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Product::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_products", e))
    }
}
