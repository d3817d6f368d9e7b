use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::errors::InternalError;
use crate::types::db::user::{self, Entity as User};
use crate::types::dto::user::{CreateUserRequest, UpdateUserRequest};

/// UserStore manages staff account rows
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    /// Insert a new staff account with an already-hashed password
    pub async fn insert(
        &self,
        payload: &CreateUserRequest,
        password_hash: String,
    ) -> Result<user::Model, InternalError> {
        user::ActiveModel {
            username: Set(payload.username.clone()),
            email: Set(payload.email.clone()),
            password_hash: Set(password_hash),
            city_id: Set(payload.city_id),
            role: Set(payload.role.clone()),
            is_active: Set(payload.is_active),
            telegram_id: Set(payload.telegram_id.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_user", e))
    }

    /// Overwrite an existing account; the password hash is replaced only
    /// when a new one is supplied
    pub async fn update(
        &self,
        existing: user::Model,
        payload: &UpdateUserRequest,
        password_hash: Option<String>,
    ) -> Result<user::Model, InternalError> {
        let mut model: user::ActiveModel = existing.into();
        model.username = Set(payload.username.clone());
        model.email = Set(payload.email.clone());
        model.city_id = Set(payload.city_id);
        model.role = Set(payload.role.clone());
        model.is_active = Set(payload.is_active);
        model.telegram_id = Set(payload.telegram_id.clone());
        if let Some(password_hash) = password_hash {
            model.password_hash = Set(password_hash);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_user", e))
    }

    pub async fn delete(&self, existing: user::Model) -> Result<(), InternalError> {
        let model: user::ActiveModel = existing.into();
        model
            .delete(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        User::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users", e))
    }
}
