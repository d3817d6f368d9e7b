use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use super::common::default_true;
use crate::types::db::user;

/// Admin payload for creating a staff account
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Login name, unique across all users
    pub username: String,

    /// Contact email, unique across all users
    pub email: String,

    /// Plaintext password, hashed before persisting
    pub password: String,

    /// City the account is scoped to
    pub city_id: i32,

    /// Either "admin" or "manager"
    pub role: String,

    #[oai(default = "default_true")]
    pub is_active: bool,

    /// Telegram chat id for request notifications
    pub telegram_id: Option<String>,
}

/// Admin payload for updating a staff account (full replace)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,

    pub email: String,

    /// New plaintext password; omit to keep the current one
    pub password: Option<String>,

    pub city_id: i32,

    /// Either "admin" or "manager"
    pub role: String,

    pub is_active: bool,

    pub telegram_id: Option<String>,
}

/// Staff account as returned by the API (never includes the password hash)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub city_id: i32,
    pub role: String,
    pub is_active: bool,
    pub telegram_id: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            city_id: model.city_id,
            role: model.role,
            is_active: model.is_active,
            telegram_id: model.telegram_id,
        }
    }
}
