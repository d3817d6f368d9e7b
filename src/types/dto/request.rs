use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::request;

/// Customer-facing payload for submitting a new request
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateRequestPayload {
    /// Customer name
    pub name: String,

    /// Contact phone number
    pub phone: String,

    /// Optional contact email
    pub email: Option<String>,

    /// City the request belongs to
    pub city_id: i32,

    /// Free-text description of the problem
    pub message: String,

    /// Optional reference to a catalog service
    pub service_id: Option<i32>,

    /// Optional reference to a catalog product
    pub product_id: Option<i32>,
}

/// Staff payload for moving a request to a new status
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RequestStatusUpdate {
    /// One of: new, processing, completed, cancelled
    pub status: String,
}

/// Request as returned by the API
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RequestResponse {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub city_id: i32,
    pub message: String,
    pub service_id: Option<i32>,
    pub product_id: Option<i32>,
    pub status: String,

    /// Creation time (Unix timestamp)
    pub created_at: i64,

    /// Last mutation time (Unix timestamp)
    pub updated_at: i64,
}

impl From<request::Model> for RequestResponse {
    fn from(model: request::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone,
            email: model.email,
            city_id: model.city_id,
            message: model.message,
            service_id: model.service_id,
            product_id: model.product_id,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
