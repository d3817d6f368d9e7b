use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use super::common::default_true;
use crate::types::db::service;

/// Service payload used by create and update (full replace)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ServicePayload {
    pub name: String,

    pub description: String,

    pub price: f64,

    /// Free-form duration estimate, e.g. "2-3 days"
    pub estimated_time: String,

    /// Only available services appear in public listings
    #[oai(default = "default_true")]
    pub is_available: bool,

    /// Owning city; null means available in every city
    pub city_id: Option<i32>,
}

/// Service as returned by the API
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub estimated_time: String,
    pub is_available: bool,
    pub city_id: Option<i32>,
}

impl From<service::Model> for ServiceResponse {
    fn from(model: service::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            estimated_time: model.estimated_time,
            is_available: model.is_available,
            city_id: model.city_id,
        }
    }
}
