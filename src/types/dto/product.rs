use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use super::common::default_true;
use crate::types::db::product;

/// Product payload used by create and update (full replace)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,

    pub description: String,

    pub price: f64,

    /// Optional link to a product image
    pub image_url: Option<String>,

    /// Only available products appear in public listings
    #[oai(default = "default_true")]
    pub is_available: bool,

    /// Owning city; null means available in every city
    pub city_id: Option<i32>,
}

/// Product as returned by the API
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub city_id: Option<i32>,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            image_url: model.image_url,
            is_available: model.is_available,
            city_id: model.city_id,
        }
    }
}
