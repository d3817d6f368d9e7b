use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use super::common::default_true;
use crate::types::db::city;

/// City payload used by create and update (full replace)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CityPayload {
    /// City name, unique across all cities
    pub name: String,

    /// Whether the city is shown in public listings
    #[oai(default = "default_true")]
    pub active: bool,
}

/// City as returned by the API
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CityResponse {
    pub id: i32,
    pub name: String,
    pub active: bool,
}

impl From<city::Model> for CityResponse {
    fn from(model: city::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            active: model.active,
        }
    }
}
