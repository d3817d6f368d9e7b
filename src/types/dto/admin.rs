use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Row counts per entity type
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EntityTotals {
    pub products: u64,
    pub services: u64,
    pub requests: u64,
    pub users: u64,
    pub cities: u64,
}

/// Request counts per lifecycle status
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RequestCounts {
    pub new: u64,
    pub processing: u64,
    pub completed: u64,
    pub cancelled: u64,
}

/// Aggregate system statistics for the admin dashboard
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total: EntityTotals,
    pub requests: RequestCounts,
}
