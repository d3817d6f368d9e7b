//! Authorization policy
//!
//! All role and city-scope decisions live here so handlers state intent
//! instead of repeating role comparisons.

use crate::errors::ApiError;
use crate::types::db::user;

/// Require the actor to hold the admin role
pub fn require_admin(actor: &user::Model) -> Result<(), ApiError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ApiError::forbidden("Not enough permissions"))
    }
}

/// Whether the actor may act on an optionally city-scoped entity
///
/// Admins always may. A `None` scope (global entity) is accessible to any
/// actor; a concrete city only to actors assigned to that city.
pub fn can_access_scope(actor: &user::Model, city_id: Option<i32>) -> bool {
    actor.is_admin() || city_id.map_or(true, |id| id == actor.city_id)
}

/// Whether the actor may act on an entity owned by a specific city
pub fn can_access_city(actor: &user::Model, city_id: i32) -> bool {
    actor.is_admin() || city_id == actor.city_id
}
