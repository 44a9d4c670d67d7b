//! Diet table models
//!
//! A diet item declares the daily quantity of one feed item required per
//! adult animal of one species. `adult_count` is a denormalized snapshot of
//! the species' feed-eligible population, refreshed from the latest
//! population record on every write that can change it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One diet table row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DietItem {
    pub id: i32,
    pub species_id: i32,
    pub feed_item_id: i32,
    /// Daily quantity per adult animal, in the feed item's unit
    pub quantity: f64,
    /// Cached feed-eligible head count of the species
    pub adult_count: i32,
}

/// Diet row joined with its feed item for display
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct DietItemDetails {
    pub id: i32,
    pub species_id: i32,
    pub feed_item_id: i32,
    pub feed_item_name: String,
    pub unit_name: String,
    pub quantity: f64,
    pub adult_count: i32,
}

/// One entry of a diet replacement request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DietItemInput {
    #[serde(alias = "feedId")]
    pub feed_id: i32,
    pub quantity: f64,
}

/// Replace-all diet request for a species
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceDietRequest {
    #[serde(alias = "dietItems")]
    pub diet_items: Vec<DietItemInput>,
}

/// Update a single diet item (partial)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDietItem {
    pub quantity: Option<f64>,
    #[serde(alias = "feedId")]
    pub feed_id: Option<i32>,
}
