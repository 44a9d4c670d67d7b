//! Feed catalog models (units, categories, items)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Measurement unit for feed quantities (kg, litre, piece, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeedUnit {
    pub id: i32,
    pub name: String,
}

/// Feed classification (fodder, meat, supplement, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeedCategory {
    pub id: i32,
    pub name: String,
}

/// A purchasable feed item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeedItem {
    pub id: i32,
    pub name: String,
    /// Estimated price per unit, in whole currency units
    pub estimated_price: i32,
    pub unit_id: i32,
    pub feed_category_id: i32,
    /// Which animal category this feed applies to
    pub animal_category_id: i32,
}

/// Create feed item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFeedItem {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[serde(alias = "estimatedPrice")]
    #[validate(range(min = 0, message = "estimated_price must not be negative"))]
    pub estimated_price: i32,
    #[serde(alias = "unitId")]
    pub unit_id: i32,
    #[serde(alias = "categoryId")]
    pub feed_category_id: i32,
    #[serde(alias = "animalCategoryId")]
    pub animal_category_id: i32,
}

/// Update feed item request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFeedItem {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    #[serde(alias = "estimatedPrice")]
    #[validate(range(min = 0, message = "estimated_price must not be negative"))]
    pub estimated_price: Option<i32>,
    #[serde(alias = "unitId")]
    pub unit_id: Option<i32>,
    #[serde(alias = "categoryId")]
    pub feed_category_id: Option<i32>,
    #[serde(alias = "animalCategoryId")]
    pub animal_category_id: Option<i32>,
}
