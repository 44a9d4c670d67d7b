//! Animal category and species models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::ScheduleTag;

/// Animal category (reference data), e.g. "Carnivores"
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AnimalCategory {
    pub id: i32,
    pub name: String,
    /// Weekly fasting day for the category (0 = Sunday .. 6 = Saturday)
    pub fasting_day: Option<i16>,
}

/// Create animal category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAnimalCategory {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    /// Weekly fasting day (0 = Sunday .. 6 = Saturday), omit for none
    #[validate(range(min = 0, max = 6, message = "fasting_day must be between 0 and 6"))]
    pub fasting_day: Option<i16>,
}

/// Update animal category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAnimalCategory {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 6, message = "fasting_day must be between 0 and 6"))]
    pub fasting_day: Option<i16>,
}

/// Animal species record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AnimalSpecies {
    pub id: i32,
    pub category_id: i32,
    pub common_name: String,
    pub scientific_name: Option<String>,
    /// Zoo schedule tag (i/ii/iii)
    pub schedule: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create species request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAnimalSpecies {
    #[serde(alias = "commonName")]
    #[validate(length(min = 1, max = 150, message = "common_name must be 1-150 characters"))]
    pub common_name: String,
    #[serde(alias = "scientificName")]
    #[validate(length(max = 255, message = "scientific_name must be at most 255 characters"))]
    pub scientific_name: Option<String>,
    #[serde(alias = "categoryId")]
    pub category_id: i32,
    pub schedule: Option<ScheduleTag>,
    pub active: Option<bool>,
}

/// Update species request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAnimalSpecies {
    #[serde(alias = "commonName")]
    #[validate(length(min = 1, max = 150, message = "common_name must be 1-150 characters"))]
    pub common_name: Option<String>,
    #[serde(alias = "scientificName")]
    #[validate(length(max = 255, message = "scientific_name must be at most 255 characters"))]
    pub scientific_name: Option<String>,
    #[serde(alias = "categoryId")]
    pub category_id: Option<i32>,
    pub schedule: Option<ScheduleTag>,
    pub active: Option<bool>,
}

/// Species enriched with its latest population counts (closing group)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpeciesWithPopulation {
    pub animal: AnimalSpecies,
    pub male_count: i32,
    pub female_count: i32,
    pub underage_count: i32,
    pub total_count: i32,
    /// Feed-eligible head count (male + female)
    pub adult_count: i32,
}
