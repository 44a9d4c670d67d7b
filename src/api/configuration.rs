//! Reference-data configuration endpoint
//!
//! Bundles the lookup data the data-entry forms need: feed units, feed
//! items, categories, the fasting-day choices and the schedule tags.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        animal::AnimalCategory,
        enums::{DayChoice, ScheduleTag, FASTING_DAY_CHOICES, SCHEDULE_TAGS},
        feed::{FeedCategory, FeedItem, FeedUnit},
    },
};

/// One schedule tag with its display label
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleChoice {
    pub code: ScheduleTag,
    pub label: String,
}

/// Reference data bundle for the data-entry forms
#[derive(Serialize, ToSchema)]
pub struct ConfigurationResponse {
    pub feed_units: Vec<FeedUnit>,
    pub feed_items: Vec<FeedItem>,
    pub animal_categories: Vec<AnimalCategory>,
    pub feed_categories: Vec<FeedCategory>,
    pub week_days: Vec<DayChoice>,
    pub schedules: Vec<ScheduleChoice>,
}

/// Get the reference-data configuration bundle
#[utoipa::path(
    get,
    path = "/configuration",
    tag = "configuration",
    responses(
        (status = 200, description = "Reference data", body = ConfigurationResponse)
    )
)]
pub async fn get_configuration(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ConfigurationResponse>> {
    let feed_units = state.services.catalog.list_units().await?;
    let feed_items = state.services.catalog.list_feed_items().await?;
    let animal_categories = state.services.animals.list_categories().await?;
    let feed_categories = state.services.catalog.list_feed_categories().await?;

    Ok(Json(ConfigurationResponse {
        feed_units,
        feed_items,
        animal_categories,
        feed_categories,
        week_days: FASTING_DAY_CHOICES.clone(),
        schedules: SCHEDULE_TAGS
            .iter()
            .map(|tag| ScheduleChoice {
                code: *tag,
                label: tag.label().to_string(),
            })
            .collect(),
    }))
}

/// Get the feed item list only
#[utoipa::path(
    get,
    path = "/configuration/feed-items",
    tag = "configuration",
    responses(
        (status = 200, description = "Feed items", body = Vec<FeedItem>)
    )
)]
pub async fn get_feed_items(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<FeedItem>>> {
    let items = state.services.catalog.list_feed_items().await?;
    Ok(Json(items))
}
