//! Feed catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::feed::{CreateFeedItem, FeedItem, UpdateFeedItem},
};

/// List feed items
#[utoipa::path(
    get,
    path = "/feed-items",
    tag = "feeds",
    responses(
        (status = 200, description = "Feed items", body = Vec<FeedItem>)
    )
)]
pub async fn list_feed_items(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<FeedItem>>> {
    let items = state.services.catalog.list_feed_items().await?;
    Ok(Json(items))
}

/// Get a feed item
#[utoipa::path(
    get,
    path = "/feed-items/{id}",
    tag = "feeds",
    params(("id" = i32, Path, description = "Feed item ID")),
    responses(
        (status = 200, description = "Feed item", body = FeedItem),
        (status = 404, description = "Feed item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_feed_item(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<FeedItem>> {
    let item = state.services.catalog.get_feed_item(id).await?;
    Ok(Json(item))
}

/// Create a feed item. Unit and both categories must exist.
#[utoipa::path(
    post,
    path = "/feed-items",
    tag = "feeds",
    request_body = CreateFeedItem,
    responses(
        (status = 201, description = "Feed item created", body = FeedItem),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Referenced entity not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_feed_item(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateFeedItem>,
) -> AppResult<(StatusCode, Json<FeedItem>)> {
    let item = state.services.catalog.create_feed_item(&data).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update a feed item
#[utoipa::path(
    put,
    path = "/feed-items/{id}",
    tag = "feeds",
    params(("id" = i32, Path, description = "Feed item ID")),
    request_body = UpdateFeedItem,
    responses(
        (status = 200, description = "Feed item updated", body = FeedItem),
        (status = 404, description = "Feed item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_feed_item(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateFeedItem>,
) -> AppResult<Json<FeedItem>> {
    let item = state.services.catalog.update_feed_item(id, &data).await?;
    Ok(Json(item))
}
