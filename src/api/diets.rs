//! Diet table endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::diet::{DietItem, DietItemDetails, ReplaceDietRequest, UpdateDietItem},
    services::diets::ReplaceDietSummary,
};

/// List the diet of a species
#[utoipa::path(
    get,
    path = "/animals/{id}/diet",
    tag = "diets",
    params(("id" = i32, Path, description = "Species ID")),
    responses(
        (status = 200, description = "Diet items", body = Vec<DietItemDetails>),
        (status = 404, description = "Species not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_diet(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<DietItemDetails>>> {
    let items = state.services.diets.list_by_species(id).await?;
    Ok(Json(items))
}

/// Replace the whole diet of a species
#[utoipa::path(
    put,
    path = "/animals/{id}/diet",
    tag = "diets",
    params(("id" = i32, Path, description = "Species ID")),
    request_body = ReplaceDietRequest,
    responses(
        (status = 200, description = "Diet replaced", body = ReplaceDietSummary),
        (status = 400, description = "Invalid quantity", body = crate::error::ErrorResponse),
        (status = 404, description = "Species or feed item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_diet(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<ReplaceDietRequest>,
) -> AppResult<Json<ReplaceDietSummary>> {
    let summary = state.services.diets.replace_diet(id, &data).await?;
    Ok(Json(summary))
}

/// Update a single diet item
#[utoipa::path(
    put,
    path = "/diet-items/{id}",
    tag = "diets",
    params(("id" = i32, Path, description = "Diet item ID")),
    request_body = UpdateDietItem,
    responses(
        (status = 200, description = "Diet item updated", body = DietItem),
        (status = 404, description = "Diet item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_diet_item(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateDietItem>,
) -> AppResult<Json<DietItem>> {
    let item = state.services.diets.update_item(id, &data).await?;
    Ok(Json(item))
}

/// Delete a diet item
#[utoipa::path(
    delete,
    path = "/diet-items/{id}",
    tag = "diets",
    params(("id" = i32, Path, description = "Diet item ID")),
    responses(
        (status = 204, description = "Diet item deleted"),
        (status = 404, description = "Diet item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_diet_item(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.diets.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
