//! Population ledger endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::population::{PopulationQuery, PopulationRecord, SavePopulationRequest},
};

/// List population records for a species, newest first
#[utoipa::path(
    get,
    path = "/animal-population/{species_id}",
    tag = "population",
    params(
        ("species_id" = i32, Path, description = "Species ID"),
        PopulationQuery
    ),
    responses(
        (status = 200, description = "Population records", body = Vec<PopulationRecord>),
        (status = 404, description = "No records found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_records(
    State(state): State<crate::AppState>,
    Path(species_id): Path<i32>,
    Query(query): Query<PopulationQuery>,
) -> AppResult<Json<Vec<PopulationRecord>>> {
    let records = state
        .services
        .populations
        .records_by_species(species_id, query.date.as_deref())
        .await?;
    Ok(Json(records))
}

/// Create a population record. The species' diet adult counts are refreshed
/// in the same transaction.
#[utoipa::path(
    post,
    path = "/animal-population",
    tag = "population",
    request_body = SavePopulationRequest,
    responses(
        (status = 201, description = "Record created", body = PopulationRecord),
        (status = 400, description = "Missing species or bad date", body = crate::error::ErrorResponse),
        (status = 404, description = "Species not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_record(
    State(state): State<crate::AppState>,
    Json(data): Json<SavePopulationRequest>,
) -> AppResult<(StatusCode, Json<PopulationRecord>)> {
    let record = state.services.populations.create(&data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update a population record in place
#[utoipa::path(
    put,
    path = "/animal-population/{id}",
    tag = "population",
    params(("id" = i32, Path, description = "Record ID")),
    request_body = SavePopulationRequest,
    responses(
        (status = 200, description = "Record updated", body = PopulationRecord),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_record(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<SavePopulationRequest>,
) -> AppResult<Json<PopulationRecord>> {
    let record = state.services.populations.update(id, &data).await?;
    Ok(Json(record))
}
