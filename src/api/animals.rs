//! Animal category and species endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::animal::{
        AnimalCategory, AnimalSpecies, CreateAnimalCategory, CreateAnimalSpecies,
        SpeciesWithPopulation, UpdateAnimalCategory, UpdateAnimalSpecies,
    },
};

// ---- Categories ----

/// List animal categories
#[utoipa::path(
    get,
    path = "/animal-categories",
    tag = "animals",
    responses(
        (status = 200, description = "Animal categories", body = Vec<AnimalCategory>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<AnimalCategory>>> {
    let categories = state.services.animals.list_categories().await?;
    Ok(Json(categories))
}

/// Create an animal category
#[utoipa::path(
    post,
    path = "/animal-categories",
    tag = "animals",
    request_body = CreateAnimalCategory,
    responses(
        (status = 201, description = "Category created", body = AnimalCategory),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAnimalCategory>,
) -> AppResult<(StatusCode, Json<AnimalCategory>)> {
    let category = state.services.animals.create_category(&data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update an animal category
#[utoipa::path(
    put,
    path = "/animal-categories/{id}",
    tag = "animals",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateAnimalCategory,
    responses(
        (status = 200, description = "Category updated", body = AnimalCategory),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAnimalCategory>,
) -> AppResult<Json<AnimalCategory>> {
    let category = state.services.animals.update_category(id, &data).await?;
    Ok(Json(category))
}

// ---- Species ----

/// List all species with their latest population counts
#[utoipa::path(
    get,
    path = "/animals",
    tag = "animals",
    responses(
        (status = 200, description = "Species list", body = Vec<SpeciesWithPopulation>)
    )
)]
pub async fn list_animals(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<SpeciesWithPopulation>>> {
    let animals = state.services.animals.list_with_population().await?;
    Ok(Json(animals))
}

/// Get one species with its latest population counts
#[utoipa::path(
    get,
    path = "/animals/{id}",
    tag = "animals",
    params(("id" = i32, Path, description = "Species ID")),
    responses(
        (status = 200, description = "Species", body = SpeciesWithPopulation),
        (status = 404, description = "Species not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_animal(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<SpeciesWithPopulation>> {
    let animal = state.services.animals.get_with_population(id).await?;
    Ok(Json(animal))
}

/// Create a species
#[utoipa::path(
    post,
    path = "/animals",
    tag = "animals",
    request_body = CreateAnimalSpecies,
    responses(
        (status = 201, description = "Species created", body = AnimalSpecies),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_animal(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAnimalSpecies>,
) -> AppResult<(StatusCode, Json<AnimalSpecies>)> {
    let animal = state.services.animals.create_species(&data).await?;
    Ok((StatusCode::CREATED, Json(animal)))
}

/// Update a species
#[utoipa::path(
    put,
    path = "/animals/{id}",
    tag = "animals",
    params(("id" = i32, Path, description = "Species ID")),
    request_body = UpdateAnimalSpecies,
    responses(
        (status = 200, description = "Species updated", body = AnimalSpecies),
        (status = 404, description = "Species not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_animal(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAnimalSpecies>,
) -> AppResult<Json<AnimalSpecies>> {
    let animal = state.services.animals.update_species(id, &data).await?;
    Ok(Json(animal))
}
