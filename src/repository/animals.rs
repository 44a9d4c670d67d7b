//! Animal categories and species repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::animal::{
        AnimalCategory, AnimalSpecies, CreateAnimalCategory, CreateAnimalSpecies,
        UpdateAnimalCategory, UpdateAnimalSpecies,
    },
};

#[derive(Clone)]
pub struct AnimalsRepository {
    pool: Pool<Postgres>,
}

impl AnimalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Categories ----

    /// List all animal categories, ordered by name
    pub async fn list_categories(&self) -> AppResult<Vec<AnimalCategory>> {
        let rows = sqlx::query_as::<_, AnimalCategory>(
            "SELECT * FROM animal_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get an animal category by ID
    pub async fn get_category(&self, id: i32) -> AppResult<AnimalCategory> {
        sqlx::query_as::<_, AnimalCategory>("SELECT * FROM animal_categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Animal category {} not found", id)))
    }

    /// Create an animal category
    pub async fn create_category(&self, data: &CreateAnimalCategory) -> AppResult<AnimalCategory> {
        let row = sqlx::query_as::<_, AnimalCategory>(
            "INSERT INTO animal_categories (name, fasting_day) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.fasting_day)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an animal category
    pub async fn update_category(
        &self,
        id: i32,
        data: &UpdateAnimalCategory,
    ) -> AppResult<AnimalCategory> {
        let mut sets = Vec::new();
        let mut idx = 1;

        if data.name.is_some() {
            sets.push(format!("name = ${}", idx));
            idx += 1;
        }
        if data.fasting_day.is_some() {
            sets.push(format!("fasting_day = ${}", idx));
        }

        if sets.is_empty() {
            return self.get_category(id).await;
        }

        let query = format!(
            "UPDATE animal_categories SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, AnimalCategory>(&query);
        if let Some(ref name) = data.name {
            builder = builder.bind(name);
        }
        if let Some(day) = data.fasting_day {
            builder = builder.bind(day);
        }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Animal category {} not found", id)))
    }

    // ---- Species ----

    /// List all species, ordered by common name
    pub async fn list_species(&self) -> AppResult<Vec<AnimalSpecies>> {
        let rows = sqlx::query_as::<_, AnimalSpecies>(
            "SELECT * FROM animal_species ORDER BY common_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List species of a category, optionally restricted to active ones
    pub async fn list_species_by_category(
        &self,
        category_id: i32,
        active_only: bool,
    ) -> AppResult<Vec<AnimalSpecies>> {
        let query = if active_only {
            "SELECT * FROM animal_species WHERE category_id = $1 AND active ORDER BY common_name"
        } else {
            "SELECT * FROM animal_species WHERE category_id = $1 ORDER BY common_name"
        };
        let rows = sqlx::query_as::<_, AnimalSpecies>(query)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a species by ID
    pub async fn get_species(&self, id: i32) -> AppResult<AnimalSpecies> {
        sqlx::query_as::<_, AnimalSpecies>("SELECT * FROM animal_species WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Animal species {} not found", id)))
    }

    /// Create a species
    pub async fn create_species(&self, data: &CreateAnimalSpecies) -> AppResult<AnimalSpecies> {
        let row = sqlx::query_as::<_, AnimalSpecies>(
            r#"
            INSERT INTO animal_species (category_id, common_name, scientific_name, schedule, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.category_id)
        .bind(&data.common_name)
        .bind(&data.scientific_name)
        .bind(data.schedule.map(|s| s.as_code()))
        .bind(data.active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a species in place
    pub async fn update_species(
        &self,
        id: i32,
        data: &UpdateAnimalSpecies,
    ) -> AppResult<AnimalSpecies> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        if data.common_name.is_some() {
            sets.push(format!("common_name = ${}", idx));
            idx += 1;
        }
        if data.scientific_name.is_some() {
            sets.push(format!("scientific_name = ${}", idx));
            idx += 1;
        }
        if data.category_id.is_some() {
            sets.push(format!("category_id = ${}", idx));
            idx += 1;
        }
        if data.schedule.is_some() {
            sets.push(format!("schedule = ${}", idx));
            idx += 1;
        }
        if data.active.is_some() {
            sets.push(format!("active = ${}", idx));
        }

        let query = format!(
            "UPDATE animal_species SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, AnimalSpecies>(&query).bind(now);
        if let Some(ref name) = data.common_name {
            builder = builder.bind(name);
        }
        if let Some(ref name) = data.scientific_name {
            builder = builder.bind(name);
        }
        if let Some(category_id) = data.category_id {
            builder = builder.bind(category_id);
        }
        if let Some(schedule) = data.schedule {
            builder = builder.bind(schedule.as_code());
        }
        if let Some(active) = data.active {
            builder = builder.bind(active);
        }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Animal species {} not found", id)))
    }
}
