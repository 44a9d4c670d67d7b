//! Population ledger repository
//!
//! Writes go through a transaction that also refreshes the diet table's
//! cached adult counts for the species, so a population snapshot and the
//! diet cache it feeds are never visible in a half-updated state.

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::population::{CountGroup, PopulationRecord},
};

const RECORD_COLUMNS: &str = "species_id, recorded_at, \
     opening_male, opening_female, opening_underage, \
     births_male, births_female, births_underage, \
     acquisitions_male, acquisitions_female, acquisitions_underage, \
     disposals_male, disposals_female, disposals_underage, \
     deaths_male, deaths_female, deaths_underage, \
     closing_male, closing_female, closing_underage, \
     remarks";

fn count_groups(record: &PopulationRecord) -> [CountGroup; 6] {
    [
        record.opening,
        record.births,
        record.acquisitions,
        record.disposals,
        record.deaths,
        record.closing,
    ]
}

#[derive(Clone)]
pub struct PopulationsRepository {
    pool: Pool<Postgres>,
}

impl PopulationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List records for a species, newest first, optionally restricted to one
    /// snapshot date
    pub async fn list_by_species(
        &self,
        species_id: i32,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<PopulationRecord>> {
        let query = if date.is_some() {
            "SELECT * FROM animal_population_records \
             WHERE species_id = $1 AND recorded_at = $2 ORDER BY recorded_at DESC"
        } else {
            "SELECT * FROM animal_population_records \
             WHERE species_id = $1 ORDER BY recorded_at DESC"
        };

        let mut builder = sqlx::query_as::<_, PopulationRecord>(query).bind(species_id);
        if let Some(d) = date {
            builder = builder.bind(d);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get a record by ID
    pub async fn get(&self, id: i32) -> AppResult<PopulationRecord> {
        sqlx::query_as::<_, PopulationRecord>(
            "SELECT * FROM animal_population_records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Population record {} not found", id)))
    }

    /// Latest snapshot for a species, if any
    pub async fn latest_by_species(&self, species_id: i32) -> AppResult<Option<PopulationRecord>> {
        let row = sqlx::query_as::<_, PopulationRecord>(
            "SELECT * FROM animal_population_records \
             WHERE species_id = $1 ORDER BY recorded_at DESC, id DESC LIMIT 1",
        )
        .bind(species_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a new record and refresh the species' diet adult counts from
    /// its closing group, in one transaction
    pub async fn create(&self, record: &PopulationRecord) -> AppResult<PopulationRecord> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "INSERT INTO animal_population_records ({}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
                     $15, $16, $17, $18, $19, $20, $21) \
             RETURNING *",
            RECORD_COLUMNS
        );

        let mut builder = sqlx::query_as::<_, PopulationRecord>(&query)
            .bind(record.species_id)
            .bind(record.recorded_at);
        for group in count_groups(record) {
            builder = builder.bind(group.male).bind(group.female).bind(group.underage);
        }

        let saved = builder.bind(&record.remarks).fetch_one(&mut *tx).await?;

        refresh_diet_adult_count(&mut tx, saved.species_id, saved.closing.feed_eligible()).await?;

        tx.commit().await?;
        Ok(saved)
    }

    /// Update an existing record in place and refresh the species' diet adult
    /// counts, in one transaction
    pub async fn update(&self, record: &PopulationRecord) -> AppResult<PopulationRecord> {
        let mut tx = self.pool.begin().await?;

        let mut builder = sqlx::query_as::<_, PopulationRecord>(
            "UPDATE animal_population_records SET \
                recorded_at = $1, \
                opening_male = $2, opening_female = $3, opening_underage = $4, \
                births_male = $5, births_female = $6, births_underage = $7, \
                acquisitions_male = $8, acquisitions_female = $9, acquisitions_underage = $10, \
                disposals_male = $11, disposals_female = $12, disposals_underage = $13, \
                deaths_male = $14, deaths_female = $15, deaths_underage = $16, \
                closing_male = $17, closing_female = $18, closing_underage = $19, \
                remarks = $20, updated_at = $21 \
             WHERE id = $22 \
             RETURNING *",
        )
        .bind(record.recorded_at);
        for group in count_groups(record) {
            builder = builder.bind(group.male).bind(group.female).bind(group.underage);
        }
        let saved = builder
            .bind(&record.remarks)
            .bind(Utc::now())
            .bind(record.id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Population record {} not found", record.id)))?;

        refresh_diet_adult_count(&mut tx, saved.species_id, saved.closing.feed_eligible()).await?;

        tx.commit().await?;
        Ok(saved)
    }
}

/// Overwrite the cached adult count on every diet row of the species
async fn refresh_diet_adult_count(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    species_id: i32,
    adult_count: i32,
) -> AppResult<()> {
    sqlx::query("UPDATE diet_items SET adult_count = $1 WHERE species_id = $2")
        .bind(adult_count)
        .bind(species_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
