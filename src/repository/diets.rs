//! Diet table repository

use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::diet::{DietItem, DietItemDetails, UpdateDietItem},
};

/// Per-feed-item daily consumption, summed over the whole diet table
/// (quantity x cached adult count)
#[derive(Debug, Clone, FromRow)]
pub struct DailyFeedTotal {
    pub feed_item_id: i32,
    pub feed_item_name: String,
    pub unit_name: String,
    pub total_quantity: f64,
}

/// One (feed item, species) diet quantity within a category
#[derive(Debug, Clone, FromRow)]
pub struct DietQuantityRow {
    pub feed_item_id: i32,
    pub species_id: i32,
    pub quantity: f64,
}

#[derive(Clone)]
pub struct DietsRepository {
    pool: Pool<Postgres>,
}

impl DietsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List diet rows of a species with feed item and unit names for display
    pub async fn list_by_species(&self, species_id: i32) -> AppResult<Vec<DietItemDetails>> {
        let rows = sqlx::query_as::<_, DietItemDetails>(
            r#"
            SELECT d.id, d.species_id, d.feed_item_id,
                   f.name AS feed_item_name, u.name AS unit_name,
                   d.quantity, d.adult_count
            FROM diet_items d
            JOIN feed_items f ON d.feed_item_id = f.id
            JOIN feed_units u ON f.unit_id = u.id
            WHERE d.species_id = $1
            ORDER BY f.name
            "#,
        )
        .bind(species_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a diet item by ID
    pub async fn get(&self, id: i32) -> AppResult<DietItem> {
        sqlx::query_as::<_, DietItem>("SELECT * FROM diet_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Diet item {} not found", id)))
    }

    /// Replace the whole diet of a species in one transaction. Every new row
    /// is stamped with the given adult count.
    pub async fn replace_for_species(
        &self,
        species_id: i32,
        items: &[(i32, f64)],
        adult_count: i32,
    ) -> AppResult<Vec<DietItem>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM diet_items WHERE species_id = $1")
            .bind(species_id)
            .execute(&mut *tx)
            .await?;

        let mut saved = Vec::with_capacity(items.len());
        for &(feed_item_id, quantity) in items {
            let row = sqlx::query_as::<_, DietItem>(
                r#"
                INSERT INTO diet_items (species_id, feed_item_id, quantity, adult_count)
                VALUES ($1, $2, $3, $4)
                RETURNING *
                "#,
            )
            .bind(species_id)
            .bind(feed_item_id)
            .bind(quantity)
            .bind(adult_count)
            .fetch_one(&mut *tx)
            .await?;
            saved.push(row);
        }

        tx.commit().await?;
        Ok(saved)
    }

    /// Update a single diet item
    pub async fn update(&self, id: i32, data: &UpdateDietItem) -> AppResult<DietItem> {
        let mut sets = Vec::new();
        let mut idx = 1;

        if data.quantity.is_some() {
            sets.push(format!("quantity = ${}", idx));
            idx += 1;
        }
        if data.feed_id.is_some() {
            sets.push(format!("feed_item_id = ${}", idx));
        }

        if sets.is_empty() {
            return self.get(id).await;
        }

        let query = format!(
            "UPDATE diet_items SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, DietItem>(&query);
        if let Some(quantity) = data.quantity {
            builder = builder.bind(quantity);
        }
        if let Some(feed_id) = data.feed_id {
            builder = builder.bind(feed_id);
        }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Diet item {} not found", id)))
    }

    /// Delete a diet item
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM diet_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Diet item {} not found", id)));
        }
        Ok(())
    }

    /// Aggregate daily consumption per feed item across ALL species, ordered
    /// by feed item name
    pub async fn daily_feed_consumption(&self) -> AppResult<Vec<DailyFeedTotal>> {
        let rows = sqlx::query_as::<_, DailyFeedTotal>(
            r#"
            SELECT f.id AS feed_item_id, f.name AS feed_item_name, u.name AS unit_name,
                   SUM(d.quantity * d.adult_count)::float8 AS total_quantity
            FROM diet_items d
            JOIN feed_items f ON d.feed_item_id = f.id
            JOIN feed_units u ON f.unit_id = u.id
            GROUP BY f.id, f.name, u.name
            ORDER BY f.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All (feed item, species) diet quantities within one animal category,
    /// fetched in one pass for the estimate cross-tabs
    pub async fn quantities_by_category(
        &self,
        category_id: i32,
    ) -> AppResult<Vec<DietQuantityRow>> {
        let rows = sqlx::query_as::<_, DietQuantityRow>(
            r#"
            SELECT d.feed_item_id, d.species_id, d.quantity
            FROM diet_items d
            JOIN animal_species s ON d.species_id = s.id
            WHERE s.category_id = $1
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
