//! Feed catalog repository (units, categories, items)

use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::feed::{CreateFeedItem, FeedCategory, FeedItem, FeedUnit, UpdateFeedItem},
};

/// Feed item joined with its unit name, as consumed by the estimate tables
#[derive(Debug, Clone, FromRow)]
pub struct FeedItemWithUnit {
    pub id: i32,
    pub name: String,
    pub unit_name: String,
    pub estimated_price: i32,
}

#[derive(Clone)]
pub struct FeedsRepository {
    pool: Pool<Postgres>,
}

impl FeedsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Units ----

    pub async fn list_units(&self) -> AppResult<Vec<FeedUnit>> {
        let rows = sqlx::query_as::<_, FeedUnit>("SELECT * FROM feed_units ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_unit(&self, id: i32) -> AppResult<FeedUnit> {
        sqlx::query_as::<_, FeedUnit>("SELECT * FROM feed_units WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Feed unit {} not found", id)))
    }

    // ---- Feed categories ----

    pub async fn list_feed_categories(&self) -> AppResult<Vec<FeedCategory>> {
        let rows =
            sqlx::query_as::<_, FeedCategory>("SELECT * FROM feed_categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    pub async fn get_feed_category(&self, id: i32) -> AppResult<FeedCategory> {
        sqlx::query_as::<_, FeedCategory>("SELECT * FROM feed_categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Feed category {} not found", id)))
    }

    // ---- Feed items ----

    /// List all feed items, ordered by name
    pub async fn list_items(&self) -> AppResult<Vec<FeedItem>> {
        let rows = sqlx::query_as::<_, FeedItem>("SELECT * FROM feed_items ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List feed items applying to one animal category, ordered by name
    pub async fn list_items_by_animal_category(
        &self,
        animal_category_id: i32,
    ) -> AppResult<Vec<FeedItem>> {
        let rows = sqlx::query_as::<_, FeedItem>(
            "SELECT * FROM feed_items WHERE animal_category_id = $1 ORDER BY name",
        )
        .bind(animal_category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List feed items of one animal category with unit names, ordered by
    /// name, for the estimate tables
    pub async fn list_catalog_for_category(
        &self,
        animal_category_id: i32,
    ) -> AppResult<Vec<FeedItemWithUnit>> {
        let rows = sqlx::query_as::<_, FeedItemWithUnit>(
            r#"
            SELECT f.id, f.name, u.name AS unit_name, f.estimated_price
            FROM feed_items f
            JOIN feed_units u ON f.unit_id = u.id
            WHERE f.animal_category_id = $1
            ORDER BY f.name
            "#,
        )
        .bind(animal_category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a feed item by ID
    pub async fn get_item(&self, id: i32) -> AppResult<FeedItem> {
        self.find_item(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Feed item {} not found", id)))
    }

    /// Look up a feed item by ID, tolerating dangling references
    pub async fn find_item(&self, id: i32) -> AppResult<Option<FeedItem>> {
        let row = sqlx::query_as::<_, FeedItem>("SELECT * FROM feed_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Create a feed item
    pub async fn create_item(&self, data: &CreateFeedItem) -> AppResult<FeedItem> {
        let row = sqlx::query_as::<_, FeedItem>(
            r#"
            INSERT INTO feed_items (name, estimated_price, unit_id, feed_category_id, animal_category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.estimated_price)
        .bind(data.unit_id)
        .bind(data.feed_category_id)
        .bind(data.animal_category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a feed item
    pub async fn update_item(&self, id: i32, data: &UpdateFeedItem) -> AppResult<FeedItem> {
        let mut sets = Vec::new();
        let mut idx = 1;

        if data.name.is_some() {
            sets.push(format!("name = ${}", idx));
            idx += 1;
        }
        if data.estimated_price.is_some() {
            sets.push(format!("estimated_price = ${}", idx));
            idx += 1;
        }
        if data.unit_id.is_some() {
            sets.push(format!("unit_id = ${}", idx));
            idx += 1;
        }
        if data.feed_category_id.is_some() {
            sets.push(format!("feed_category_id = ${}", idx));
            idx += 1;
        }
        if data.animal_category_id.is_some() {
            sets.push(format!("animal_category_id = ${}", idx));
        }

        if sets.is_empty() {
            return self.get_item(id).await;
        }

        let query = format!(
            "UPDATE feed_items SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, FeedItem>(&query);
        if let Some(ref name) = data.name {
            builder = builder.bind(name);
        }
        if let Some(price) = data.estimated_price {
            builder = builder.bind(price);
        }
        if let Some(unit_id) = data.unit_id {
            builder = builder.bind(unit_id);
        }
        if let Some(category_id) = data.feed_category_id {
            builder = builder.bind(category_id);
        }
        if let Some(animal_category_id) = data.animal_category_id {
            builder = builder.bind(animal_category_id);
        }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Feed item {} not found", id)))
    }
}
