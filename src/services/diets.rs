//! Diet table service
//!
//! Replacing a species' diet recomputes the cached adult count from the
//! latest population record's closing group — the same source the population
//! save path refreshes from, so the two writers cannot disagree.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::diet::{DietItem, DietItemDetails, ReplaceDietRequest, UpdateDietItem},
    repository::Repository,
};

/// Result of a diet replacement
#[derive(Debug, Serialize, ToSchema)]
pub struct ReplaceDietSummary {
    pub species_id: i32,
    pub items_count: usize,
    /// Feed-eligible head count stamped on the new rows
    pub adult_count: i32,
    pub items: Vec<DietItem>,
}

#[derive(Clone)]
pub struct DietsService {
    repository: Repository,
}

impl DietsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Diet rows of a species, with feed item and unit names
    pub async fn list_by_species(&self, species_id: i32) -> AppResult<Vec<DietItemDetails>> {
        self.repository.animals.get_species(species_id).await?;
        self.repository.diets.list_by_species(species_id).await
    }

    /// Replace the whole diet of a species. Every referenced feed item is
    /// resolved before any row is written.
    pub async fn replace_diet(
        &self,
        species_id: i32,
        data: &ReplaceDietRequest,
    ) -> AppResult<ReplaceDietSummary> {
        self.repository.animals.get_species(species_id).await?;

        for (index, item) in data.diet_items.iter().enumerate() {
            if item.quantity <= 0.0 {
                return Err(AppError::Validation(format!(
                    "Diet item at index {} must have a quantity greater than zero",
                    index
                )));
            }
            self.repository.feeds.get_item(item.feed_id).await?;
        }

        let adult_count = self
            .repository
            .populations
            .latest_by_species(species_id)
            .await?
            .map(|record| record.closing.feed_eligible())
            .unwrap_or(0);

        let pairs: Vec<(i32, f64)> = data
            .diet_items
            .iter()
            .map(|item| (item.feed_id, item.quantity))
            .collect();

        let items = self
            .repository
            .diets
            .replace_for_species(species_id, &pairs, adult_count)
            .await?;

        Ok(ReplaceDietSummary {
            species_id,
            items_count: items.len(),
            adult_count,
            items,
        })
    }

    /// Update a single diet item
    pub async fn update_item(&self, id: i32, data: &UpdateDietItem) -> AppResult<DietItem> {
        if let Some(quantity) = data.quantity {
            if quantity <= 0.0 {
                return Err(AppError::Validation(
                    "Quantity must be greater than zero".to_string(),
                ));
            }
        }
        if let Some(feed_id) = data.feed_id {
            self.repository.feeds.get_item(feed_id).await?;
        }
        self.repository.diets.update(id, data).await
    }

    /// Delete a diet item
    pub async fn delete_item(&self, id: i32) -> AppResult<()> {
        self.repository.diets.delete(id).await
    }
}
