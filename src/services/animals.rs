//! Animal categories and species service

use crate::{
    error::AppResult,
    models::animal::{
        AnimalCategory, AnimalSpecies, CreateAnimalCategory, CreateAnimalSpecies,
        SpeciesWithPopulation, UpdateAnimalCategory, UpdateAnimalSpecies,
    },
    repository::Repository,
    services::validate_payload,
};

#[derive(Clone)]
pub struct AnimalsService {
    repository: Repository,
}

impl AnimalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Categories ----

    pub async fn list_categories(&self) -> AppResult<Vec<AnimalCategory>> {
        self.repository.animals.list_categories().await
    }

    pub async fn get_category(&self, id: i32) -> AppResult<AnimalCategory> {
        self.repository.animals.get_category(id).await
    }

    pub async fn create_category(&self, data: &CreateAnimalCategory) -> AppResult<AnimalCategory> {
        validate_payload(data)?;
        self.repository.animals.create_category(data).await
    }

    pub async fn update_category(
        &self,
        id: i32,
        data: &UpdateAnimalCategory,
    ) -> AppResult<AnimalCategory> {
        validate_payload(data)?;
        self.repository.animals.update_category(id, data).await
    }

    // ---- Species ----

    pub async fn get_species(&self, id: i32) -> AppResult<AnimalSpecies> {
        self.repository.animals.get_species(id).await
    }

    /// Create a species; the category must exist before anything is written
    pub async fn create_species(&self, data: &CreateAnimalSpecies) -> AppResult<AnimalSpecies> {
        validate_payload(data)?;
        self.repository.animals.get_category(data.category_id).await?;
        self.repository.animals.create_species(data).await
    }

    /// Update a species in place
    pub async fn update_species(
        &self,
        id: i32,
        data: &UpdateAnimalSpecies,
    ) -> AppResult<AnimalSpecies> {
        validate_payload(data)?;
        if let Some(category_id) = data.category_id {
            self.repository.animals.get_category(category_id).await?;
        }
        self.repository.animals.update_species(id, data).await
    }

    /// All species, each enriched with its latest population counts
    pub async fn list_with_population(&self) -> AppResult<Vec<SpeciesWithPopulation>> {
        let species = self.repository.animals.list_species().await?;
        let mut result = Vec::with_capacity(species.len());
        for sp in species {
            result.push(self.enrich_with_population(sp).await?);
        }
        Ok(result)
    }

    /// One species enriched with its latest population counts
    pub async fn get_with_population(&self, id: i32) -> AppResult<SpeciesWithPopulation> {
        let species = self.repository.animals.get_species(id).await?;
        self.enrich_with_population(species).await
    }

    async fn enrich_with_population(
        &self,
        animal: AnimalSpecies,
    ) -> AppResult<SpeciesWithPopulation> {
        let closing = self
            .repository
            .populations
            .latest_by_species(animal.id)
            .await?
            .map(|record| record.closing)
            .unwrap_or_default();

        Ok(SpeciesWithPopulation {
            male_count: closing.male,
            female_count: closing.female,
            underage_count: closing.underage,
            total_count: closing.total(),
            adult_count: closing.feed_eligible(),
            animal,
        })
    }
}
