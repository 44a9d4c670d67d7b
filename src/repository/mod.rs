//! Repository layer for database operations

pub mod animals;
pub mod diets;
pub mod feeds;
pub mod populations;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub animals: animals::AnimalsRepository,
    pub populations: populations::PopulationsRepository,
    pub feeds: feeds::FeedsRepository,
    pub diets: diets::DietsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            animals: animals::AnimalsRepository::new(pool.clone()),
            populations: populations::PopulationsRepository::new(pool.clone()),
            feeds: feeds::FeedsRepository::new(pool.clone()),
            diets: diets::DietsRepository::new(pool.clone()),
            pool,
        }
    }
}
