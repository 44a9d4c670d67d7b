//! Business logic services

pub mod animals;
pub mod catalog;
pub mod diets;
pub mod estimates;
pub mod populations;
pub mod reports;

use validator::Validate;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub animals: animals::AnimalsService,
    pub populations: populations::PopulationsService,
    pub diets: diets::DietsService,
    pub catalog: catalog::CatalogService,
    pub estimates: estimates::EstimateService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            animals: animals::AnimalsService::new(repository.clone()),
            populations: populations::PopulationsService::new(repository.clone()),
            diets: diets::DietsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            estimates: estimates::EstimateService::new(repository.clone()),
            reports: reports::ReportsService::new(),
            repository,
        }
    }
}

/// Run validator-derived checks, collecting every violation into one
/// 400-class error (all-or-nothing per request)
pub(crate) fn validate_payload<T: Validate>(data: &T) -> AppResult<()> {
    data.validate().map_err(|errors| {
        let mut messages = Vec::new();
        for (field, violations) in errors.field_errors() {
            for violation in violations {
                match &violation.message {
                    Some(msg) => messages.push(msg.to_string()),
                    None => messages.push(format!("{}: {}", field, violation.code)),
                }
            }
        }
        messages.sort();
        crate::error::AppError::Validation(messages.join("; "))
    })
}
