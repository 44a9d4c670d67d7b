//! Population ledger service
//!
//! Saving a snapshot also refreshes the cached adult counts on the species'
//! diet rows; the repository performs both writes in one transaction.

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::population::{PopulationRecord, SavePopulationRequest},
    repository::Repository,
};

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format. Use YYYY-MM-DD.".to_string()))
}

#[derive(Clone)]
pub struct PopulationsService {
    repository: Repository,
}

impl PopulationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Population records of a species, newest first, optionally restricted
    /// to one snapshot date
    pub async fn records_by_species(
        &self,
        species_id: i32,
        date: Option<&str>,
    ) -> AppResult<Vec<PopulationRecord>> {
        let date = date.map(parse_date).transpose()?;
        let records = self
            .repository
            .populations
            .list_by_species(species_id, date)
            .await?;

        if records.is_empty() {
            return Err(AppError::NotFound(
                "No population records found for this species".to_string(),
            ));
        }
        Ok(records)
    }

    /// Create a new population record
    pub async fn create(&self, data: &SavePopulationRequest) -> AppResult<PopulationRecord> {
        let species_id = data
            .species_id
            .ok_or_else(|| AppError::Validation("Species ID is required".to_string()))?;
        self.repository.animals.get_species(species_id).await?;

        let recorded_at = match &data.recorded_at {
            Some(value) => parse_date(value)?,
            None => Utc::now().date_naive(),
        };

        // Timestamps and id come back from the database
        let now = Utc::now();
        let mut record = PopulationRecord {
            id: 0,
            species_id,
            recorded_at,
            opening: Default::default(),
            births: Default::default(),
            acquisitions: Default::default(),
            disposals: Default::default(),
            deaths: Default::default(),
            closing: Default::default(),
            remarks: data.remarks.clone(),
            created_at: now,
            updated_at: now,
        };
        apply_count_groups(&mut record, data);

        self.repository.populations.create(&record).await
    }

    /// Update an existing record in place. Absent fields keep their stored
    /// values; count groups are filled field by field.
    pub async fn update(&self, id: i32, data: &SavePopulationRequest) -> AppResult<PopulationRecord> {
        let mut record = self.repository.populations.get(id).await?;

        if let Some(value) = &data.recorded_at {
            record.recorded_at = parse_date(value)?;
        }
        apply_count_groups(&mut record, data);
        if let Some(remarks) = &data.remarks {
            record.remarks = Some(remarks.clone());
        }

        self.repository.populations.update(&record).await
    }
}

fn apply_count_groups(record: &mut PopulationRecord, data: &SavePopulationRequest) {
    if let Some(input) = &data.opening {
        record.opening.apply(input);
    }
    if let Some(input) = &data.births {
        record.births.apply(input);
    }
    if let Some(input) = &data.acquisitions {
        record.acquisitions.apply(input);
    }
    if let Some(input) = &data.disposals {
        record.disposals.apply(input);
    }
    if let Some(input) = &data.deaths {
        record.deaths.apply(input);
    }
    if let Some(input) = &data.closing {
        record.closing.apply(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::population::CountGroupInput;

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn test_apply_count_groups_partial() {
        let now = Utc::now();
        let mut record = PopulationRecord {
            id: 1,
            species_id: 1,
            recorded_at: now.date_naive(),
            opening: Default::default(),
            births: Default::default(),
            acquisitions: Default::default(),
            disposals: Default::default(),
            deaths: Default::default(),
            closing: Default::default(),
            remarks: None,
            created_at: now,
            updated_at: now,
        };
        record.closing.male = 9;

        let data = SavePopulationRequest {
            opening: Some(CountGroupInput {
                male: Some(3),
                female: Some(2),
                underage: None,
            }),
            closing: Some(CountGroupInput {
                female: Some(4),
                ..Default::default()
            }),
            ..Default::default()
        };

        apply_count_groups(&mut record, &data);
        assert_eq!(record.opening.male, 3);
        assert_eq!(record.opening.female, 2);
        // untouched groups and fields survive
        assert_eq!(record.closing.male, 9);
        assert_eq!(record.closing.female, 4);
        assert_eq!(record.births.total(), 0);
    }
}
