//! Population ledger models
//!
//! A population record is a dated snapshot of six count groups
//! (opening/births/acquisitions/disposals/deaths/closing), each split into
//! male/female/underage. The closing balance is entered by hand and is NOT
//! derived from the other groups.

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;

/// One count group: male/female/underage head counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ToSchema)]
pub struct CountGroup {
    pub male: i32,
    pub female: i32,
    pub underage: i32,
}

impl CountGroup {
    pub fn total(&self) -> i32 {
        self.male + self.female + self.underage
    }

    /// Feed-eligible head count (underage animals are not counted for diets)
    pub fn feed_eligible(&self) -> i32 {
        self.male + self.female
    }

    /// Fill from a partial input, leaving absent fields untouched
    pub fn apply(&mut self, input: &CountGroupInput) {
        if let Some(male) = input.male {
            self.male = male;
        }
        if let Some(female) = input.female {
            self.female = female;
        }
        if let Some(underage) = input.underage {
            self.underage = underage;
        }
    }
}

// Serialized form carries the derived totals alongside the raw counts.
impl Serialize for CountGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CountGroup", 5)?;
        state.serialize_field("male", &self.male)?;
        state.serialize_field("female", &self.female)?;
        state.serialize_field("underage", &self.underage)?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("feed_eligible", &self.feed_eligible())?;
        state.end()
    }
}

/// Partial count-group input. Accepts both `underAge` and `underage` keys.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct CountGroupInput {
    pub male: Option<i32>,
    pub female: Option<i32>,
    #[serde(alias = "underAge")]
    pub underage: Option<i32>,
}

/// A dated population snapshot for one species
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PopulationRecord {
    pub id: i32,
    pub species_id: i32,
    pub recorded_at: NaiveDate,
    pub opening: CountGroup,
    pub births: CountGroup,
    pub acquisitions: CountGroup,
    pub disposals: CountGroup,
    pub deaths: CountGroup,
    pub closing: CountGroup,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PopulationRecord {
    /// Closing balance implied by the other five groups. The stored closing
    /// group is free-entered and may legitimately differ; this is a checking
    /// aid, not an enforced invariant.
    pub fn expected_closing(&self) -> CountGroup {
        CountGroup {
            male: self.opening.male + self.births.male + self.acquisitions.male
                - self.disposals.male
                - self.deaths.male,
            female: self.opening.female + self.births.female + self.acquisitions.female
                - self.disposals.female
                - self.deaths.female,
            underage: self.opening.underage + self.births.underage + self.acquisitions.underage
                - self.disposals.underage
                - self.deaths.underage,
        }
    }
}

fn group_from_row(row: &PgRow, prefix: &str) -> Result<CountGroup, sqlx::Error> {
    Ok(CountGroup {
        male: row.try_get(format!("{prefix}_male").as_str())?,
        female: row.try_get(format!("{prefix}_female").as_str())?,
        underage: row.try_get(format!("{prefix}_underage").as_str())?,
    })
}

// The six embedded groups live in prefixed column sets, which a derived
// FromRow cannot express.
impl FromRow<'_, PgRow> for PopulationRecord {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            species_id: row.try_get("species_id")?,
            recorded_at: row.try_get("recorded_at")?,
            opening: group_from_row(row, "opening")?,
            births: group_from_row(row, "births")?,
            acquisitions: group_from_row(row, "acquisitions")?,
            disposals: group_from_row(row, "disposals")?,
            deaths: group_from_row(row, "deaths")?,
            closing: group_from_row(row, "closing")?,
            remarks: row.try_get("remarks")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Create/update payload for a population record. All count groups are
/// partial; absent groups keep their current values.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SavePopulationRequest {
    /// Required when creating a new record
    #[serde(alias = "speciesId")]
    pub species_id: Option<i32>,
    /// Snapshot date (YYYY-MM-DD)
    #[serde(alias = "recordedAt")]
    pub recorded_at: Option<String>,
    pub opening: Option<CountGroupInput>,
    pub births: Option<CountGroupInput>,
    pub acquisitions: Option<CountGroupInput>,
    pub disposals: Option<CountGroupInput>,
    pub deaths: Option<CountGroupInput>,
    pub closing: Option<CountGroupInput>,
    pub remarks: Option<String>,
}

/// Query parameters for listing population records
#[derive(Debug, Deserialize, utoipa::IntoParams, ToSchema)]
pub struct PopulationQuery {
    /// Restrict to snapshots recorded on this date (YYYY-MM-DD)
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_partial_group() {
        let mut group = CountGroup::default();
        let input: CountGroupInput =
            serde_json::from_str(r#"{"male": 5, "female": 3, "underAge": 2}"#).unwrap();
        group.apply(&input);
        assert_eq!(group.total(), 10);
        assert_eq!(group.feed_eligible(), 8);

        // absent keys leave existing counts untouched
        let partial: CountGroupInput = serde_json::from_str(r#"{"female": 7}"#).unwrap();
        group.apply(&partial);
        assert_eq!(group.male, 5);
        assert_eq!(group.female, 7);
        assert_eq!(group.underage, 2);
    }

    #[test]
    fn test_underage_key_variants() {
        let camel: CountGroupInput = serde_json::from_str(r#"{"underAge": 4}"#).unwrap();
        let lower: CountGroupInput = serde_json::from_str(r#"{"underage": 4}"#).unwrap();
        assert_eq!(camel.underage, Some(4));
        assert_eq!(lower.underage, Some(4));
    }

    #[test]
    fn test_group_serializes_derived_totals() {
        let group = CountGroup {
            male: 5,
            female: 3,
            underage: 2,
        };
        let value = serde_json::to_value(group).unwrap();
        assert_eq!(value["total"], 10);
        assert_eq!(value["feed_eligible"], 8);
    }

    #[test]
    fn test_expected_closing_balance() {
        let record = PopulationRecord {
            id: 1,
            species_id: 1,
            recorded_at: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            opening: CountGroup {
                male: 10,
                female: 12,
                underage: 4,
            },
            births: CountGroup {
                male: 0,
                female: 0,
                underage: 3,
            },
            acquisitions: CountGroup {
                male: 2,
                female: 1,
                underage: 0,
            },
            disposals: CountGroup {
                male: 1,
                female: 0,
                underage: 0,
            },
            deaths: CountGroup {
                male: 0,
                female: 2,
                underage: 1,
            },
            closing: CountGroup::default(),
            remarks: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let expected = record.expected_closing();
        assert_eq!(expected.male, 11);
        assert_eq!(expected.female, 11);
        assert_eq!(expected.underage, 6);
    }
}
