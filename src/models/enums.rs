//! Shared domain enums and constant lookup tables

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// ScheduleTag
// ---------------------------------------------------------------------------

/// Zoo schedule classification for a species (schedule I/II/III)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleTag {
    I,
    II,
    III,
}

impl ScheduleTag {
    /// Lowercase code stored in the database
    pub fn as_code(&self) -> &'static str {
        match self {
            ScheduleTag::I => "i",
            ScheduleTag::II => "ii",
            ScheduleTag::III => "iii",
        }
    }

    /// Display label for selectors
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleTag::I => "I",
            ScheduleTag::II => "II",
            ScheduleTag::III => "III",
        }
    }
}

impl std::fmt::Display for ScheduleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub const SCHEDULE_TAGS: [ScheduleTag; 3] = [ScheduleTag::I, ScheduleTag::II, ScheduleTag::III];

// ---------------------------------------------------------------------------
// Week days / months
// ---------------------------------------------------------------------------

/// Weekday names indexed by the fasting-day convention (0 = Sunday)
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Short month names indexed 1..=12
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A selectable fasting-day choice (id -1 = none, 0 = Sunday .. 6 = Saturday)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayChoice {
    pub id: i32,
    pub name: String,
}

/// Fasting-day choices offered by the configuration endpoint
pub static FASTING_DAY_CHOICES: Lazy<Vec<DayChoice>> = Lazy::new(|| {
    let mut choices = vec![DayChoice {
        id: -1,
        name: "None".to_string(),
    }];
    choices.extend(DAY_NAMES.iter().enumerate().map(|(i, name)| DayChoice {
        id: i as i32,
        name: (*name).to_string(),
    }));
    choices
});

/// Human-readable fasting-day name (-1 = no fasting day)
pub fn fasting_day_name(fasting_day: i32) -> String {
    if (0..7).contains(&fasting_day) {
        DAY_NAMES[fasting_day as usize].to_string()
    } else {
        "No fasting day".to_string()
    }
}

/// Short month name; -1 designates the synthetic 30-day period
pub fn month_name(month: i32) -> String {
    if (1..=12).contains(&month) {
        MONTH_NAMES[(month - 1) as usize].to_string()
    } else {
        "Custom Period".to_string()
    }
}
