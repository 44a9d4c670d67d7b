//! Data models for Menagerie

pub mod animal;
pub mod diet;
pub mod enums;
pub mod feed;
pub mod population;

// Re-export commonly used types
pub use animal::{AnimalCategory, AnimalSpecies, SpeciesWithPopulation};
pub use diet::{DietItem, DietItemDetails};
pub use enums::ScheduleTag;
pub use feed::{FeedCategory, FeedItem, FeedUnit};
pub use population::{CountGroup, PopulationRecord};
