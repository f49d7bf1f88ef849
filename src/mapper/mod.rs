//! Record mapper
//!
//! Pure conversions from USDA source records to food documents. Missing source data
//! falls back to zero, empty or null values; mapping never fails.

mod branded;
mod dates;
mod survey;

pub use branded::{map_branded_food, BRANDED_DATA_SOURCE};
pub use dates::parse_publication_date;
pub use survey::{map_survey_food, SURVEY_DATA_SOURCE};

/// Recorded as `verifiedBy` on every imported document
pub const IMPORT_ACTOR: &str = "USDA-Import";
