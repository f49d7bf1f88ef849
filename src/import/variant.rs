//! Per-dataset decode and map capabilities
//!
//! The pipeline is written once; each USDA dataset plugs in how its documents
//! decode and how a decoded record maps to a food document.

use serde::de::DeserializeOwned;

use crate::mapper::{map_branded_food, map_survey_food};
use crate::models::Food;
use crate::usda::{BrandedFood, SurveyFood};

/// A USDA dataset the pipeline can import
pub trait FoodVariant {
    /// Decoded source record
    type Record: DeserializeOwned;

    /// Name used in progress logs
    const LABEL: &'static str;

    /// Decode one raw JSON document
    fn decode(document: &str) -> serde_json::Result<Self::Record> {
        serde_json::from_str(document)
    }

    /// Number of nutrient entries; records with none are skipped
    fn nutrient_count(record: &Self::Record) -> usize;

    /// Map a decoded record to a food document with the given sequence id
    fn map(record: &Self::Record, id: i64) -> Food;
}

/// FNDDS survey foods
pub struct SurveyFoods;

impl FoodVariant for SurveyFoods {
    type Record = SurveyFood;
    const LABEL: &'static str = "survey";

    fn nutrient_count(record: &SurveyFood) -> usize {
        record.food_nutrients.len()
    }

    fn map(record: &SurveyFood, id: i64) -> Food {
        map_survey_food(record, id)
    }
}

/// Branded foods
pub struct BrandedFoods;

impl FoodVariant for BrandedFoods {
    type Record = BrandedFood;
    const LABEL: &'static str = "branded";

    fn nutrient_count(record: &BrandedFood) -> usize {
        record.food_nutrients.len()
    }

    fn map(record: &BrandedFood, id: i64) -> Food {
        map_branded_food(record, id)
    }
}
