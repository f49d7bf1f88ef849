//! Branded food document

use serde::{Deserialize, Serialize};

use super::{de, FoodNutrient};

/// USDA branded food. Nutrient amounts are per stated serving size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandedFood {
    #[serde(deserialize_with = "de::whole_number")]
    pub fdc_id: i64,
    #[serde(deserialize_with = "de::null_default")]
    pub description: String,
    #[serde(deserialize_with = "de::null_default")]
    pub food_class: String,
    #[serde(deserialize_with = "de::null_default")]
    pub data_type: String,
    #[serde(deserialize_with = "de::null_default")]
    pub publication_date: String,
    #[serde(deserialize_with = "de::null_default")]
    pub brand_owner: String,
    #[serde(deserialize_with = "de::null_default")]
    pub gtin_upc: String,
    /// Label ingredient statement, unparsed
    #[serde(deserialize_with = "de::null_default")]
    pub ingredients: String,
    #[serde(deserialize_with = "de::null_default")]
    pub serving_size: f64,
    #[serde(deserialize_with = "de::null_default")]
    pub serving_size_unit: String,
    #[serde(deserialize_with = "de::null_default")]
    pub household_serving_full_text: String,
    #[serde(deserialize_with = "de::null_default")]
    pub branded_food_category: String,
    #[serde(deserialize_with = "de::null_default")]
    pub food_nutrients: Vec<FoodNutrient>,
}
