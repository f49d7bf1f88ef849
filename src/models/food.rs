//! Food document model
//!
//! The application's canonical food document, as written to the target store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NutritionFacts;

/// How the food entered the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FoodRequestType {
    #[default]
    Unknown,
    Brand,
    Whole,
    Recipe,
}

impl FoodRequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodRequestType::Unknown => "unknown",
            FoodRequestType::Brand => "brand",
            FoodRequestType::Whole => "whole",
            FoodRequestType::Recipe => "recipe",
        }
    }
}

/// Provenance of the nutrition facts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VerifiedType {
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "USDA-survey")]
    UsdaSurvey,
    #[serde(rename = "USDA-brand")]
    UsdaBrand,
}

/// Processing state of the nutrition facts block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NutritionFactsStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Error,
}

/// Manufacturer details used for targeted searches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInfo {
    pub manufacturer: String,
    pub parent_company: String,
    pub official_sites: Vec<String>,
    pub nutrition_site_candidates: Vec<String>,
    pub product_image_site_candidates: Vec<String>,
    pub product_line: String,
}

impl BrandInfo {
    /// Brand info that only knows the manufacturer
    pub fn manufacturer(name: impl Into<String>) -> Self {
        Self {
            manufacturer: name.into(),
            ..Default::default()
        }
    }
}

/// A normalized food document
///
/// All nutrient values in `nutrition_facts` are per 100 g. Multiply by
/// `serving_size_multiplicand` to get the per-serving label value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    /// Run-local sequence number starting at 1
    pub id: i64,
    pub description: String,
    pub food_request_type: FoodRequestType,
    #[serde(rename = "ANDIscore")]
    pub andi_score: f64,
    #[serde(rename = "GlycemicIndex")]
    pub glycemic_index: f64,
    pub nutrition_facts: Option<NutritionFacts>,
    pub serving_size_multiplicand: f64,
    pub data_source: String,
    pub enhanced_at: Option<DateTime<Utc>>,
    pub verified_type: VerifiedType,
    pub verified_date: Option<DateTime<Utc>>,
    pub verified_by: String,
    pub food_image: String,
    pub food_image_thumbnail: String,
    pub nutrition_facts_image: String,
    pub nutrition_facts_image_pending: String,
    pub nutrition_facts_status: NutritionFactsStatus,
    pub tokens_used: Option<i64>,
    pub estimated_cost: Option<f64>,
    pub brand_info: Option<BrandInfo>,
    /// Recipes are never produced by the importer; kept for document shape
    pub recipe: Option<serde_json::Value>,
}

impl Food {
    /// Document skeleton with every enrichment placeholder empty
    pub fn new(id: i64, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            food_request_type: FoodRequestType::Unknown,
            andi_score: 0.0,
            glycemic_index: 0.0,
            nutrition_facts: None,
            serving_size_multiplicand: 1.0,
            data_source: String::new(),
            enhanced_at: None,
            verified_type: VerifiedType::Unknown,
            verified_date: None,
            verified_by: String::new(),
            food_image: String::new(),
            food_image_thumbnail: String::new(),
            nutrition_facts_image: String::new(),
            nutrition_facts_image_pending: String::new(),
            nutrition_facts_status: NutritionFactsStatus::Pending,
            tokens_used: None,
            estimated_cost: None,
            brand_info: None,
            recipe: None,
        }
    }

    /// Serialize to the JSON document stored by the sink
    pub fn to_document(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
