//! USDA FoodData Central source records
//!
//! Shapes of the survey (FNDDS) and branded documents as they sit in the source store.
//! Every field defaults when absent so that incomplete documents still decode.

mod branded;
mod de;
pub mod fdc_file;
mod survey;

pub use branded::BrandedFood;
pub use fdc_file::{load_fdc_file, LoadError};
pub use survey::{FoodPortion, SurveyFood};

use serde::{Deserialize, Serialize};

/// One nutrient amount attached to a food
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FoodNutrient {
    #[serde(rename = "type", deserialize_with = "de::null_default")]
    pub kind: String,
    #[serde(deserialize_with = "de::whole_number")]
    pub id: i64,
    #[serde(deserialize_with = "de::null_default")]
    pub nutrient: Nutrient,
    /// Amount in the food's reporting basis (per 100 g for survey, per serving for branded)
    #[serde(deserialize_with = "de::null_default")]
    pub amount: f64,
}

impl FoodNutrient {
    /// Canonical nutrient code used for the code-table lookup
    pub fn nutrient_id(&self) -> i64 {
        self.nutrient.id
    }
}

/// Nutrient definition nested in each [`FoodNutrient`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Nutrient {
    #[serde(deserialize_with = "de::whole_number")]
    pub id: i64,
    #[serde(deserialize_with = "de::null_default")]
    pub number: String,
    #[serde(deserialize_with = "de::null_default")]
    pub name: String,
    #[serde(deserialize_with = "de::whole_number")]
    pub rank: i64,
    #[serde(deserialize_with = "de::null_default")]
    pub unit_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_nutrient_decodes_fdc_shape() {
        let json = r#"{
            "type": "FoodNutrient",
            "id": 31486021,
            "nutrient": {"id": 1008, "number": "208", "name": "Energy", "rank": 300, "unitName": "kcal"},
            "amount": 52.0
        }"#;
        let fnut: FoodNutrient = serde_json::from_str(json).unwrap();
        assert_eq!(fnut.kind, "FoodNutrient");
        assert_eq!(fnut.nutrient_id(), 1008);
        assert_eq!(fnut.nutrient.unit_name, "kcal");
        assert!((fnut.amount - 52.0).abs() < 1e-9);
    }

    #[test]
    fn test_food_nutrient_missing_fields_default() {
        let fnut: FoodNutrient = serde_json::from_str(r#"{"nutrient": {"id": 1003}}"#).unwrap();
        assert_eq!(fnut.nutrient_id(), 1003);
        assert_eq!(fnut.amount, 0.0);
    }

    #[test]
    fn test_food_nutrient_null_fields_default() {
        let json = r#"{
            "type": null,
            "id": 7.0,
            "nutrient": {"id": 1093.0, "number": null, "name": "Sodium, Na", "rank": null, "unitName": null},
            "amount": null
        }"#;
        let fnut: FoodNutrient = serde_json::from_str(json).unwrap();
        assert_eq!(fnut.id, 7);
        assert_eq!(fnut.nutrient_id(), 1093);
        assert_eq!(fnut.nutrient.rank, 0);
        assert!(fnut.kind.is_empty());
        assert_eq!(fnut.amount, 0.0);

        let fnut: FoodNutrient = serde_json::from_str(r#"{"nutrient": null}"#).unwrap();
        assert_eq!(fnut.nutrient_id(), 0);
    }
}
