//! Nutrition facts block
//!
//! Nested in every food document. Nutrient fields are per 100 g.

use serde::{Deserialize, Serialize};

/// Label-style nutrition facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFacts {
    pub food_name: String,
    pub serving_size_household: String,
    pub serving_size_g: f64,
    pub servings_per_container: i64,
    pub calories: f64,
    pub total_fat_g: f64,
    pub saturated_fat_g: f64,
    /// `None` when the source never reported trans fat
    pub trans_fat_g: Option<f64>,
    #[serde(rename = "cholesterolMG")]
    pub cholesterol_mg: f64,
    #[serde(rename = "sodiumMG")]
    pub sodium_mg: f64,
    pub total_carbohydrate_g: f64,
    pub dietary_fiber_g: f64,
    pub total_sugars_g: f64,
    pub added_sugars_g: Option<f64>,
    pub protein_g: f64,
    pub vitamin_d_mcg: f64,
    #[serde(rename = "calciumMG")]
    pub calcium_mg: f64,
    #[serde(rename = "ironMG")]
    pub iron_mg: f64,
    #[serde(rename = "potassiumMG")]
    pub potassium_mg: f64,
    pub ingredients: Vec<String>,
}

impl NutritionFacts {
    /// Empty facts for a food: one serving per container, all nutrients unset
    pub fn new(food_name: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            serving_size_household: String::new(),
            serving_size_g: 0.0,
            servings_per_container: 1,
            calories: 0.0,
            total_fat_g: 0.0,
            saturated_fat_g: 0.0,
            trans_fat_g: None,
            cholesterol_mg: 0.0,
            sodium_mg: 0.0,
            total_carbohydrate_g: 0.0,
            dietary_fiber_g: 0.0,
            total_sugars_g: 0.0,
            added_sugars_g: None,
            protein_g: 0.0,
            vitamin_d_mcg: 0.0,
            calcium_mg: 0.0,
            iron_mg: 0.0,
            potassium_mg: 0.0,
            ingredients: Vec::new(),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let nf = NutritionFacts::new("Oats");
        assert_eq!(nf.servings_per_container, 1);
        assert_eq!(nf.trans_fat_g, None);
        assert!(nf.ingredients.is_empty());
    }

    #[test]
    fn test_field_names() {
        let value = serde_json::to_value(NutritionFacts::new("Oats")).unwrap();
        for key in [
            "foodName",
            "servingSizeHousehold",
            "servingSizeG",
            "servingsPerContainer",
            "totalFatG",
            "transFatG",
            "cholesterolMG",
            "sodiumMG",
            "totalCarbohydrateG",
            "dietaryFiberG",
            "totalSugarsG",
            "addedSugarsG",
            "proteinG",
            "vitaminDMcg",
            "calciumMG",
            "ironMG",
            "potassiumMG",
            "ingredients",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value["transFatG"].is_null());
    }
}
