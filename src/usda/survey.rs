//! Survey (FNDDS) food document

use serde::{Deserialize, Serialize};

use super::{de, FoodNutrient};

/// USDA survey food. Nutrient amounts are always per 100 g.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurveyFood {
    #[serde(deserialize_with = "de::whole_number")]
    pub fdc_id: i64,
    #[serde(deserialize_with = "de::null_default")]
    pub description: String,
    #[serde(deserialize_with = "de::null_default")]
    pub food_class: String,
    #[serde(deserialize_with = "de::null_default")]
    pub data_type: String,
    #[serde(deserialize_with = "de::null_default")]
    pub food_code: String,
    /// Publication date as published by FDC, e.g. "10/31/2024"
    #[serde(deserialize_with = "de::null_default")]
    pub publication_date: String,
    #[serde(deserialize_with = "de::null_default")]
    pub food_nutrients: Vec<FoodNutrient>,
    #[serde(deserialize_with = "de::null_default")]
    pub food_portions: Vec<FoodPortion>,
}

impl SurveyFood {
    /// The portion declared first (sequence number 1), if any
    pub fn primary_portion(&self) -> Option<&FoodPortion> {
        self.food_portions.iter().find(|p| p.sequence_number == 1)
    }
}

/// A household portion with its gram weight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FoodPortion {
    #[serde(deserialize_with = "de::whole_number")]
    pub id: i64,
    #[serde(deserialize_with = "de::null_default")]
    pub gram_weight: f64,
    #[serde(deserialize_with = "de::null_default")]
    pub portion_description: String,
    #[serde(deserialize_with = "de::whole_number")]
    pub sequence_number: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_portion_uses_sequence_number() {
        let food = SurveyFood {
            food_portions: vec![
                FoodPortion {
                    gram_weight: 240.0,
                    portion_description: "1 cup".to_string(),
                    sequence_number: 2,
                    ..Default::default()
                },
                FoodPortion {
                    gram_weight: 15.0,
                    portion_description: "1 tablespoon".to_string(),
                    sequence_number: 1,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let primary = food.primary_portion().unwrap();
        assert_eq!(primary.portion_description, "1 tablespoon");
    }

    #[test]
    fn test_primary_portion_absent() {
        let food = SurveyFood::default();
        assert!(food.primary_portion().is_none());
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        let result = serde_json::from_str::<SurveyFood>(r#"{"foodNutrients": "none"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_tolerates_nulls_and_float_integers() {
        let json = r#"{
            "fdcId": 2705385.0,
            "description": "Milk, whole",
            "foodCode": null,
            "foodNutrients": null,
            "foodPortions": [
                {"id": 1.0, "gramWeight": 244.0, "portionDescription": null, "sequenceNumber": 1.0}
            ]
        }"#;
        let food: SurveyFood = serde_json::from_str(json).unwrap();
        assert_eq!(food.fdc_id, 2705385);
        assert!(food.food_code.is_empty());
        assert!(food.food_nutrients.is_empty());
        assert_eq!(food.primary_portion().unwrap().gram_weight, 244.0);
    }

    #[test]
    fn test_decode_rejects_fractional_sequence_number() {
        let json = r#"{"foodPortions": [{"sequenceNumber": 1.5}]}"#;
        assert!(serde_json::from_str::<SurveyFood>(json).is_err());
    }
}
