//! Survey food mapping

use chrono::Utc;

use crate::models::{Food, FoodRequestType, NutritionFacts, NutritionFactsStatus, VerifiedType};
use crate::nutrition::{apply_nutrient, ReportingBasis};
use crate::usda::SurveyFood;

use super::{parse_publication_date, IMPORT_ACTOR};

/// Data source tag for FNDDS survey foods
pub const SURVEY_DATA_SOURCE: &str = "USDA-FNDDS";

/// Convert a USDA survey food to a food document
///
/// Survey nutrients are already per 100 g, so the multiplicand is 1.
pub fn map_survey_food(source: &SurveyFood, id: i64) -> Food {
    let mut food = Food::new(id, source.description.clone());
    food.food_request_type = FoodRequestType::Whole;
    food.serving_size_multiplicand = 1.0;
    food.data_source = SURVEY_DATA_SOURCE.to_string();
    food.enhanced_at = Some(Utc::now());
    food.verified_type = VerifiedType::UsdaSurvey;
    food.verified_date = parse_publication_date(&source.publication_date);
    food.verified_by = IMPORT_ACTOR.to_string();
    food.nutrition_facts_status = NutritionFactsStatus::Completed;
    food.nutrition_facts = Some(survey_nutrition_facts(source));
    food
}

fn survey_nutrition_facts(source: &SurveyFood) -> NutritionFacts {
    let mut facts = NutritionFacts::new(source.description.clone());

    // No primary portion leaves the serving fields empty
    if let Some(portion) = source.primary_portion() {
        facts.serving_size_g = portion.gram_weight;
        facts.serving_size_household = portion.portion_description.clone();
    }

    let basis = ReportingBasis::Per100Grams;
    for nutrient in &source.food_nutrients {
        if let Some(amount) = basis.normalize(nutrient.amount) {
            apply_nutrient(&mut facts, nutrient.nutrient_id(), amount);
        }
    }

    facts
}
