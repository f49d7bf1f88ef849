//! Branded food mapping

use chrono::Utc;

use crate::models::{
    BrandInfo, Food, FoodRequestType, NutritionFacts, NutritionFactsStatus, VerifiedType,
};
use crate::nutrition::{apply_nutrient, serving_size_multiplicand, ReportingBasis};
use crate::usda::BrandedFood;

use super::{parse_publication_date, IMPORT_ACTOR};

/// Data source tag for branded foods
pub const BRANDED_DATA_SOURCE: &str = "USDA-Branded";

/// Convert a USDA branded food to a food document
///
/// Branded nutrients are reported per serving and are rescaled to per 100 g using
/// the stated serving size, read as grams. `servingSizeUnit` is descriptive only.
/// A zero or missing serving size cannot be rescaled: the nutrients are left unset
/// and the multiplicand is 0.
pub fn map_branded_food(source: &BrandedFood, id: i64) -> Food {
    let serving_grams = source.serving_size;

    let mut food = Food::new(id, source.description.clone());
    food.food_request_type = FoodRequestType::Brand;
    food.serving_size_multiplicand = serving_size_multiplicand(serving_grams);
    food.data_source = BRANDED_DATA_SOURCE.to_string();
    food.enhanced_at = Some(Utc::now());
    food.verified_type = VerifiedType::UsdaBrand;
    food.verified_date = parse_publication_date(&source.publication_date);
    food.verified_by = IMPORT_ACTOR.to_string();
    food.nutrition_facts_status = NutritionFactsStatus::Completed;

    if !source.brand_owner.is_empty() {
        food.brand_info = Some(BrandInfo::manufacturer(source.brand_owner.clone()));
    }

    food.nutrition_facts = Some(branded_nutrition_facts(source, serving_grams));
    food
}

fn branded_nutrition_facts(source: &BrandedFood, serving_grams: f64) -> NutritionFacts {
    let mut facts = NutritionFacts::new(source.description.clone());
    facts.serving_size_g = serving_grams;
    facts.serving_size_household = source.household_serving_full_text.clone();

    // The statement is not split; downstream parsers work on the raw text
    if !source.ingredients.is_empty() {
        facts.ingredients = vec![source.ingredients.clone()];
    }

    let basis = ReportingBasis::PerServing {
        grams: serving_grams,
    };
    if !basis.is_convertible() {
        tracing::warn!(
            "Branded food {} has serving size {} {}; nutrients not mapped",
            source.fdc_id,
            source.serving_size,
            source.serving_size_unit
        );
        return facts;
    }

    for nutrient in &source.food_nutrients {
        if let Some(amount) = basis.normalize(nutrient.amount) {
            apply_nutrient(&mut facts, nutrient.nutrient_id(), amount);
        }
    }

    facts
}
