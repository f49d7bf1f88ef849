//! Nutrient code table
//!
//! Maps FDC nutrient ids to the nutrition facts field they populate.
//! Codes outside the table are ignored by the mapper.

use crate::models::NutritionFacts;

/// A nutrition facts field fed by a USDA nutrient code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientField {
    Calories,
    Protein,
    TotalFat,
    SaturatedFat,
    TransFat,
    Cholesterol,
    Sodium,
    TotalCarbohydrate,
    DietaryFiber,
    TotalSugars,
    VitaminD,
    Calcium,
    Iron,
    Potassium,
}

/// Every recognised code, in the order the label lists them
pub const NUTRIENT_CODES: [(i64, NutrientField); 14] = [
    (1008, NutrientField::Calories),
    (1003, NutrientField::Protein),
    (1004, NutrientField::TotalFat),
    (1258, NutrientField::SaturatedFat),
    (1257, NutrientField::TransFat),
    (1253, NutrientField::Cholesterol),
    (1093, NutrientField::Sodium),
    (1005, NutrientField::TotalCarbohydrate),
    (1079, NutrientField::DietaryFiber),
    (2000, NutrientField::TotalSugars),
    (1114, NutrientField::VitaminD),
    (1087, NutrientField::Calcium),
    (1089, NutrientField::Iron),
    (1092, NutrientField::Potassium),
];

impl NutrientField {
    /// Look up a nutrient id. `None` means the nutrient is not tracked.
    pub fn from_code(code: i64) -> Option<Self> {
        NUTRIENT_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, field)| *field)
    }

    /// Write an amount into the matching field. Later values overwrite earlier ones.
    pub fn apply(&self, facts: &mut NutritionFacts, amount: f64) {
        match self {
            NutrientField::Calories => facts.calories = amount,
            NutrientField::Protein => facts.protein_g = amount,
            NutrientField::TotalFat => facts.total_fat_g = amount,
            NutrientField::SaturatedFat => facts.saturated_fat_g = amount,
            NutrientField::TransFat => facts.trans_fat_g = Some(amount),
            NutrientField::Cholesterol => facts.cholesterol_mg = amount,
            NutrientField::Sodium => facts.sodium_mg = amount,
            NutrientField::TotalCarbohydrate => facts.total_carbohydrate_g = amount,
            NutrientField::DietaryFiber => facts.dietary_fiber_g = amount,
            NutrientField::TotalSugars => facts.total_sugars_g = amount,
            NutrientField::VitaminD => facts.vitamin_d_mcg = amount,
            NutrientField::Calcium => facts.calcium_mg = amount,
            NutrientField::Iron => facts.iron_mg = amount,
            NutrientField::Potassium => facts.potassium_mg = amount,
        }
    }
}

/// Route one nutrient amount into the facts block. Returns false for untracked codes.
pub fn apply_nutrient(facts: &mut NutritionFacts, code: i64, amount: f64) -> bool {
    match NutrientField::from_code(code) {
        Some(field) => {
            field.apply(facts, amount);
            true
        }
        None => false,
    }
}
