//! Data models
//!
//! Documents written to the target food store.

mod food;
mod nutrition_facts;

pub use food::{BrandInfo, Food, FoodRequestType, NutritionFactsStatus, VerifiedType};
pub use nutrition_facts::NutritionFacts;
