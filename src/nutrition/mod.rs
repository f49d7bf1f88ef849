//! Nutrition normalization module
//!
//! Nutrient code lookups and per-100 g normalization.

pub mod converter;
pub mod nutrients;

pub use converter::{serving_size_multiplicand, ReportingBasis, REFERENCE_GRAMS};
pub use nutrients::{apply_nutrient, NutrientField, NUTRIENT_CODES};
