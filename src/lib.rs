//! USDA FoodData Central importer
//!
//! Maps USDA survey and branded foods into the application's food documents,
//! normalizing every nutrient to a per-100 g basis.

pub mod build_info;
pub mod config;
pub mod db;
pub mod import;
pub mod mapper;
pub mod models;
pub mod nutrition;
pub mod runner;
pub mod usda;
