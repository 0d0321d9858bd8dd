//! HTTP request handlers for the recipe catalog API.

pub mod categories;
pub mod recipes;
pub mod stats;
pub mod units;

// Re-export handlers from submodules (including utoipa __path types for OpenAPI)
pub use categories::{__path_list_categories, list_categories};
pub use recipes::{__path_get_recipe, __path_list_recipes, get_recipe, list_recipes};
pub use stats::{__path_get_stats, __path_health_check, get_stats, health_check};
pub use units::{__path_list_units_of_measure, list_units_of_measure};
