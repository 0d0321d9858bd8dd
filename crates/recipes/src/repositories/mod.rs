//! Storage collaborators for the recipe catalog.
//!
//! Each reference table is reached through its own store trait with
//! save / save-all / find-by-description operations. [`PgCatalog`] backs the
//! traits with one PostgreSQL transaction; [`MemoryCatalog`] is the in-memory
//! double used by tests.

mod memory;
mod postgres;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Category, Recipe, UnitOfMeasure};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UnitOfMeasureStore: Send + Sync {
    async fn save(&self, unit: UnitOfMeasure) -> Result<UnitOfMeasure, StoreError>;

    async fn save_all(
        &self,
        units: Vec<UnitOfMeasure>,
    ) -> Result<Vec<UnitOfMeasure>, StoreError>;

    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<UnitOfMeasure>, StoreError>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn save(&self, category: Category) -> Result<Category, StoreError>;

    async fn save_all(&self, categories: Vec<Category>) -> Result<Vec<Category>, StoreError>;

    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<Category>, StoreError>;
}

/// Recipes are persisted as whole aggregates: the recipe row plus its owned
/// notes and ingredients, and its category references.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn save(&self, recipe: Recipe) -> Result<Recipe, StoreError>;

    async fn save_all(&self, recipes: Vec<Recipe>) -> Result<Vec<Recipe>, StoreError>;

    async fn find_by_description(&self, description: &str) -> Result<Option<Recipe>, StoreError>;
}
