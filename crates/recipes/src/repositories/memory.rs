//! In-memory implementation of the catalog stores.
//!
//! Backed by plain `Vec`s behind mutexes, with the same non-enforcement of
//! description uniqueness as the real schema. Used as the test double for
//! the seeding flow.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{Category, Recipe, UnitOfMeasure};
use crate::repositories::{CategoryStore, RecipeStore, StoreError, UnitOfMeasureStore};

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    units: Mutex<Vec<UnitOfMeasure>>,
    categories: Mutex<Vec<Category>>,
    recipes: Mutex<Vec<Recipe>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the unit-of-measure table.
    pub fn units(&self) -> Vec<UnitOfMeasure> {
        self.units.lock().unwrap().clone()
    }

    /// Snapshot of the category table.
    pub fn categories(&self) -> Vec<Category> {
        self.categories.lock().unwrap().clone()
    }

    /// Snapshot of the recipe table.
    pub fn recipes(&self) -> Vec<Recipe> {
        self.recipes.lock().unwrap().clone()
    }
}

#[async_trait]
impl UnitOfMeasureStore for MemoryCatalog {
    async fn save(&self, unit: UnitOfMeasure) -> Result<UnitOfMeasure, StoreError> {
        self.units.lock().unwrap().push(unit.clone());
        Ok(unit)
    }

    async fn save_all(
        &self,
        units: Vec<UnitOfMeasure>,
    ) -> Result<Vec<UnitOfMeasure>, StoreError> {
        self.units.lock().unwrap().extend(units.iter().cloned());
        Ok(units)
    }

    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<UnitOfMeasure>, StoreError> {
        Ok(self
            .units
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.description == description)
            .cloned())
    }
}

#[async_trait]
impl CategoryStore for MemoryCatalog {
    async fn save(&self, category: Category) -> Result<Category, StoreError> {
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn save_all(&self, categories: Vec<Category>) -> Result<Vec<Category>, StoreError> {
        self.categories
            .lock()
            .unwrap()
            .extend(categories.iter().cloned());
        Ok(categories)
    }

    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<Category>, StoreError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.description == description)
            .cloned())
    }
}

#[async_trait]
impl RecipeStore for MemoryCatalog {
    async fn save(&self, recipe: Recipe) -> Result<Recipe, StoreError> {
        self.recipes.lock().unwrap().push(recipe.clone());
        Ok(recipe)
    }

    async fn save_all(&self, recipes: Vec<Recipe>) -> Result<Vec<Recipe>, StoreError> {
        self.recipes.lock().unwrap().extend(recipes.iter().cloned());
        Ok(recipes)
    }

    async fn find_by_description(&self, description: &str) -> Result<Option<Recipe>, StoreError> {
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.description == description)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_find_unit() {
        let catalog = MemoryCatalog::new();

        let saved = UnitOfMeasureStore::save(&catalog, UnitOfMeasure::new("Teaspoon"))
            .await
            .unwrap();

        let found = UnitOfMeasureStore::find_by_description(&catalog, "Teaspoon")
            .await
            .unwrap();
        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let catalog = MemoryCatalog::new();

        let found = CategoryStore::find_by_description(&catalog, "Mexican")
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_save_all_keeps_duplicates() {
        let catalog = MemoryCatalog::new();

        CategoryStore::save_all(
            &catalog,
            vec![Category::new("American"), Category::new("American")],
        )
        .await
        .unwrap();

        assert_eq!(catalog.categories().len(), 2);
    }
}
