use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    Category, Ingredient, IngredientRow, Notes, Recipe, RecipeRow, RecipeSummary, Stats,
    UnitOfMeasure,
};

/// Pool-backed read layer for the HTTP handlers.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_recipes(&self) -> Result<Vec<RecipeSummary>, AppError> {
        let recipes = sqlx::query_as(
            r#"
            SELECT id, description, difficulty, prep_time, cook_time, servings, created_at
            FROM recipes
            ORDER BY created_at, description
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(recipes)
    }

    /// Assembles the full recipe aggregate: row, notes, ordered ingredients
    /// with their units, and category references.
    pub async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, AppError> {
        let row: Option<RecipeRow> = sqlx::query_as(
            r#"
            SELECT id, description, prep_time, cook_time, servings,
                   source, url, directions, difficulty, created_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let notes: Notes =
            sqlx::query_as("SELECT id, recipe_notes FROM notes WHERE recipe_id = $1")
                .bind(row.id)
                .fetch_one(&self.pool)
                .await?;

        let ingredient_rows: Vec<IngredientRow> = sqlx::query_as(
            r#"
            SELECT i.id, i.description, i.amount,
                   u.id AS unit_id, u.description AS unit_description
            FROM ingredients i
            JOIN units_of_measure u ON u.id = i.unit_of_measure_id
            WHERE i.recipe_id = $1
            ORDER BY i.position
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;
        let ingredients: Vec<Ingredient> = ingredient_rows
            .into_iter()
            .map(IngredientRow::into_ingredient)
            .collect();

        let categories: Vec<Category> = sqlx::query_as(
            r#"
            SELECT c.id, c.description
            FROM categories c
            JOIN recipe_categories rc ON rc.category_id = c.id
            WHERE rc.recipe_id = $1
            ORDER BY c.description
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_recipe(notes, ingredients, categories)))
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories =
            sqlx::query_as("SELECT id, description FROM categories ORDER BY description")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    pub async fn list_units_of_measure(&self) -> Result<Vec<UnitOfMeasure>, AppError> {
        let units =
            sqlx::query_as("SELECT id, description FROM units_of_measure ORDER BY description")
                .fetch_all(&self.pool)
                .await?;

        Ok(units)
    }

    pub async fn get_stats(&self) -> Result<Stats, AppError> {
        let recipes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await?;
        let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        let units_of_measure: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM units_of_measure")
            .fetch_one(&self.pool)
            .await?;

        Ok(Stats {
            recipes,
            categories,
            units_of_measure,
        })
    }
}
