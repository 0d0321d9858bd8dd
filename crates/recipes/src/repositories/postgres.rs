//! Transaction-scoped PostgreSQL implementation of the catalog stores.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;

use crate::models::{Category, Ingredient, IngredientRow, Notes, Recipe, RecipeRow, UnitOfMeasure};
use crate::repositories::{CategoryStore, RecipeStore, StoreError, UnitOfMeasureStore};

/// All three store traits backed by a single open transaction.
///
/// Everything written through a `PgCatalog` becomes visible to other
/// connections only on [`commit`](PgCatalog::commit); dropping the catalog
/// without committing rolls the whole batch back.
pub struct PgCatalog {
    tx: Mutex<Transaction<'static, Postgres>>,
}

impl PgCatalog {
    /// Opens a new transaction on the pool.
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tx: Mutex::new(pool.begin().await?),
        })
    }

    /// Commits everything written through this catalog.
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.into_inner().commit().await
    }

    /// Discards everything written through this catalog.
    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.into_inner().rollback().await
    }
}

#[async_trait]
impl UnitOfMeasureStore for PgCatalog {
    async fn save(&self, unit: UnitOfMeasure) -> Result<UnitOfMeasure, StoreError> {
        let mut tx = self.tx.lock().await;
        sqlx::query("INSERT INTO units_of_measure (id, description) VALUES ($1, $2)")
            .bind(unit.id)
            .bind(&unit.description)
            .execute(&mut **tx)
            .await?;
        Ok(unit)
    }

    async fn save_all(
        &self,
        units: Vec<UnitOfMeasure>,
    ) -> Result<Vec<UnitOfMeasure>, StoreError> {
        let mut tx = self.tx.lock().await;
        for unit in &units {
            sqlx::query("INSERT INTO units_of_measure (id, description) VALUES ($1, $2)")
                .bind(unit.id)
                .bind(&unit.description)
                .execute(&mut **tx)
                .await?;
        }
        Ok(units)
    }

    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<UnitOfMeasure>, StoreError> {
        let mut tx = self.tx.lock().await;
        let unit = sqlx::query_as(
            "SELECT id, description FROM units_of_measure WHERE description = $1",
        )
        .bind(description)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(unit)
    }
}

#[async_trait]
impl CategoryStore for PgCatalog {
    async fn save(&self, category: Category) -> Result<Category, StoreError> {
        let mut tx = self.tx.lock().await;
        sqlx::query("INSERT INTO categories (id, description) VALUES ($1, $2)")
            .bind(category.id)
            .bind(&category.description)
            .execute(&mut **tx)
            .await?;
        Ok(category)
    }

    async fn save_all(&self, categories: Vec<Category>) -> Result<Vec<Category>, StoreError> {
        let mut tx = self.tx.lock().await;
        for category in &categories {
            sqlx::query("INSERT INTO categories (id, description) VALUES ($1, $2)")
                .bind(category.id)
                .bind(&category.description)
                .execute(&mut **tx)
                .await?;
        }
        Ok(categories)
    }

    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<Category>, StoreError> {
        let mut tx = self.tx.lock().await;
        let category =
            sqlx::query_as("SELECT id, description FROM categories WHERE description = $1")
                .bind(description)
                .fetch_optional(&mut **tx)
                .await?;
        Ok(category)
    }
}

#[async_trait]
impl RecipeStore for PgCatalog {
    async fn save(&self, recipe: Recipe) -> Result<Recipe, StoreError> {
        let mut tx = self.tx.lock().await;
        insert_recipe(&mut tx, &recipe).await?;
        Ok(recipe)
    }

    async fn save_all(&self, recipes: Vec<Recipe>) -> Result<Vec<Recipe>, StoreError> {
        let mut tx = self.tx.lock().await;
        for recipe in &recipes {
            insert_recipe(&mut tx, recipe).await?;
        }
        Ok(recipes)
    }

    async fn find_by_description(&self, description: &str) -> Result<Option<Recipe>, StoreError> {
        let mut tx = self.tx.lock().await;

        let row: Option<RecipeRow> = sqlx::query_as(
            r#"
            SELECT id, description, prep_time, cook_time, servings,
                   source, url, directions, difficulty, created_at
            FROM recipes
            WHERE description = $1
            "#,
        )
        .bind(description)
        .fetch_optional(&mut **tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let notes: Notes =
            sqlx::query_as("SELECT id, recipe_notes FROM notes WHERE recipe_id = $1")
                .bind(row.id)
                .fetch_one(&mut **tx)
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
        .fetch_all(&mut **tx)
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
            "#,
        )
        .bind(row.id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(Some(row.into_recipe(notes, ingredients, categories)))
    }
}

/// Inserts a recipe aggregate: recipe row, notes, ingredients, category links.
async fn insert_recipe(
    tx: &mut Transaction<'static, Postgres>,
    recipe: &Recipe,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO recipes (id, description, prep_time, cook_time, servings,
                             source, url, directions, difficulty, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(recipe.id)
    .bind(&recipe.description)
    .bind(recipe.prep_time)
    .bind(recipe.cook_time)
    .bind(recipe.servings)
    .bind(&recipe.source)
    .bind(&recipe.url)
    .bind(&recipe.directions)
    .bind(recipe.difficulty)
    .bind(recipe.created_at)
    .execute(&mut **tx)
    .await?;

    sqlx::query("INSERT INTO notes (id, recipe_id, recipe_notes) VALUES ($1, $2, $3)")
        .bind(recipe.notes.id)
        .bind(recipe.id)
        .bind(&recipe.notes.recipe_notes)
        .execute(&mut **tx)
        .await?;

    for (position, ingredient) in recipe.ingredients.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO ingredients (id, recipe_id, description, amount,
                                     unit_of_measure_id, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(ingredient.id)
        .bind(recipe.id)
        .bind(&ingredient.description)
        .bind(&ingredient.amount)
        .bind(ingredient.unit_of_measure.id)
        .bind(position as i32)
        .execute(&mut **tx)
        .await?;
    }

    for category in &recipe.categories {
        sqlx::query("INSERT INTO recipe_categories (recipe_id, category_id) VALUES ($1, $2)")
            .bind(recipe.id)
            .bind(category.id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}
