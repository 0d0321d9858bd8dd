use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UnitOfMeasure {
    pub id: Uuid,
    pub description: String,
}

impl UnitOfMeasure {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub description: String,
}

impl Category {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
        }
    }
}

/// Free-text notes owned by a single recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notes {
    pub id: Uuid,
    pub recipe_notes: String,
}

impl Notes {
    pub fn new(recipe_notes: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipe_notes: recipe_notes.into(),
        }
    }
}

/// A quantity of something, owned by its recipe and tagged with a unit of
/// measure that must already exist in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub id: Uuid,
    pub description: String,
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    pub unit_of_measure: UnitOfMeasure,
}

impl Ingredient {
    pub fn new(
        description: impl Into<String>,
        amount: BigDecimal,
        unit_of_measure: UnitOfMeasure,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            unit_of_measure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "difficulty", rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    KindOfHard,
    Hard,
}

/// A recipe aggregate: the recipe row together with its owned ingredients
/// and notes, and references to existing categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: Uuid,
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub source: String,
    pub url: String,
    pub directions: String,
    pub difficulty: Difficulty,
    pub notes: Notes,
    pub ingredients: Vec<Ingredient>,
    pub categories: Vec<Category>,
    pub created_at: OffsetDateTime,
}

impl Recipe {
    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }
}

/// Flat projection of a recipe row for list endpoints.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub description: String,
    pub difficulty: Difficulty,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub created_at: OffsetDateTime,
}

/// Platform-wide row counts.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Stats {
    pub recipes: i64,
    pub categories: i64,
    pub units_of_measure: i64,
}

/// Row shape shared by the storage layers when reading recipes back.
#[derive(Debug, FromRow)]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub source: String,
    pub url: String,
    pub directions: String,
    pub difficulty: Difficulty,
    pub created_at: OffsetDateTime,
}

impl RecipeRow {
    pub(crate) fn into_recipe(
        self,
        notes: Notes,
        ingredients: Vec<Ingredient>,
        categories: Vec<Category>,
    ) -> Recipe {
        Recipe {
            id: self.id,
            description: self.description,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            source: self.source,
            url: self.url,
            directions: self.directions,
            difficulty: self.difficulty,
            notes,
            ingredients,
            categories,
            created_at: self.created_at,
        }
    }
}

/// Ingredient row joined with its unit of measure.
#[derive(Debug, FromRow)]
pub(crate) struct IngredientRow {
    pub id: Uuid,
    pub description: String,
    pub amount: BigDecimal,
    pub unit_id: Uuid,
    pub unit_description: String,
}

impl IngredientRow {
    pub(crate) fn into_ingredient(self) -> Ingredient {
        Ingredient {
            id: self.id,
            description: self.description,
            amount: self.amount,
            unit_of_measure: UnitOfMeasure {
                id: self.unit_id,
                description: self.unit_description,
            },
        }
    }
}
