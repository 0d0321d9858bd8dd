//! Recipe listing and aggregate retrieval handlers.

use axum::{Extension, extract::Path, response::Json};
use uuid::Uuid;

use crate::{
    database::Database,
    errors::AppError,
    models::{Recipe, RecipeSummary},
};

/// List all recipes.
#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "List of all recipes", body = Vec<RecipeSummary>)
    )
)]
pub async fn list_recipes(
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    let recipes = db.list_recipes().await?;
    Ok(Json(recipes))
}

/// Get a single recipe with its ingredients, notes, and categories.
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "The recipe aggregate", body = Recipe),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn get_recipe(
    Extension(db): Extension<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = db.get_recipe(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(recipe))
}
