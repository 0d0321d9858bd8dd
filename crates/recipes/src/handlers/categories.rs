//! Category reference-data handlers.

use axum::{Extension, response::Json};

use crate::{database::Database, errors::AppError, models::Category};

/// List all recipe categories.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "reference",
    responses(
        (status = 200, description = "List of all categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = db.list_categories().await?;
    Ok(Json(categories))
}
