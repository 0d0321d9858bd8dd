//! Unit-of-measure reference-data handlers.

use axum::{Extension, response::Json};

use crate::{database::Database, errors::AppError, models::UnitOfMeasure};

/// List all units of measure.
#[utoipa::path(
    get,
    path = "/units",
    tag = "reference",
    responses(
        (status = 200, description = "List of all units of measure", body = Vec<UnitOfMeasure>)
    )
)]
pub async fn list_units_of_measure(
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<UnitOfMeasure>>, AppError> {
    let units = db.list_units_of_measure().await?;
    Ok(Json(units))
}
