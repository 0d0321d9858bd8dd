//! Startup seeding of the recipe catalog.
//!
//! [`RecipeBootstrap`] ensures the fixed reference rows exist and persists
//! the two sample recipe aggregates. [`seed`] wraps the whole run in a
//! single transaction so a failed bootstrap leaves nothing behind.

mod seeder;

pub use seeder::{RecipeBootstrap, SeedError};

use sqlx::PgPool;
use tracing::info;

use crate::repositories::PgCatalog;

/// Runs the bootstrap once, inside one all-or-nothing transaction.
///
/// Invoked by the binaries after migrations have been applied. Note that the
/// bootstrap itself is not idempotent: every call inserts a fresh set of
/// reference rows and recipes.
pub async fn seed(pool: &PgPool) -> Result<(), SeedError> {
    let catalog = PgCatalog::begin(pool).await?;
    let bootstrap = RecipeBootstrap::new(&catalog, &catalog, &catalog);
    bootstrap.run().await?;
    catalog.commit().await?;
    info!("Catalog seeding committed");
    Ok(())
}

/// Clears all seeded catalog data.
///
/// **WARNING**: This deletes all rows from the catalog tables. Use with
/// caution.
pub async fn clear(pool: &PgPool) -> Result<(), SeedError> {
    info!("Clearing seeded catalog data...");

    // Order matters due to foreign key constraints
    sqlx::query("DELETE FROM recipe_categories")
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM ingredients").execute(pool).await?;
    sqlx::query("DELETE FROM notes").execute(pool).await?;
    sqlx::query("DELETE FROM recipes").execute(pool).await?;
    sqlx::query("DELETE FROM categories").execute(pool).await?;
    sqlx::query("DELETE FROM units_of_measure")
        .execute(pool)
        .await?;

    info!("Catalog data cleared");
    Ok(())
}
