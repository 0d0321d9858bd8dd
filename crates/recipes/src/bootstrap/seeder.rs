//! The catalog seeder: fixed reference rows and two sample recipes.

use bigdecimal::BigDecimal;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::models::{Category, Difficulty, Ingredient, Notes, Recipe, UnitOfMeasure};
use crate::repositories::{CategoryStore, RecipeStore, StoreError, UnitOfMeasureStore};

const CATEGORY_DESCRIPTIONS: [&str; 4] = ["American", "Italian", "Mexican", "Fast Food"];

const UNIT_DESCRIPTIONS: [&str; 8] = [
    "Teaspoon",
    "Tablespoon",
    "Cup",
    "Pinch",
    "Ounce",
    "Each",
    "Pint",
    "Dash",
];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Expected {entity} \"{description}\" not found")]
    MissingReferenceData {
        entity: &'static str,
        description: String,
    },
}

/// Seeds the catalog through the three store collaborators.
///
/// Reference rows are inserted unconditionally, so repeated runs duplicate
/// them; the recipe lookups are hard dependency checks and abort the run
/// with [`SeedError::MissingReferenceData`] when a row is absent.
pub struct RecipeBootstrap<'a> {
    units: &'a dyn UnitOfMeasureStore,
    categories: &'a dyn CategoryStore,
    recipes: &'a dyn RecipeStore,
}

impl<'a> RecipeBootstrap<'a> {
    pub fn new(
        units: &'a dyn UnitOfMeasureStore,
        categories: &'a dyn CategoryStore,
        recipes: &'a dyn RecipeStore,
    ) -> Self {
        Self {
            units,
            categories,
            recipes,
        }
    }

    /// Runs the whole bootstrap: reference rows first, then the sample
    /// recipes in one bulk save.
    pub async fn run(&self) -> Result<(), SeedError> {
        self.load_categories().await?;
        self.load_units_of_measure().await?;
        let recipes = self.build_recipes().await?;
        let recipes = self.recipes.save_all(recipes).await?;
        info!("Seeded {} recipes", recipes.len());
        Ok(())
    }

    /// Inserts the four fixed categories. No existence check.
    pub async fn load_categories(&self) -> Result<(), SeedError> {
        for description in CATEGORY_DESCRIPTIONS {
            self.categories.save(Category::new(description)).await?;
        }
        info!("Seeded {} categories", CATEGORY_DESCRIPTIONS.len());
        Ok(())
    }

    /// Inserts the eight fixed units of measure. No existence check.
    pub async fn load_units_of_measure(&self) -> Result<(), SeedError> {
        for description in UNIT_DESCRIPTIONS {
            self.units.save(UnitOfMeasure::new(description)).await?;
        }
        info!("Seeded {} units of measure", UNIT_DESCRIPTIONS.len());
        Ok(())
    }

    /// Builds the two sample recipe aggregates from committed reference
    /// rows. Fails if any required unit or category is missing.
    pub async fn build_recipes(&self) -> Result<Vec<Recipe>, SeedError> {
        let each = self.require_unit("Each").await?;
        let tablespoon = self.require_unit("Tablespoon").await?;
        self.require_unit("Teaspoon").await?;
        let dash = self.require_unit("Dash").await?;
        self.require_unit("Pint").await?;
        let cup = self.require_unit("Cup").await?;

        // The teaspoon and pint bindings reuse the tablespoon and dash rows,
        // so several ingredients below carry the wrong unit of measure.
        // TODO: bind teaspoon and pint to their own lookup results; needs a
        // data review first since it changes the persisted sample recipes.
        let teaspoon = tablespoon.clone();
        let pint = dash.clone();

        let american = self.require_category("American").await?;
        let mexican = self.require_category("Mexican").await?;

        let half = BigDecimal::new(5.into(), 1);
        let quarter = BigDecimal::new(25.into(), 2);

        let mut guacamole = Recipe {
            id: Uuid::new_v4(),
            description: "Perfect Guacamole".to_string(),
            prep_time: 10,
            cook_time: 0,
            servings: 4,
            source: "Simply Recipes".to_string(),
            url: "http://www.simplyrecipes.com/recipes/perfect_guacamole/".to_string(),
            directions: "1 Cut avocado, remove flesh: Cut the avocados in half. Remove seed. Score the inside of the avocado with a blunt knife and scoop out the flesh with a spoon\n\
                2 Mash with a fork: Using a fork, roughly mash the avocado. (Don't overdo it! The guacamole should be a little chunky.)\n\
                3 Add salt, lime juice, and the rest: Sprinkle with salt and lime (or lemon) juice. The acid in the lime juice will provide some balance to the richness of the avocado and will help delay the avocados from turning brown.\n\
                Add the chopped onion, cilantro, black pepper, and chiles. Chili peppers vary individually in their hotness. So, start with a half of one chili pepper and add to the guacamole to your desired degree of hotness.\n\
                Remember that much of this is done to taste because of the variability in the fresh ingredients. Start with this recipe and adjust to your taste.\n\
                4 Cover with plastic and chill to store: Place plastic wrap on the surface of the guacamole cover it and to prevent air reaching it. (The oxygen in the air causes oxidation which will turn the guacamole brown.) Refrigerate until ready to serve.\n\
                Chilling tomatoes hurts their flavor, so if you want to add chopped tomato to your guacamole, add it just before serving.\n\
                \n\
                \n\
                Read more: http://www.simplyrecipes.com/recipes/perfect_guacamole/#ixzz4jvpiV9Sd"
                .to_string(),
            difficulty: Difficulty::Easy,
            notes: Notes::new(
                "For a very quick guacamole just take a 1/4 cup of salsa and mix it in with your mashed avocados.\n\
                 Feel free to experiment! One classic Mexican guacamole has pomegranate seeds and chunks of peaches in it (a Diana Kennedy favorite). Try guacamole with added pineapple, mango, or strawberries.\n\
                 The simplest version of guacamole is just mashed avocados with salt. Don't let the lack of availability of other ingredients stop you from making guacamole.\n\
                 To extend a limited supply of avocados, add either sour cream or cottage cheese to your guacamole dip. Purists may be horrified, but so what? It tastes great.\n\
                 \n\
                 \n\
                 Read more: http://www.simplyrecipes.com/recipes/perfect_guacamole/#ixzz4jvoun5ws",
            ),
            ingredients: Vec::new(),
            categories: vec![american.clone(), mexican.clone()],
            created_at: OffsetDateTime::now_utc(),
        };

        guacamole.add_ingredient(Ingredient::new(
            "ripe avocados",
            BigDecimal::from(2),
            each.clone(),
        ));
        guacamole.add_ingredient(Ingredient::new(
            "Kosher salt",
            half.clone(),
            teaspoon.clone(),
        ));
        guacamole.add_ingredient(Ingredient::new(
            "fresh lime juice or lemon juice",
            BigDecimal::from(2),
            tablespoon.clone(),
        ));
        guacamole.add_ingredient(Ingredient::new(
            "minced red onion or thinly sliced green onion",
            BigDecimal::from(2),
            tablespoon.clone(),
        ));
        guacamole.add_ingredient(Ingredient::new(
            "serrano chiles, stems and seeds removed, minced",
            BigDecimal::from(2),
            each.clone(),
        ));
        guacamole.add_ingredient(Ingredient::new(
            "Cilantro",
            BigDecimal::from(2),
            tablespoon.clone(),
        ));
        guacamole.add_ingredient(Ingredient::new(
            "freshly grated black pepper",
            BigDecimal::from(2),
            dash,
        ));
        guacamole.add_ingredient(Ingredient::new(
            "ripe tomato, seeds and pulp removed, chopped",
            half.clone(),
            each.clone(),
        ));

        let mut tacos = Recipe {
            id: Uuid::new_v4(),
            description: "Spicy Grilled Chicken Taco".to_string(),
            prep_time: 20,
            cook_time: 9,
            servings: 4,
            source: "Simply Recipes".to_string(),
            url: "http://www.simplyrecipes.com/recipes/spicy_grilled_chicken_tacos/".to_string(),
            directions: "1 Prepare a gas or charcoal grill for medium-high, direct heat.\n\
                2 Make the marinade and coat the chicken: In a large bowl, stir together the chili powder, oregano, cumin, sugar, salt, garlic and orange zest. Stir in the orange juice and olive oil to make a loose paste. Add the chicken to the bowl and toss to coat all over.\n\
                Set aside to marinate while the grill heats and you prepare the rest of the toppings.\n\
                \n\
                \n\
                3 Grill the chicken: Grill the chicken for 3 to 4 minutes per side, or until a thermometer inserted into the thickest part of the meat registers 165F. Transfer to a plate and rest for 5 minutes.\n\
                4 Warm the tortillas: Place each tortilla on the grill or on a hot, dry skillet over medium-high heat. As soon as you see pockets of the air start to puff up in the tortilla, turn it with tongs and heat for a few seconds on the other side.\n\
                Wrap warmed tortillas in a tea towel to keep them warm until serving.\n\
                5 Assemble the tacos: Slice the chicken into strips. On each tortilla, place a small handful of arugula. Top with chicken slices, sliced avocado, radishes, tomatoes, and onion slices. Drizzle with the thinned sour cream. Serve with lime wedges.\n\
                \n\
                \n\
                Read more: http://www.simplyrecipes.com/recipes/spicy_grilled_chicken_tacos/#ixzz4jvtrAnNm"
                .to_string(),
            difficulty: Difficulty::Moderate,
            notes: Notes::new(
                "We have a family motto and it is this: Everything goes better in a tortilla.\n\
                 Any and every kind of leftover can go inside a warm tortilla, usually with a healthy dose of pickled jalapenos. I can always sniff out a late-night snacker when the aroma of tortillas heating in a hot pan on the stove comes wafting through the house.\n\
                 Today\u{2019}s tacos are more purposeful \u{2013} a deliberate meal instead of a secretive midnight snack!\n\
                 First, I marinate the chicken briefly in a spicy paste of ancho chile powder, oregano, cumin, and sweet orange juice while the grill is heating. You can also use this time to prepare the taco toppings.\n\
                 Grill the chicken, then let it rest while you warm the tortillas. Now you are ready to assemble the tacos and dig in. The whole meal comes together in about 30 minutes!\n\
                 \n\
                 \n\
                 Read more: http://www.simplyrecipes.com/recipes/spicy_grilled_chicken_tacos/#ixzz4jvu7Q0MJ",
            ),
            ingredients: Vec::new(),
            categories: vec![american, mexican],
            created_at: OffsetDateTime::now_utc(),
        };

        tacos.add_ingredient(Ingredient::new(
            "Ancho Chili Powder",
            BigDecimal::from(2),
            tablespoon.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "Dried Oregano",
            BigDecimal::from(1),
            teaspoon.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "Dried Cumin",
            BigDecimal::from(1),
            teaspoon.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "Sugar",
            BigDecimal::from(1),
            teaspoon.clone(),
        ));
        tacos.add_ingredient(Ingredient::new("Salt", half.clone(), teaspoon.clone()));
        tacos.add_ingredient(Ingredient::new(
            "Clove of Garlic, Choppedr",
            BigDecimal::from(1),
            each.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "finely grated orange zestr",
            BigDecimal::from(1),
            tablespoon.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "fresh-squeezed orange juice",
            BigDecimal::from(3),
            tablespoon.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "Olive Oil",
            BigDecimal::from(2),
            tablespoon.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "boneless chicken thighs",
            BigDecimal::from(4),
            tablespoon.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "small corn tortillasr",
            BigDecimal::from(8),
            each.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "packed baby arugula",
            BigDecimal::from(3),
            cup.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "medium ripe avocados, slic",
            BigDecimal::from(2),
            each.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "radishes, thinly sliced",
            BigDecimal::from(4),
            each.clone(),
        ));
        tacos.add_ingredient(Ingredient::new("cherry tomatoes, halved", half, pint));
        tacos.add_ingredient(Ingredient::new(
            "red onion, thinly sliced",
            quarter,
            each.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "Roughly chopped cilantro",
            BigDecimal::from(4),
            each.clone(),
        ));
        tacos.add_ingredient(Ingredient::new(
            "cup sour cream thinned with 1/4 cup milk",
            BigDecimal::from(4),
            cup,
        ));
        tacos.add_ingredient(Ingredient::new(
            "lime, cut into wedges",
            BigDecimal::from(4),
            each,
        ));

        Ok(vec![guacamole, tacos])
    }

    async fn require_unit(&self, description: &str) -> Result<UnitOfMeasure, SeedError> {
        self.units
            .find_by_description(description)
            .await?
            .ok_or_else(|| SeedError::MissingReferenceData {
                entity: "unit of measure",
                description: description.to_string(),
            })
    }

    async fn require_category(&self, description: &str) -> Result<Category, SeedError> {
        self.categories
            .find_by_description(description)
            .await?
            .ok_or_else(|| SeedError::MissingReferenceData {
                entity: "category",
                description: description.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::repositories::MemoryCatalog;

    async fn seeded_catalog() -> MemoryCatalog {
        let catalog = MemoryCatalog::new();
        RecipeBootstrap::new(&catalog, &catalog, &catalog)
            .run()
            .await
            .unwrap();
        catalog
    }

    #[tokio::test]
    async fn test_run_seeds_reference_data() {
        let catalog = seeded_catalog().await;

        assert_eq!(catalog.units().len(), 8);
        let units: HashSet<String> = catalog
            .units()
            .into_iter()
            .map(|u| u.description)
            .collect();
        let expected: HashSet<String> =
            UNIT_DESCRIPTIONS.iter().map(|s| s.to_string()).collect();
        assert_eq!(units, expected);

        assert_eq!(catalog.categories().len(), 4);
        let categories: HashSet<String> = catalog
            .categories()
            .into_iter()
            .map(|c| c.description)
            .collect();
        let expected: HashSet<String> = CATEGORY_DESCRIPTIONS
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(categories, expected);
    }

    #[tokio::test]
    async fn test_run_seeds_two_recipes_in_order() {
        let catalog = seeded_catalog().await;

        let recipes = catalog.recipes();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].description, "Perfect Guacamole");
        assert_eq!(recipes[1].description, "Spicy Grilled Chicken Taco");
    }

    #[tokio::test]
    async fn test_guacamole_ingredients() {
        let catalog = seeded_catalog().await;

        let recipes = catalog.recipes();
        let guacamole = &recipes[0];
        assert_eq!(guacamole.ingredients.len(), 8);

        let first = &guacamole.ingredients[0];
        assert_eq!(first.description, "ripe avocados");
        assert_eq!(first.amount, BigDecimal::from(2));
        assert_eq!(first.unit_of_measure.description, "Each");
    }

    #[tokio::test]
    async fn test_taco_metadata() {
        let catalog = seeded_catalog().await;

        let recipes = catalog.recipes();
        let tacos = &recipes[1];
        assert_eq!(tacos.difficulty, Difficulty::Moderate);
        assert_eq!(tacos.prep_time, 20);
        assert_eq!(tacos.cook_time, 9);
        assert_eq!(tacos.servings, 4);

        let categories: HashSet<&str> = tacos
            .categories
            .iter()
            .map(|c| c.description.as_str())
            .collect();
        assert_eq!(categories, HashSet::from(["American", "Mexican"]));
    }

    #[tokio::test]
    async fn test_unit_misbinding_is_preserved() {
        let catalog = seeded_catalog().await;
        let recipes = catalog.recipes();

        // Teaspoon-labelled amounts carry the tablespoon row, and the pint
        // amount carries the dash row.
        let salt = recipes[0]
            .ingredients
            .iter()
            .find(|i| i.description == "Kosher salt")
            .unwrap();
        assert_eq!(salt.unit_of_measure.description, "Tablespoon");

        let tomatoes = recipes[1]
            .ingredients
            .iter()
            .find(|i| i.description == "cherry tomatoes, halved")
            .unwrap();
        assert_eq!(tomatoes.unit_of_measure.description, "Dash");
    }

    #[tokio::test]
    async fn test_missing_category_fails_and_persists_no_recipe() {
        let catalog = MemoryCatalog::new();
        let bootstrap = RecipeBootstrap::new(&catalog, &catalog, &catalog);

        bootstrap.load_units_of_measure().await.unwrap();
        CategoryStore::save(&catalog, Category::new("American"))
            .await
            .unwrap();

        match bootstrap.build_recipes().await.unwrap_err() {
            SeedError::MissingReferenceData {
                entity,
                description,
            } => {
                assert_eq!(entity, "category");
                assert_eq!(description, "Mexican");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(catalog.recipes().is_empty());
    }

    #[tokio::test]
    async fn test_missing_unit_fails() {
        let catalog = MemoryCatalog::new();
        let bootstrap = RecipeBootstrap::new(&catalog, &catalog, &catalog);

        bootstrap.load_categories().await.unwrap();

        match bootstrap.build_recipes().await.unwrap_err() {
            SeedError::MissingReferenceData {
                entity,
                description,
            } => {
                assert_eq!(entity, "unit of measure");
                assert_eq!(description, "Each");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(catalog.recipes().is_empty());
    }

    #[tokio::test]
    async fn test_run_twice_duplicates_reference_rows() {
        let catalog = seeded_catalog().await;
        RecipeBootstrap::new(&catalog, &catalog, &catalog)
            .run()
            .await
            .unwrap();

        assert_eq!(catalog.units().len(), 16);
        assert_eq!(catalog.categories().len(), 8);
        assert_eq!(catalog.recipes().len(), 4);
    }
}
