use crate::matcher::{extract_recipe_ingredients, parse_recipe_string};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// A suggested recipe ready to be saved, carrying only the fridge
/// ingredients it uses.
///
/// Field names follow the saved-recipes table, which mixes snake and camel case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: String,
    pub recipe_name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(rename = "availableIngredients")]
    pub available_ingredients: usize,
    #[serde(rename = "totalIngredients")]
    pub total_ingredients: usize,
    #[serde(rename = "cookTime")]
    pub cook_time: String,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub rating: u8,
}

/// Build the record for one `"Name: description"` recipe string, keeping only
/// the entries of `fridge_ingredients` the recipe mentions.
pub fn prepare_recipe_record<S: AsRef<str>>(recipe: &str, fridge_ingredients: &[S]) -> RecipeRecord {
    let ingredients = extract_recipe_ingredients(recipe, fridge_ingredients);
    let parts = parse_recipe_string(recipe);

    debug!(
        "Recipe '{}' uses {} of {} fridge ingredients",
        parts.recipe_name,
        ingredients.len(),
        fridge_ingredients.len()
    );

    RecipeRecord {
        title: parts.recipe_name.clone(),
        recipe_name: parts.recipe_name,
        available_ingredients: ingredients.len(),
        total_ingredients: ingredients.len(),
        ingredients,
        instructions: parts.description,
        cook_time: "Unknown".to_string(),
        servings: 1,
        difficulty: Difficulty::Medium,
        rating: 0,
    }
}

/// [`prepare_recipe_record`] for a batch of recipe strings, in input order.
pub fn prepare_recipe_records<R, S>(recipes: &[R], fridge_ingredients: &[S]) -> Vec<RecipeRecord>
where
    R: AsRef<str>,
    S: AsRef<str>,
{
    recipes
        .iter()
        .map(|recipe| prepare_recipe_record(recipe.as_ref(), fridge_ingredients))
        .collect()
}
