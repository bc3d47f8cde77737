//! Decides which fridge ingredients a recipe actually uses.
//!
//! Matching is generous: an ingredient counts as used when its
//! name, a plural/singular form, a known synonym, or (for multi-word names)
//! any longer word of it appears anywhere in the recipe text.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Returns the entries of `pool` that `recipe_text` refers to, in pool order.
///
/// # Example
/// ```
/// use fridge_scan::extract_recipe_ingredients;
///
/// let used = extract_recipe_ingredients("Use 2 tomatoes and onion", &["Tomato", "Onion", "Sugar"]);
/// assert_eq!(used, vec!["Tomato", "Onion"]);
/// ```
pub fn extract_recipe_ingredients<S: AsRef<str>>(recipe_text: &str, pool: &[S]) -> Vec<String> {
    if recipe_text.is_empty() || pool.is_empty() {
        return Vec::new();
    }

    let recipe_text = recipe_text.to_lowercase();

    pool.iter()
        .map(|ingredient| ingredient.as_ref())
        .filter(|ingredient| is_ingredient_in_recipe(ingredient, &recipe_text))
        .map(String::from)
        .collect()
}

/// `recipe_text` must already be lower-cased.
fn is_ingredient_in_recipe(ingredient: &str, recipe_text: &str) -> bool {
    let ingredient = ingredient.trim().to_lowercase();
    if ingredient.is_empty() {
        return false;
    }

    recipe_text.contains(&ingredient)
        || ingredient_variations(&ingredient)
            .iter()
            .any(|variation| recipe_text.contains(variation.as_str()))
}

/// Alternative spellings worth looking for when `ingredient` (lower-cased)
/// does not appear verbatim. The first entry is always the name itself.
pub fn ingredient_variations(ingredient: &str) -> Vec<String> {
    let mut variations = vec![ingredient.to_string()];

    match ingredient.strip_suffix('s') {
        Some(singular) => variations.push(singular.to_string()),
        None => variations.push(format!("{ingredient}s")),
    }

    variations.extend(synonyms(ingredient).iter().map(|s| s.to_string()));

    if ingredient.contains(' ') {
        variations.extend(
            ingredient
                .split(' ')
                .filter(|word| word.chars().count() > 2)
                .map(String::from),
        );
    }

    let mut seen = HashSet::new();
    variations.retain(|variation| seen.insert(variation.clone()));
    variations
}

fn synonyms(ingredient: &str) -> &'static [&'static str] {
    match ingredient {
        "tomato" => &["tomatoes", "tomato paste", "diced tomatoes", "tomato sauce"],
        "tomatoes" => &["tomato", "tomato paste", "diced tomatoes", "tomato sauce"],
        "onion" => &["onions", "yellow onion", "white onion", "red onion"],
        "onions" => &["onion", "yellow onion", "white onion", "red onion"],
        "chicken" => &["chicken breast", "chicken thigh", "chicken leg", "poultry"],
        "beef" => &["ground beef", "beef steak", "beef roast"],
        "potato" => &["potatoes", "russet potato", "red potato"],
        "potatoes" => &["potato", "russet potato", "red potato"],
        "cheese" => &["cheddar cheese", "mozzarella cheese", "parmesan cheese"],
        "milk" => &["whole milk", "skim milk", "2% milk"],
        "oil" => &["olive oil", "vegetable oil", "cooking oil"],
        "salt" => &["sea salt", "table salt", "kosher salt"],
        "pepper" => &["black pepper", "white pepper", "ground pepper"],
        "egg" => &["eggs", "large egg", "chicken egg"],
        "eggs" => &["egg", "large egg", "chicken egg"],
        "flour" => &["all-purpose flour", "wheat flour"],
        "sugar" => &["white sugar", "brown sugar", "granulated sugar"],
        "butter" => &["unsalted butter", "salted butter"],
        "garlic" => &["garlic clove", "minced garlic", "garlic powder"],
        "rice" => &["white rice", "brown rice", "jasmine rice"],
        "pasta" => &["spaghetti", "penne", "macaroni", "noodles"],
        "bread" => &["white bread", "wheat bread", "sourdough bread"],
        "carrot" => &["carrots", "baby carrots"],
        "carrots" => &["carrot", "baby carrots"],
        _ => &[],
    }
}

/// A recipe string of the form `"Name: description"`, split apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeParts {
    pub recipe_name: String,
    pub description: String,
}

/// Split `recipe` on its first colon. Without a colon the whole string is the name.
pub fn parse_recipe_string(recipe: &str) -> RecipeParts {
    match recipe.split_once(':') {
        Some((name, description)) => RecipeParts {
            recipe_name: name.trim().to_string(),
            description: description.trim().to_string(),
        },
        None => RecipeParts {
            recipe_name: recipe.trim().to_string(),
            description: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_match_is_case_insensitive() {
        let used = extract_recipe_ingredients("Whisk the EGGS with milk", &["Eggs", "Milk", "Flour"]);
        assert_eq!(used, vec!["Eggs", "Milk"]);
    }

    #[test]
    fn test_singular_pool_entry_matches_plural_text() {
        let used = extract_recipe_ingredients("Use 2 tomatoes and onion", &["Tomato", "Onion", "Sugar"]);
        assert_eq!(used, vec!["Tomato", "Onion"]);
    }

    #[test]
    fn test_plural_pool_entry_matches_singular_text() {
        let used = extract_recipe_ingredients("Slice one carrot", &["Carrots"]);
        assert_eq!(used, vec!["Carrots"]);
    }

    #[test]
    fn test_synonym_match() {
        let used = extract_recipe_ingredients("Boil the spaghetti", &["Pasta", "Rice"]);
        assert_eq!(used, vec!["Pasta"]);

        let used = extract_recipe_ingredients("Roast with poultry seasoning", &["chicken"]);
        assert_eq!(used, vec!["chicken"]);
    }

    #[test]
    fn test_multi_word_entry_matches_on_a_single_word() {
        let used = extract_recipe_ingredients("Grilled Cheese Sandwich", &["Cheddar Cheese", "Bell Peppers"]);
        assert_eq!(used, vec!["Cheddar Cheese"]);
    }

    #[test]
    fn test_short_words_are_not_used_for_matching() {
        // "of" is too short to count on its own
        let used = extract_recipe_ingredients("Cup of coffee", &["Jar of pickles"]);
        assert!(used.is_empty());
    }

    #[test]
    fn test_pool_order_is_preserved() {
        let used = extract_recipe_ingredients("onion, garlic and butter", &["Butter", "Garlic", "Onion"]);
        assert_eq!(used, vec!["Butter", "Garlic", "Onion"]);
    }

    #[test]
    fn test_empty_inputs() {
        let empty: [&str; 0] = [];
        assert!(extract_recipe_ingredients("", &empty).is_empty());
        assert!(extract_recipe_ingredients("Omelette", &empty).is_empty());
        assert!(extract_recipe_ingredients("", &["Eggs"]).is_empty());
        assert!(extract_recipe_ingredients("Omelette", &["", "  "]).is_empty());
    }

    #[test]
    fn test_accepts_owned_strings() {
        let pool = vec!["Milk".to_string(), "Honey".to_string()];
        assert_eq!(extract_recipe_ingredients("Warm milk", &pool), vec!["Milk"]);
    }

    #[test]
    fn test_variations() {
        let variations = ingredient_variations("tomato");
        assert_eq!(variations[0], "tomato");
        assert!(variations.contains(&"tomatoes".to_string()));
        assert!(variations.contains(&"tomato sauce".to_string()));
        // "tomatoes" is both the plural form and a synonym, listed once
        assert_eq!(variations.iter().filter(|v| *v == "tomatoes").count(), 1);

        let variations = ingredient_variations("red bell peppers");
        assert!(variations.contains(&"red bell pepper".to_string()));
        assert!(variations.contains(&"red".to_string()));
        assert!(variations.contains(&"bell".to_string()));
        assert!(variations.contains(&"peppers".to_string()));
    }

    #[test]
    fn test_parse_recipe_string() {
        assert_eq!(
            parse_recipe_string("Veggie Omelette: Whisk eggs: add spinach "),
            RecipeParts {
                recipe_name: "Veggie Omelette".to_string(),
                description: "Whisk eggs: add spinach".to_string(),
            }
        );
        assert_eq!(
            parse_recipe_string(" Banana Bread "),
            RecipeParts {
                recipe_name: "Banana Bread".to_string(),
                description: String::new(),
            }
        );
    }
}
