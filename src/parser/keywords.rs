use super::{content_lines, is_detail_line, strip_bullet, Extraction};
use regex::Regex;
use std::sync::LazyLock;

/// Words that make a line read like a dish rather than an ingredient.
///
/// Plain containment, so packaged ingredients such as "Pasta Sauce" or
/// "Soup Stock" land on the recipe side.
const RECIPE_KEYWORDS: [&str; 11] = [
    "recipe", "pasta", "salad", "soup", "sandwich", "stir", "cook", "bake", "fry", "meal", "dish",
];

static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:ingredients?|ingredients found|recipes?|suggestions?|items?|available ingredients|additional needed)[\s:]*$",
    )
    .expect("valid header regex")
});

/// Last resort for replies with no usable structure: every remaining line is
/// either a recipe (contains a dish keyword) or an ingredient.
pub(super) fn extract(text: &str) -> Extraction {
    let mut extraction = Extraction::default();

    for line in content_lines(text) {
        let item = strip_bullet(line);
        let lower = item.to_lowercase();

        if item.is_empty() || SECTION_HEADER.is_match(&lower) || is_detail_line(&lower) {
            continue;
        }

        if looks_like_recipe(&lower) {
            extraction.recipes.push(item.to_string());
        } else {
            extraction.ingredients.push(item.to_string());
        }
    }

    extraction
}

fn looks_like_recipe(lower: &str) -> bool {
    RECIPE_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
