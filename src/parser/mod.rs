//! Turns a free-text vision-model reply into ingredient and recipe lists.
//!
//! The model is asked for a fixed "INGREDIENTS FOUND:" / "RECIPES:" layout but
//! does not always follow it, so parsing runs through a cascade of tiers:
//!
//! 1. [`structured`] - the requested layout, including per-recipe details
//! 2. [`headers`] - any loose "Ingredients" / "Recipes" style headers
//! 3. [`sections`] - line-by-line section tracking
//! 4. [`keywords`] - keyword categorization, only when 1-3 found nothing
//!
//! Parsing never fails: unrecognised input yields an empty [`ParsedResponse`].

mod headers;
mod keywords;
mod sections;
mod structured;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Leading bullet or numbering: any run of `-`, `*`, `•`, digits, `.`, `)` and whitespace.
static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•0-9.\s)]+").expect("valid bullet regex"));

/// A recipe with its own ingredient breakdown, as produced by the structured layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecipe {
    pub name: String,
    /// Ingredients the model says are visible in the photo
    pub available_ingredients: Vec<String>,
    /// Pantry staples the model assumes are on hand
    pub additional_needed: Vec<String>,
}

/// Structured view of one model reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResponse {
    pub ingredients: Vec<String>,
    pub recipes: Vec<String>,
    /// `None` when the structured layout was not detected; never `Some(vec![])`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_recipes: Option<Vec<ParsedRecipe>>,
}

impl ParsedResponse {
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.recipes.is_empty()
    }
}

/// What a single tier pulled out of the text, before deduplication.
#[derive(Debug, Default)]
struct Extraction {
    ingredients: Vec<String>,
    recipes: Vec<String>,
    detailed: Vec<ParsedRecipe>,
}

impl Extraction {
    fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.recipes.is_empty()
    }
}

type Tier = (&'static str, fn(&str) -> Option<Extraction>);

/// Header-driven tiers, tried in order; the first one that recognises its headers wins.
const HEADER_TIERS: [Tier; 2] = [
    ("structured", structured::extract),
    ("headers", headers::extract),
];

/// Parse a model reply into ingredients, recipe names and, when the reply used
/// the structured layout, per-recipe details.
///
/// # Example
/// ```
/// use fridge_scan::parse_ai_response;
///
/// let reply = "INGREDIENTS FOUND:\n• Milk\n• Eggs\n\nRECIPES:\n• Omelette\n  Available ingredients: [Eggs, Milk]\n  Additional needed: [Salt]";
/// let parsed = parse_ai_response(reply);
///
/// assert_eq!(parsed.ingredients, vec!["Milk", "Eggs"]);
/// assert_eq!(parsed.recipes, vec!["Omelette"]);
/// assert_eq!(parsed.detailed_recipes.unwrap()[0].additional_needed, vec!["Salt"]);
/// ```
pub fn parse_ai_response(text: &str) -> ParsedResponse {
    let text = text.trim();

    let (tier, mut extraction) = HEADER_TIERS
        .iter()
        .find_map(|(name, tier)| tier(text).map(|extraction| (*name, extraction)))
        .unwrap_or_else(|| ("sections", sections::extract(text)));

    debug!("Reply parsed with the {} tier", tier);

    if extraction.is_empty() {
        debug!("No ingredients or recipes found, falling back to keyword categorization");
        let keywords = keywords::extract(text);
        extraction.ingredients = keywords.ingredients;
        extraction.recipes = keywords.recipes;
    }

    let parsed = ParsedResponse {
        ingredients: dedupe(extraction.ingredients),
        recipes: dedupe(extraction.recipes),
        detailed_recipes: Some(extraction.detailed).filter(|detailed| !detailed.is_empty()),
    };

    debug!(
        "Parsed {} ingredients, {} recipes, {} detailed recipes",
        parsed.ingredients.len(),
        parsed.recipes.len(),
        parsed.detailed_recipes.as_ref().map_or(0, Vec::len)
    );

    parsed
}

/// Remove a leading bullet/numbering prefix and surrounding whitespace.
pub(crate) fn strip_bullet(line: &str) -> &str {
    match BULLET_PREFIX.find(line) {
        Some(prefix) => line[prefix.end()..].trim(),
        None => line.trim(),
    }
}

/// Lines that carry a recipe's detail sub-fields rather than a name.
fn is_detail_line(lower: &str) -> bool {
    lower.contains("available ingredients:") || lower.contains("additional needed:")
}

/// Trimmed, non-empty lines.
fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Drop empty entries and repeats, keeping first-seen order.
fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.is_empty() && seen.insert(item.clone()))
        .collect()
}
