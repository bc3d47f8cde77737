use super::{content_lines, strip_bullet, Extraction, ParsedRecipe};
use regex::Regex;
use std::sync::LazyLock;

static INGREDIENTS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)INGREDIENTS FOUND:\s*\n").expect("valid header regex"));

static RECIPES_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)RECIPES:\s*\n").expect("valid header regex"));

/// Where the ingredient section stops: a line starting with "RECIPES:",
/// possibly the very first one when the section is empty.
static INGREDIENTS_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\n)\s*RECIPES:").expect("valid terminator regex"));

/// A `•` at the very start or right after a newline opens a new recipe block.
static RECIPE_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\n|^)•\s*").expect("valid bullet regex"));

static AVAILABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Available ingredients:\s*(?:\[(.*?)\]|(.*?)(?:\n|$))")
        .expect("valid detail regex")
});

static ADDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Additional needed:\s*(?:\[(.*?)\]|(.*?)(?:\n|$))")
        .expect("valid detail regex")
});

/// The layout the analysis prompt asks for:
///
/// ```text
/// INGREDIENTS FOUND:
/// • Milk
///
/// RECIPES:
/// • Pancakes
///   Available ingredients: [Milk, Eggs]
///   Additional needed: [Flour]
/// ```
///
/// Returns `None` unless both headers are present.
pub(super) fn extract(text: &str) -> Option<Extraction> {
    let ingredients_start = INGREDIENTS_HEADER.find(text)?.end();
    let recipes_start = RECIPES_HEADER.find(text)?.end();

    let after_header = &text[ingredients_start..];
    let ingredients_section = match INGREDIENTS_END.find(after_header) {
        Some(end) => &after_header[..end.start()],
        None => after_header,
    };

    let ingredients = ingredients_section
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    let mut extraction = Extraction {
        ingredients,
        ..Default::default()
    };

    for block in RECIPE_BULLET.split(&text[recipes_start..]) {
        if let Some(recipe) = parse_recipe_block(block.trim()) {
            extraction.recipes.push(recipe.name.clone());
            extraction.detailed.push(recipe);
        }
    }

    Some(extraction)
}

fn parse_recipe_block(block: &str) -> Option<ParsedRecipe> {
    let name = strip_bullet(content_lines(block).next()?);
    if name.is_empty() {
        return None;
    }

    Some(ParsedRecipe {
        name: name.to_string(),
        available_ingredients: detail_list(&AVAILABLE, block),
        additional_needed: detail_list(&ADDITIONAL, block),
    })
}

/// Comma-separated value of a detail field, taken from `[...]` when bracketed
/// and from the rest of the line otherwise.
fn detail_list(field: &Regex, block: &str) -> Vec<String> {
    let Some(captures) = field.captures(block) else {
        return Vec::new();
    };

    let raw = captures
        .get(1)
        .filter(|value| !value.as_str().is_empty())
        .or_else(|| captures.get(2))
        .map_or("", |value| value.as_str());

    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
