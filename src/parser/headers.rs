use super::{strip_bullet, Extraction};
use regex::Regex;
use std::sync::LazyLock;

static INGREDIENTS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\n)\s*(?:ingredients?|items?|food items?|visible items?)[\s:]*\n")
        .expect("valid header regex")
});

static RECIPES_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\n)\s*(?:recipes?|suggestions?|meal ideas?|cooking ideas?)[\s:]*\n")
        .expect("valid header regex")
});

/// Recipe header line inside the ingredient body; ends the ingredient section.
static INGREDIENTS_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\n)\s*(?:recipes?|suggestions?|meal ideas?|cooking ideas?)[\s:]*\n")
        .expect("valid terminator regex")
});

static RECIPE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:recipes?|suggestions?|meal ideas?)").expect("valid word regex")
});

/// Loose "Ingredients" / "Recipes" style headers, each alone on its line.
/// Produces flat lists only.
pub(super) fn extract(text: &str) -> Option<Extraction> {
    let ingredients_start = INGREDIENTS_HEADER.find(text)?.end();
    let recipes_start = RECIPES_HEADER.find(text)?.end();

    let after_header = &text[ingredients_start..];
    let ingredients_section = match INGREDIENTS_END.find(after_header) {
        Some(end) => &after_header[..end.start()],
        None => after_header,
    };

    let ingredients = bullet_items(ingredients_section)
        .filter(|line| !RECIPE_WORD.is_match(line))
        .collect();
    let recipes = bullet_items(&text[recipes_start..]).collect();

    Some(Extraction {
        ingredients,
        recipes,
        detailed: Vec::new(),
    })
}

fn bullet_items(section: &str) -> impl Iterator<Item = String> + '_ {
    section
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(String::from)
}
