use super::{content_lines, is_detail_line, strip_bullet, Extraction};
use regex::Regex;
use std::sync::LazyLock;

static INGREDIENTS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:ingredients?|items?|food items?|visible items?|ingredients found)[\s:]*$")
        .expect("valid header regex")
});

static RECIPES_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:recipes?|suggestions?|meal ideas?|cooking ideas?)[\s:]*$")
        .expect("valid header regex")
});

static BULLETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•0-9.\s)]").expect("valid bullet regex"));

/// Lead-ins like "Here are some recipes:" that announce recipes without naming one.
static INTRODUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:here are|you can make|suggested|recommended)").expect("valid intro regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Unknown,
    Ingredients,
    Recipes,
}

/// Walk the reply line by line, tracking which section the model is in.
///
/// Bulleted lines go to the current section; before any section is known they
/// count as ingredients until a recipe section has been seen. Plain lines that
/// mention recipes switch to the recipe section.
pub(super) fn extract(text: &str) -> Extraction {
    let mut extraction = Extraction::default();
    let mut section = Section::Unknown;
    let mut seen_recipes = false;

    for line in content_lines(text) {
        let lower = line.to_lowercase();

        if INGREDIENTS_HEADER.is_match(&lower) {
            section = Section::Ingredients;
            continue;
        }
        if RECIPES_HEADER.is_match(&lower) {
            section = Section::Recipes;
            seen_recipes = true;
            continue;
        }
        if is_detail_line(&lower) {
            continue;
        }

        if BULLETED.is_match(line) {
            let item = strip_bullet(line).to_string();
            match section {
                Section::Ingredients => extraction.ingredients.push(item),
                Section::Recipes => extraction.recipes.push(item),
                Section::Unknown if seen_recipes => extraction.recipes.push(item),
                Section::Unknown => extraction.ingredients.push(item),
            }
        } else if lower.contains("recipe") || lower.contains("suggestion") || lower.contains("can make")
        {
            section = Section::Recipes;
            seen_recipes = true;

            if !INTRODUCTION.is_match(&lower) {
                extraction.recipes.push(line.to_string());
            }
        }
    }

    extraction
}
