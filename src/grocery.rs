use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Store section an ingredient is shelved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroceryCategory {
    Produce,
    Dairy,
    #[serde(rename = "Meat & Seafood")]
    MeatAndSeafood,
    Pantry,
    Other,
}

impl fmt::Display for GroceryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroceryCategory::Produce => "Produce",
            GroceryCategory::Dairy => "Dairy",
            GroceryCategory::MeatAndSeafood => "Meat & Seafood",
            GroceryCategory::Pantry => "Pantry",
            GroceryCategory::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Checked in order; the first category with a keyword contained in the name wins.
const CATEGORY_KEYWORDS: [(GroceryCategory, &[&str]); 4] = [
    (
        GroceryCategory::Produce,
        &["apple", "banana", "orange", "tomato", "onion", "carrot", "potato", "lettuce"],
    ),
    (GroceryCategory::Dairy, &["milk", "cheese", "yogurt", "butter"]),
    (
        GroceryCategory::MeatAndSeafood,
        &["chicken", "beef", "fish", "salmon", "pork", "turkey"],
    ),
    (
        GroceryCategory::Pantry,
        &["rice", "pasta", "flour", "oil", "salt", "pepper"],
    ),
];

pub fn categorize_ingredient(name: &str) -> GroceryCategory {
    let lower = name.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map_or(GroceryCategory::Other, |(category, _)| *category)
}

/// Candidates that are not on the list yet, compared case-insensitively.
/// Repeats within `candidates` are dropped too; the first spelling is kept.
pub fn new_grocery_items<E, C>(existing: &[E], candidates: &[C]) -> Vec<String>
where
    E: AsRef<str>,
    C: AsRef<str>,
{
    let mut known: HashSet<String> = existing
        .iter()
        .map(|item| item.as_ref().trim().to_lowercase())
        .collect();

    candidates
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty() && known.insert(item.to_lowercase()))
        .map(String::from)
        .collect()
}

/// Group names by [`categorize_ingredient`], keeping input order inside each group.
pub fn group_by_category<S: AsRef<str>>(items: &[S]) -> BTreeMap<GroceryCategory, Vec<String>> {
    let mut groups: BTreeMap<GroceryCategory, Vec<String>> = BTreeMap::new();
    for item in items {
        let item = item.as_ref();
        groups
            .entry(categorize_ingredient(item))
            .or_default()
            .push(item.to_string());
    }
    groups
}
