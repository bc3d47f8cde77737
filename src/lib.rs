//! Turn a photo of a fridge or pantry into an ingredient list and recipe ideas.
//!
//! A vision model is asked to describe the photo; its free-form reply is then
//! parsed into ingredients and recipe names, with a cascade of increasingly
//! lenient strategies so that loosely formatted replies still yield something.
//!
//! ```
//! use fridge_scan::parse_reply;
//!
//! let parsed = parse_reply("INGREDIENTS FOUND:\n• Eggs\n• Milk\n\nRECIPES:\n• Omelette");
//! assert_eq!(parsed.ingredients, vec!["Eggs", "Milk"]);
//! assert_eq!(parsed.recipes, vec!["Omelette"]);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod grocery;
pub mod images;
pub mod instructions;
pub mod matcher;
pub mod parser;
pub mod providers;
pub mod record;

use std::path::PathBuf;

// Re-export main types for convenience
pub use builder::{FridgeScanner, FridgeScannerBuilder, Provider, ScanResult};
pub use config::{FallbackConfig, ProviderConfig, ScanConfig};
pub use error::ScanError;
pub use grocery::{categorize_ingredient, group_by_category, new_grocery_items, GroceryCategory};
pub use images::{EncodedImage, ImageSource};
pub use instructions::{parse_instructions, ParsedInstructions};
pub use matcher::{extract_recipe_ingredients, parse_recipe_string, RecipeParts};
pub use parser::{parse_ai_response, ParsedRecipe, ParsedResponse};
pub use record::{prepare_recipe_record, prepare_recipe_records, Difficulty, RecipeRecord};

/// Scan a photo using the configured provider (or fallback chain).
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), fridge_scan::ScanError> {
/// let result = fridge_scan::scan_image("fridge.jpg").await?;
/// println!("{:?}", result.parsed.recipes);
/// # Ok(())
/// # }
/// ```
pub async fn scan_image(path: impl Into<PathBuf>) -> Result<ScanResult, ScanError> {
    FridgeScanner::builder().image(path).build().await
}

/// Parse a vision model reply that was obtained elsewhere.
pub fn parse_reply(text: &str) -> ParsedResponse {
    parse_ai_response(text)
}
