//! Parsing model replies without calling a provider
//!
//! Shows the structured layout, a loosely formatted reply that falls back to
//! section tracking, and turning the suggestions into saveable records.

use fridge_scan::{parse_reply, prepare_recipe_records, FridgeScanner};

const STRUCTURED: &str = r#"
INGREDIENTS FOUND:
• Eggs
• Spinach
• Feta Cheese
• Milk

RECIPES:
• Spinach Omelette: Whisk eggs with milk, fold in spinach and feta
  Available ingredients: [Eggs, Spinach, Feta Cheese, Milk]
  Additional needed: [Salt, Pepper, Butter]
• Creamed Spinach: Spinach simmered in milk
  Available ingredients: [Spinach, Milk]
  Additional needed: [Butter, Nutmeg]
"#;

const LOOSE: &str = r#"
I can see a few things in your fridge:
- Carrots
- Chicken breast

Here are some recipes you could make:
1. Chicken Stir Fry
2. Carrot Soup
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Structured reply ===");
    let result = FridgeScanner::builder().reply(STRUCTURED).build().await?;
    println!("Ingredients: {:?}", result.parsed.ingredients);
    if let Some(detailed) = &result.parsed.detailed_recipes {
        for recipe in detailed {
            println!(
                "{} uses {:?}, also needs {:?}",
                recipe.name, recipe.available_ingredients, recipe.additional_needed
            );
        }
    }

    println!("\n=== Loosely formatted reply ===");
    let parsed = parse_reply(LOOSE);
    println!("{}", serde_json::to_string_pretty(&parsed)?);

    println!("\n=== Saveable records ===");
    let records = prepare_recipe_records(&result.parsed.recipes, &result.parsed.ingredients);
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
