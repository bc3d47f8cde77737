//! Scanning a photo with a vision provider
//!
//! Requires OPENAI_API_KEY (or ANTHROPIC_API_KEY with `--anthropic`).
//!
//! cargo run --example scan_photo -- path/to/fridge.jpg [--anthropic]

use fridge_scan::{group_by_category, FridgeScanner, Provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("Please provide a photo path as an argument")?;
    let provider = match args.next().as_deref() {
        Some("--anthropic") => Provider::Anthropic,
        _ => Provider::OpenAI,
    };

    let result = FridgeScanner::builder()
        .image(path)
        .location("fridge")
        .provider(provider)
        .build()
        .await?;

    println!("Found {} ingredients:", result.parsed.ingredients.len());
    for (category, items) in group_by_category(&result.parsed.ingredients) {
        println!("  {}: {}", category, items.join(", "));
    }

    println!("\nRecipe ideas:");
    for recipe in &result.parsed.recipes {
        println!("  - {}", recipe);
    }

    Ok(())
}
