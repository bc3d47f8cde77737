use clap::{Parser, Subcommand, ValueEnum};
use fridge_scan::{
    extract_recipe_ingredients, group_by_category, new_grocery_items, parse_instructions,
    parse_reply, prepare_recipe_records, FridgeScanner, Provider,
};
use log::debug;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a photo to a vision model and print the parsed result
    Scan {
        /// Path to the photo
        image: PathBuf,

        /// Where the photo was taken ("fridge", "pantry", ...)
        #[arg(short, long)]
        location: Option<String>,

        /// Provider to use instead of the configured default or fallback chain
        #[arg(short, long, value_enum)]
        provider: Option<ProviderArg>,

        /// Model to use (provider-specific)
        #[arg(short, long)]
        model: Option<String>,

        /// Also print a saveable record for every suggested recipe
        #[arg(long)]
        records: bool,
    },
    /// Parse a model reply from a file, or stdin when the path is "-"
    Parse {
        #[arg(default_value = "-")]
        input: String,
    },
    /// List which of the given ingredients a recipe mentions
    Match {
        /// Recipe text, e.g. "Omelette: eggs whisked with milk"
        recipe: String,

        /// Comma-separated ingredient pool
        #[arg(long, value_delimiter = ',')]
        pool: Vec<String>,
    },
    /// Split a recipe write-up into ingredients, tools and steps
    Instructions {
        #[arg(default_value = "-")]
        input: String,
    },
    /// Group missing ingredients by store section
    Grocery {
        /// Ingredients to buy
        items: Vec<String>,

        /// Comma-separated items already on the list
        #[arg(long, value_delimiter = ',')]
        have: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ProviderArg {
    Openai,
    Anthropic,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => Provider::OpenAI,
            ProviderArg::Anthropic => Provider::Anthropic,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    match cli.command {
        Command::Scan {
            image,
            location,
            provider,
            model,
            records,
        } => {
            let mut builder = FridgeScanner::builder().image(image);
            if let Some(location) = location {
                builder = builder.location(location);
            }
            if let Some(provider) = provider {
                builder = builder.provider(provider.into());
            }
            if let Some(model) = model {
                builder = builder.model(model);
            }

            let result = builder.build().await?;
            if records {
                let recipe_records =
                    prepare_recipe_records(&result.parsed.recipes, &result.parsed.ingredients);
                print_json(&recipe_records)?;
            } else {
                print_json(&result)?;
            }
        }
        Command::Parse { input } => {
            let text = read_input(&input)?;
            print_json(&parse_reply(&text))?;
        }
        Command::Match { recipe, pool } => {
            print_json(&extract_recipe_ingredients(&recipe, &pool))?;
        }
        Command::Instructions { input } => {
            let text = read_input(&input)?;
            print_json(&parse_instructions(&text))?;
        }
        Command::Grocery { items, have } => {
            let missing = new_grocery_items(&have, &items);
            print_json(&group_by_category(&missing))?;
        }
    }

    Ok(())
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
