mod client;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::PantryClient;
use pantry_core::{AmountUnit, IngredientDraft, IngredientPatch, RecipeDraft};

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Pantry CLI: ingredients on hand and the recipes they make", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, global = true, env = "PANTRY_SERVER", default_value = "http://localhost:8000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage owned ingredients
    Ingredients {
        #[command(subcommand)]
        command: IngredientCommands,
    },
    /// Manage recipes
    Recipes {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Show what a recipe needs next to what is on hand
    Availability {
        recipe_id: String,
        /// Show rows for ingredients that no longer exist
        #[arg(long)]
        placeholders: bool,
    },
    /// Find recipes using any of the given ingredients, e.g. "salt, pepper"
    Search { ingredients: String },
}

#[derive(Subcommand)]
enum IngredientCommands {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        unit: AmountUnit,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        unit: Option<AmountUnit>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
enum RecipeCommands {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Show { id: String },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        image: String,
        /// Preparation process
        #[arg(long)]
        process: String,
        /// Required ingredient as ID:AMOUNT:UNIT (repeatable)
        #[arg(long = "requires", required = true)]
        requires: Vec<String>,
    },
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = PantryClient::new(&cli.server);

    match cli.command {
        Commands::Ingredients { command } => ingredients(&client, command).await?,
        Commands::Recipes { command } => recipes(&client, command).await?,
        Commands::Availability {
            recipe_id,
            placeholders,
        } => {
            let availability = client.availability(&recipe_id, placeholders).await?;
            println!("{}", availability.recipe_name);
            for row in &availability.rows {
                println!("  {}", output::availability_line(row));
            }
        }
        Commands::Search { ingredients } => search(&client, &ingredients).await?,
    }

    Ok(())
}

async fn ingredients(client: &PantryClient, command: IngredientCommands) -> Result<()> {
    match command {
        IngredientCommands::List { search } => {
            for ingredient in client.list_ingredients(search.as_deref()).await? {
                println!("{}", output::ingredient_line(&ingredient));
            }
        }
        IngredientCommands::Add { name, amount, unit } => {
            let created = client
                .create_ingredient(&IngredientDraft {
                    name,
                    amount_value: amount,
                    amount_unit: unit,
                })
                .await?;
            println!("Created {}", output::ingredient_line(&created));
        }
        IngredientCommands::Update {
            id,
            name,
            amount,
            unit,
        } => {
            let updated = client
                .update_ingredient(
                    &id,
                    &IngredientPatch {
                        name,
                        amount_value: amount,
                        amount_unit: unit,
                    },
                )
                .await?;
            println!("Updated {}", output::ingredient_line(&updated));
        }
        IngredientCommands::Delete { id } => {
            client.delete_ingredient(&id).await?;
            println!("Deleted ingredient {}", id);
        }
    }
    Ok(())
}

async fn recipes(client: &PantryClient, command: RecipeCommands) -> Result<()> {
    match command {
        RecipeCommands::List { search } => {
            for recipe in client.list_recipes(search.as_deref()).await? {
                println!("{}", output::recipe_line(&recipe));
            }
        }
        RecipeCommands::Show { id } => {
            let recipe = client.get_recipe(&id).await?;
            println!("{}", recipe.name);
            if !recipe.image.is_empty() {
                println!("Image: {}", recipe.image);
            }
            println!();
            println!("{}", recipe.preparation_process);
            println!();
            for required in &recipe.required_ingredients {
                println!(
                    "  {}  {} {}",
                    required.id, required.required_amount_value, required.required_amount_unit
                );
            }
        }
        RecipeCommands::Add {
            name,
            image,
            process,
            requires,
        } => {
            let required_ingredients = requires
                .iter()
                .map(|raw| output::parse_requirement(raw))
                .collect::<Result<Vec<_>>>()?;
            let created = client
                .create_recipe(&RecipeDraft {
                    name,
                    image,
                    preparation_process: process,
                    required_ingredients,
                })
                .await?;
            println!("Created {}", output::recipe_line(&created));
        }
        RecipeCommands::Delete { id } => {
            client.delete_recipe(&id).await?;
            println!("Deleted recipe {}", id);
        }
    }
    Ok(())
}

async fn search(client: &PantryClient, ingredients: &str) -> Result<()> {
    let results = client.search(ingredients).await?;
    for line in output::search_lines(&results) {
        println!("{}", line);
    }
    Ok(())
}
