use clap::Parser;
use log::{error, info, warn};
use recipe_finder::model::{CUISINES, DIETS};
use recipe_finder::render::{render_cards, render_error};
use recipe_finder::{browser, FinderConfig, RecipeCard, RecipeFinder, SearchCriteria, SearchError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Find recipes by ingredients, diet and cuisine
#[derive(Parser)]
#[command(name = "recipe-finder", version, about, long_about = None)]
struct Cli {
    /// Ingredients to include, comma separated (e.g. "chicken, rice")
    ingredients: String,

    #[arg(long, default_value = "Any", help = diet_help())]
    diet: String,

    #[arg(long, default_value = "Any", help = cuisine_help())]
    cuisine: String,

    /// Configuration file (defaults to ./recipe-finder.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not download thumbnails
    #[arg(long)]
    no_images: bool,

    /// Write loaded thumbnails as PNG files into this directory
    #[arg(long)]
    thumbnail_dir: Option<PathBuf>,

    /// Open the link of the N-th recipe (1-based) in the browser
    #[arg(long, value_name = "N")]
    open: Option<usize>,
}

fn diet_help() -> String {
    format!("Diet filter ({})", DIETS.join(", "))
}

fn cuisine_help() -> String {
    format!("Cuisine filter ({})", CUISINES.join(", "))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(cards) => {
            print!("{}", render_cards(&cards));
            if let Some(dir) = &cli.thumbnail_dir {
                save_thumbnails(dir, &cards).await;
            }
            if let Some(number) = cli.open {
                open_recipe(number, &cards);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:?}", e);
            eprintln!("{}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<Vec<RecipeCard>, SearchError> {
    // Input is validated before configuration is touched
    SearchCriteria::new(&cli.ingredients, None, None)?;

    let config = match &cli.config {
        Some(path) => FinderConfig::load_from(path)?,
        None => FinderConfig::load()?,
    };

    let mut builder = RecipeFinder::builder()
        .ingredients(cli.ingredients.as_str())
        .diet(cli.diet.as_str())
        .cuisine(cli.cuisine.as_str())
        .config(config);
    if cli.no_images {
        builder = builder.skip_images();
    }
    builder.build().await
}

async fn save_thumbnails(dir: &Path, cards: &[RecipeCard]) {
    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        warn!("Cannot create {}: {}", dir.display(), e);
        return;
    }

    for (index, card) in cards.iter().enumerate() {
        if let Some(thumbnail) = &card.thumbnail {
            let path = dir.join(format!("recipe-{}.png", index + 1));
            match thumbnail.save_png(&path) {
                Ok(()) => info!("Saved thumbnail {}", path.display()),
                Err(e) => warn!("Failed to save {}: {}", path.display(), e),
            }
        }
    }
}

fn open_recipe(number: usize, cards: &[RecipeCard]) {
    let Some(card) = number.checked_sub(1).and_then(|index| cards.get(index)) else {
        eprintln!("No recipe number {} to open ({} found)", number, cards.len());
        return;
    };

    if let Err(e) = browser::open_link(&card.record.source_url) {
        eprintln!("Failed to open {}: {}", card.record.source_url, e);
    }
}
