pub mod browser;
pub mod config;
pub mod error;
pub mod finder;
pub mod images;
pub mod model;
pub mod render;
pub mod sources;

pub use config::{FinderConfig, ImageConfig};
pub use error::{ImageLoadError, SearchError};
pub use finder::{RecipeCard, RecipeFinder, RecipeFinderBuilder};
pub use images::{Thumbnail, ThumbnailLoader};
pub use model::{RecipeRecord, SearchCriteria, SearchResult};
pub use sources::{RecipeSource, SpoonacularClient};

/// Search for recipes using configuration from the environment
///
/// `diet` and `cuisine` of `None` or `"Any"` leave the filter off.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cards = recipe_finder::search_recipes("chicken, rice", Some("Vegan"), None).await?;
/// for card in &cards {
///     println!("{}", card.record.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(
    ingredients: &str,
    diet: Option<&str>,
    cuisine: Option<&str>,
) -> Result<Vec<RecipeCard>, SearchError> {
    let mut builder = RecipeFinder::builder().ingredients(ingredients);
    if let Some(diet) = diet {
        builder = builder.diet(diet);
    }
    if let Some(cuisine) = cuisine {
        builder = builder.cuisine(cuisine);
    }
    builder.build().await
}
