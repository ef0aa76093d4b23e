use crate::config::{FinderConfig, ImageConfig};
use crate::error::{ImageLoadError, SearchError};
use crate::images::{Thumbnail, ThumbnailLoader};
use crate::model::{RecipeRecord, SearchCriteria, SearchResult};
use crate::sources::{RecipeSource, SpoonacularClient};
use config::ConfigError;
use log::{debug, info, warn};

/// A recipe ready for display: its details plus the thumbnail, if one loaded
#[derive(Debug, Clone)]
pub struct RecipeCard {
    pub record: RecipeRecord,
    pub thumbnail: Option<Thumbnail>,
}

/// Builder for configuring and running a recipe search
#[derive(Default)]
pub struct RecipeFinderBuilder {
    ingredients: Option<String>,
    diet: Option<String>,
    cuisine: Option<String>,
    config: Option<FinderConfig>,
    source: Option<Box<dyn RecipeSource>>,
    skip_images: bool,
}

impl RecipeFinderBuilder {
    /// Set the comma-separated ingredients to search for
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder()
    ///     .ingredients("chicken, rice");
    /// ```
    pub fn ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(ingredients.into());
        self
    }

    /// Restrict results to a diet. "Any" means no restriction.
    pub fn diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = Some(diet.into());
        self
    }

    /// Restrict results to a cuisine. "Any" means no restriction.
    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Use an explicit configuration instead of loading one
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{FinderConfig, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder()
    ///     .ingredients("tofu")
    ///     .config(FinderConfig::new("your-api-key"));
    /// ```
    pub fn config(mut self, config: FinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Search a custom source instead of Spoonacular
    pub fn source(mut self, source: Box<dyn RecipeSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Do not fetch thumbnails
    pub fn skip_images(mut self) -> Self {
        self.skip_images = true;
        self
    }

    /// Validate the input, run the search and load thumbnails
    ///
    /// # Errors
    /// Returns `SearchError` if:
    /// - No ingredients were given (checked before anything else)
    /// - No configuration could be loaded
    /// - The search request fails or its response cannot be parsed
    ///
    /// Thumbnail failures never cause an error; the card has no thumbnail.
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_finder::RecipeFinder;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let cards = RecipeFinder::builder()
    ///     .ingredients("chicken, rice")
    ///     .diet("Vegan")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Vec<RecipeCard>, SearchError> {
        let criteria = SearchCriteria::new(
            self.ingredients.as_deref().unwrap_or_default(),
            self.diet.as_deref(),
            self.cuisine.as_deref(),
        )?;

        // A custom source runs without an API key; images then use defaults
        let config = match self.config {
            Some(config) => Some(config),
            None if self.source.is_none() => Some(FinderConfig::load()?),
            None => None,
        };

        let source: Box<dyn RecipeSource> = match (self.source, config.as_ref()) {
            (Some(source), _) => source,
            (None, Some(config)) => Box::new(SpoonacularClient::new(config)?),
            (None, None) => return Err(ConfigError::NotFound("api_key".to_string()).into()),
        };

        info!(
            "Searching {} for recipes with '{}'",
            source.source_name(),
            criteria.ingredients()
        );
        let result = source.search(&criteria).await?;
        info!("Found {} recipes", result.len());

        let thumbnails = if self.skip_images || result.is_empty() {
            Vec::new()
        } else {
            let loader = match config.as_ref() {
                Some(config) => ThumbnailLoader::new(&config.images, config.timeout())?,
                None => ThumbnailLoader::new(&ImageConfig::default(), None)?,
            };
            loader.load_all(&result.recipes).await
        };

        Ok(assemble_cards(result, thumbnails))
    }
}

/// Pair each record with its thumbnail, keeping server order
fn assemble_cards(
    result: SearchResult,
    thumbnails: Vec<Result<Thumbnail, ImageLoadError>>,
) -> Vec<RecipeCard> {
    let mut thumbnails = thumbnails.into_iter();
    result
        .into_iter()
        .map(|record| {
            let thumbnail = match thumbnails.next() {
                Some(Ok(thumbnail)) => Some(thumbnail),
                Some(Err(e)) => {
                    warn!("Image load failed for '{}': {}", record.title, e);
                    None
                }
                None => {
                    debug!("No thumbnail requested for '{}'", record.title);
                    None
                }
            };
            RecipeCard { record, thumbnail }
        })
        .collect()
}

/// Main entry point for the builder API
pub struct RecipeFinder;

impl RecipeFinder {
    /// Creates a new builder for a recipe search
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder();
    /// ```
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }
}
