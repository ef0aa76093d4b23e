mod spoonacular;

pub use spoonacular::SpoonacularClient;

use crate::error::SearchError;
use crate::model::{SearchCriteria, SearchResult};
use async_trait::async_trait;

/// Anything that can answer a recipe search
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name (e.g., "spoonacular")
    fn source_name(&self) -> &str;

    /// Run one search. Criteria are expected to be validated already.
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult, SearchError>;
}
