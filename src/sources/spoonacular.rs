use crate::config::FinderConfig;
use crate::error::SearchError;
use crate::model::{RecipeRecord, SearchCriteria, SearchResult};
use crate::sources::RecipeSource;
use async_trait::async_trait;
use config::ConfigError;
use log::{debug, warn};
use reqwest::{Client, Request, StatusCode, Url};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Number of recipes requested per search
const RESULT_COUNT: u32 = 5;

/// Client for the Spoonacular `complexSearch` endpoint
pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

/// One element of the `results` array.
///
/// Only `title` and `sourceUrl` are required; a wrongly typed optional
/// field reads as absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    image: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    servings: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    ready_in_minutes: Option<u32>,
    source_url: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

/// Whole non-negative numbers, including `4.0`
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| *n >= 0.0 && n.fract() == 0.0)
            .map(|n| n as u64)
    });
    Ok(count.and_then(|n| u32::try_from(n).ok()))
}

impl From<SearchHit> for RecipeRecord {
    fn from(hit: SearchHit) -> Self {
        RecipeRecord {
            title: hit.title,
            image_url: hit.image.filter(|url| !url.trim().is_empty()),
            servings: hit.servings,
            ready_in_minutes: hit.ready_in_minutes,
            source_url: hit.source_url,
        }
    }
}

impl SpoonacularClient {
    /// Create a new client from configuration
    pub fn new(config: &FinderConfig) -> Result<Self, SearchError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ConfigError::Message(format!("invalid base_url '{}': {}", config.base_url, e))
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Message(format!("failed to create HTTP client: {}", e)))?;

        Ok(SpoonacularClient {
            client,
            api_key: config.api_key.clone(),
            base_url,
        })
    }

    /// Query parameters for one search; unset filters are left out
    pub fn query_params(&self, criteria: &SearchCriteria) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apiKey", self.api_key.clone()),
            ("includeIngredients", criteria.ingredients().to_string()),
        ];
        if let Some(diet) = criteria.diet() {
            params.push(("diet", diet.to_string()));
        }
        if let Some(cuisine) = criteria.cuisine() {
            params.push(("cuisine", cuisine.to_string()));
        }
        params.push(("number", RESULT_COUNT.to_string()));
        params.push(("addRecipeInformation", "true".to_string()));
        params
    }

    /// Build the outbound GET request without sending it
    pub fn build_request(&self, criteria: &SearchCriteria) -> Result<Request, SearchError> {
        self.client
            .get(self.base_url.clone())
            .query(&self.query_params(criteria))
            .build()
            .map_err(connection_error)
    }
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    fn source_name(&self) -> &str {
        "spoonacular"
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult, SearchError> {
        let request = self.build_request(criteria)?;
        debug!(
            "GET {} ingredients={:?} diet={:?} cuisine={:?}",
            self.base_url,
            criteria.ingredients(),
            criteria.diet(),
            criteria.cuisine()
        );

        let response = self
            .client
            .execute(request)
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("Recipe search returned HTTP {}", status);
            return Err(SearchError::Server {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(connection_error)?;
        let result = parse_search_response(&body)?;
        debug!("Parsed {} recipes", result.len());
        Ok(result)
    }
}

/// Transport errors carry the request URL, and with it the API key
fn connection_error(error: reqwest::Error) -> SearchError {
    SearchError::Connection(error.without_url())
}

/// Parse a search response body.
///
/// A missing or null `results` field is an empty result. Entries without a
/// string `title` and `sourceUrl` are skipped.
fn parse_search_response(body: &[u8]) -> Result<SearchResult, SearchError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| SearchError::Parse("expected a JSON object".to_string()))?;

    let items = match object.get("results") {
        None | Some(Value::Null) => return Ok(SearchResult::default()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SearchError::Parse(
                "expected `results` to be an array".to_string(),
            ))
        }
    };

    let recipes = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            match serde_json::from_value::<SearchHit>(item.clone()) {
                Ok(hit) => Some(RecipeRecord::from(hit)),
                Err(e) => {
                    warn!("Skipping malformed recipe at index {}: {}", index, e);
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    Ok(SearchResult::from(recipes))
}
