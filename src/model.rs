use crate::error::SearchError;
use serde::Serialize;

/// Marker shown in place of missing servings or cooking time
pub const NOT_AVAILABLE: &str = "N/A";

/// Diet selections offered to users. "Any" means no filter.
pub const DIETS: &[&str] = &["Any", "Vegan", "Vegetarian", "Gluten Free", "Keto", "Paleo"];

/// Cuisine selections offered to users. "Any" means no filter.
pub const CUISINES: &[&str] = &["Any", "Italian", "Chinese", "Indian", "Mexican", "American"];

/// The filters for one search.
///
/// `ingredients` is never blank once constructed; absent filters are `None`
/// and are left out of the request entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    ingredients: String,
    diet: Option<String>,
    cuisine: Option<String>,
}

impl SearchCriteria {
    /// Validate user input and normalize filter selections
    ///
    /// # Example
    /// ```
    /// use recipe_finder::SearchCriteria;
    ///
    /// let criteria = SearchCriteria::new("chicken, rice", Some("Vegan"), Some("Any")).unwrap();
    /// assert_eq!(criteria.diet(), Some("Vegan"));
    /// assert_eq!(criteria.cuisine(), None);
    /// ```
    pub fn new(
        ingredients: &str,
        diet: Option<&str>,
        cuisine: Option<&str>,
    ) -> Result<Self, SearchError> {
        let ingredients = ingredients.trim();
        if ingredients.is_empty() {
            return Err(SearchError::Validation(
                "Please enter at least one ingredient.".to_string(),
            ));
        }

        Ok(Self {
            ingredients: ingredients.to_string(),
            diet: normalize_filter(diet),
            cuisine: normalize_filter(cuisine),
        })
    }

    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    pub fn diet(&self) -> Option<&str> {
        self.diet.as_deref()
    }

    pub fn cuisine(&self) -> Option<&str> {
        self.cuisine.as_deref()
    }
}

/// Map a filter selection to `None` when it means "no filter"
fn normalize_filter(selection: Option<&str>) -> Option<String> {
    selection
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("any"))
        .map(str::to_string)
}

/// One recipe returned by a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeRecord {
    pub title: String,
    pub image_url: Option<String>,
    pub servings: Option<u32>,
    pub ready_in_minutes: Option<u32>,
    pub source_url: String,
}

impl RecipeRecord {
    pub fn servings_label(&self) -> String {
        label(self.servings)
    }

    pub fn ready_in_label(&self) -> String {
        label(self.ready_in_minutes)
    }
}

fn label(value: Option<u32>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Recipes in the order the server returned them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub recipes: Vec<RecipeRecord>,
}

impl SearchResult {
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeRecord> {
        self.recipes.iter()
    }
}

impl From<Vec<RecipeRecord>> for SearchResult {
    fn from(recipes: Vec<RecipeRecord>) -> Self {
        Self { recipes }
    }
}

impl IntoIterator for SearchResult {
    type Item = RecipeRecord;
    type IntoIter = std::vec::IntoIter<RecipeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(servings: Option<u32>, ready: Option<u32>) -> RecipeRecord {
        RecipeRecord {
            title: "Soup".to_string(),
            image_url: None,
            servings,
            ready_in_minutes: ready,
            source_url: "https://example.com/soup".to_string(),
        }
    }

    #[test]
    fn test_blank_ingredients_rejected() {
        for input in ["", "   ", "\t\n"] {
            let result = SearchCriteria::new(input, None, None);
            assert!(matches!(result, Err(SearchError::Validation(_))));
        }
    }

    #[test]
    fn test_ingredients_are_trimmed() {
        let criteria = SearchCriteria::new("  chicken, rice  ", None, None).unwrap();
        assert_eq!(criteria.ingredients(), "chicken, rice");
    }

    #[test]
    fn test_any_selection_means_no_filter() {
        let criteria = SearchCriteria::new("egg", Some("Any"), Some("any")).unwrap();
        assert_eq!(criteria.diet(), None);
        assert_eq!(criteria.cuisine(), None);

        let criteria = SearchCriteria::new("egg", Some(""), None).unwrap();
        assert_eq!(criteria.diet(), None);
    }

    #[test]
    fn test_selection_passes_through_unchanged() {
        let criteria = SearchCriteria::new("egg", Some("Gluten Free"), Some("Italian")).unwrap();
        assert_eq!(criteria.diet(), Some("Gluten Free"));
        assert_eq!(criteria.cuisine(), Some("Italian"));
    }

    #[test]
    fn test_labels_use_sentinel_for_missing_values() {
        let r = record(Some(4), None);
        assert_eq!(r.servings_label(), "4");
        assert_eq!(r.ready_in_label(), NOT_AVAILABLE);
    }

    #[test]
    fn test_option_lists_start_with_any() {
        assert_eq!(DIETS[0], "Any");
        assert_eq!(CUISINES[0], "Any");
    }
}
