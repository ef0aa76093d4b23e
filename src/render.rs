use crate::error::SearchError;
use crate::finder::RecipeCard;

/// Shown when a search returns no recipes
pub const NO_RESULTS: &str = "No recipes found. Try different ingredients or filters.";

const SEPARATOR_WIDTH: usize = 40;

/// Render all cards as numbered text blocks, in the order given
pub fn render_cards(cards: &[RecipeCard]) -> String {
    if cards.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    let separator = format!("{}\n", "-".repeat(SEPARATOR_WIDTH));
    cards
        .iter()
        .enumerate()
        .map(|(index, card)| render_card(index + 1, card))
        .collect::<Vec<_>>()
        .join(&separator)
}

pub fn render_card(number: usize, card: &RecipeCard) -> String {
    let record = &card.record;
    let image = match &card.thumbnail {
        Some(thumbnail) => format!("[thumbnail {}x{}]", thumbnail.width(), thumbnail.height()),
        None => "[no image]".to_string(),
    };

    format!(
        "{}. {}\n   {}\n   Servings: {}\n   Ready in: {} mins\n   View full recipe: {}\n",
        number,
        record.title,
        image,
        record.servings_label(),
        record.ready_in_label(),
        record.source_url
    )
}

/// One-line notification for a failed search
pub fn render_error(error: &SearchError) -> String {
    match error {
        SearchError::Validation(message) => format!("Input Error: {}", message),
        SearchError::Server { .. } | SearchError::Connection(_) => {
            format!("Error: {}!", capitalize(&error.to_string()))
        }
        other => format!("Error: {}", other),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
