use thiserror::Error;

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum SearchError {
    /// The user input cannot be searched (e.g. no ingredients)
    #[error("Input error: {0}")]
    Validation(String),

    /// The recipe API answered with a non-200 status
    #[error("failed to fetch recipes")]
    Server { status: u16 },

    /// The recipe API could not be reached
    #[error("failed to connect to the server")]
    Connection(#[source] reqwest::Error),

    /// The response body did not have the expected shape
    #[error("failed to parse recipes: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Errors that can occur while loading a single recipe thumbnail.
///
/// These never abort a search; the affected recipe is shown without an image.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("recipe has no image URL")]
    MissingUrl,

    #[error("failed to fetch image: {0}")]
    Fetch(#[source] reqwest::Error),

    #[error("image request returned HTTP {0}")]
    Status(u16),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image task failed: {0}")]
    Task(String),
}
