use thiserror::Error;

/// Errors that can occur while loading a recipe collection or reading user input
///
/// Filtering itself never fails; these only come from the edges.
#[derive(Error, Debug)]
pub enum FacetsError {
    /// Failed to read a recipe collection from disk
    #[error("Failed to read recipes: {0}")]
    Io(#[from] std::io::Error),

    /// The recipe collection is not valid JSON or has the wrong shape
    #[error("Failed to parse recipes: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// A category name that is not ingredients, appliances or ustensils
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// An unknown deduplication policy name
    #[error("Unknown dedup policy: {0}")]
    UnknownDedupPolicy(String),

    /// A command line or session command that could not be understood
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
