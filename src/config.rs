use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::matcher::DEFAULT_MIN_QUERY_CHARS;
use crate::options::DedupPolicy;

/// Runtime settings for the filtering engine and its front ends
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FacetsConfig {
    /// Shortest normalized query that restricts results
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    /// How option values differing only by case or accents are collapsed
    #[serde(default)]
    pub dedup: DedupPolicy,
    /// Path of the JSON recipe collection
    #[serde(default)]
    pub recipes: Option<String>,
    /// Searches proposed when nothing matches
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,
}

impl Default for FacetsConfig {
    fn default() -> Self {
        Self {
            min_query_chars: default_min_query_chars(),
            dedup: DedupPolicy::default(),
            recipes: None,
            suggestions: default_suggestions(),
        }
    }
}

fn default_min_query_chars() -> usize {
    DEFAULT_MIN_QUERY_CHARS
}

fn default_suggestions() -> Vec<String> {
    vec![
        "tarte aux pommes".to_string(),
        "poisson".to_string(),
        "poulet".to_string(),
        "chocolat".to_string(),
    ]
}

impl FacetsConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FACETS__ prefix
    /// 2. recipe-facets.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FACETS__MIN_QUERY_CHARS
    pub fn load() -> Result<Self, ConfigError> {
        load_config(None)
    }

    /// Parse a TOML document on top of the defaults, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

/// Load configuration, optionally from an explicit file
///
/// An explicit `path` must exist; the default `recipe-facets.toml` may be missing.
/// Environment variables use double underscore as separator:
/// `RECIPE_FACETS__DEDUP=normalized`.
pub fn load_config(path: Option<&Path>) -> Result<FacetsConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).format(FileFormat::Toml).required(true),
        None => File::with_name("recipe-facets").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("RECIPE_FACETS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
