//! UniFFI bindings for recipe-facets
//!
//! This module provides FFI-compatible types and functions so that a native
//! host (iOS, Android) can keep the rendering while the filtering runs here.
//! The host hands over the recipe collection as JSON once, then drives an
//! [`FfiFilterSession`] from its UI event handlers.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    narrow_options, normalize, Category, FacetsConfig, FacetsError, FilterSession, Recipe,
    RecipeRepository,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible tag category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiCategory {
    Ingredients,
    Appliances,
    Ustensils,
}

impl From<FfiCategory> for Category {
    fn from(category: FfiCategory) -> Self {
        match category {
            FfiCategory::Ingredients => Category::Ingredients,
            FfiCategory::Appliances => Category::Appliances,
            FfiCategory::Ustensils => Category::Ustensils,
        }
    }
}

/// FFI-compatible ingredient line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub name: String,
    /// Formatted amount such as "400 g" (empty string if none)
    pub quantity: String,
}

/// FFI-compatible recipe card
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    /// Recipe name (empty string if none)
    pub name: String,
    pub description: String,
    /// Preparation time in minutes
    pub time: u32,
    pub image: String,
    /// Appliance (empty string if none)
    pub appliance: String,
    pub ingredients: Vec<FfiIngredient>,
    pub ustensils: Vec<String>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(recipe: &Recipe) -> Self {
        FfiRecipe {
            name: recipe.name().to_string(),
            description: recipe.description.clone(),
            time: recipe.time,
            image: recipe.image.clone(),
            appliance: recipe.appliance().unwrap_or_default().to_string(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|ingredient| FfiIngredient {
                    name: ingredient.ingredient.clone(),
                    quantity: ingredient.quantity_label().unwrap_or_default(),
                })
                .collect(),
            ustensils: recipe.ustensils.clone(),
        }
    }
}

/// FFI-compatible result of one filtering pass
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiSearchView {
    pub recipes: Vec<FfiRecipe>,
    pub ingredients: Vec<String>,
    pub appliances: Vec<String>,
    pub ustensils: Vec<String>,
    /// Message to show instead of cards when nothing matches (empty otherwise)
    pub no_results_message: String,
}

/// Optional settings for a session (defaults apply when unset)
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiSessionConfig {
    pub min_query_chars: Option<u32>,
    /// Merge option values differing only by case or accents
    pub normalized_dedup: bool,
    pub suggestions: Option<Vec<String>>,
}

impl From<FfiSessionConfig> for FacetsConfig {
    fn from(ffi: FfiSessionConfig) -> Self {
        let defaults = FacetsConfig::default();
        FacetsConfig {
            min_query_chars: ffi
                .min_query_chars
                .map(|n| n as usize)
                .unwrap_or(defaults.min_query_chars),
            dedup: if ffi.normalized_dedup {
                crate::DedupPolicy::Normalized
            } else {
                crate::DedupPolicy::Exact
            },
            recipes: None,
            suggestions: ffi.suggestions.unwrap_or(defaults.suggestions),
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiFacetsError {
    /// The recipe collection could not be parsed
    ParseError { message: String },
    /// Session state could not be accessed
    StateError { message: String },
}

impl fmt::Display for FfiFacetsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiFacetsError::ParseError { message } => write!(f, "Parse error: {}", message),
            FfiFacetsError::StateError { message } => write!(f, "State error: {}", message),
        }
    }
}

impl std::error::Error for FfiFacetsError {}

impl From<FacetsError> for FfiFacetsError {
    fn from(err: FacetsError) -> Self {
        match err {
            FacetsError::Json(e) => FfiFacetsError::ParseError {
                message: e.to_string(),
            },
            other => FfiFacetsError::StateError {
                message: other.to_string(),
            },
        }
    }
}

/// A filter session owned by the host UI
#[cfg_attr(feature = "uniffi", derive(uniffi::Object))]
pub struct FfiFilterSession {
    inner: Mutex<FilterSession>,
}

impl FfiFilterSession {
    fn lock(&self) -> Result<MutexGuard<'_, FilterSession>, FfiFacetsError> {
        self.inner.lock().map_err(|e| FfiFacetsError::StateError {
            message: format!("Session lock poisoned: {}", e),
        })
    }
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
impl FfiFilterSession {
    /// Create a session from a JSON array of recipes
    #[cfg_attr(feature = "uniffi", uniffi::constructor)]
    pub fn new(
        recipes_json: String,
        config: Option<FfiSessionConfig>,
    ) -> Result<Arc<Self>, FfiFacetsError> {
        let repository = RecipeRepository::from_json_str(&recipes_json)?;
        let config: FacetsConfig = config.unwrap_or_default().into();
        Ok(Arc::new(Self {
            inner: Mutex::new(FilterSession::with_config(repository, &config)),
        }))
    }

    pub fn set_query(&self, text: String) -> Result<(), FfiFacetsError> {
        self.lock()?.set_query(&text);
        Ok(())
    }

    /// Returns false when the tag was already selected
    pub fn add_tag(&self, category: FfiCategory, value: String) -> Result<bool, FfiFacetsError> {
        Ok(self.lock()?.add_tag(category.into(), value))
    }

    /// Returns false when the tag was not selected
    pub fn remove_tag(&self, category: FfiCategory, value: String) -> Result<bool, FfiFacetsError> {
        Ok(self.lock()?.remove_tag(category.into(), &value))
    }

    pub fn clear(&self) -> Result<(), FfiFacetsError> {
        self.lock()?.clear();
        Ok(())
    }

    /// Selected tags of one category, in selection order
    pub fn tags(&self, category: FfiCategory) -> Result<Vec<String>, FfiFacetsError> {
        let session = self.lock()?;
        Ok(session.state().tags(category.into()).iter().cloned().collect())
    }

    /// Recompute results and options for the current state
    pub fn view(&self) -> Result<FfiSearchView, FfiFacetsError> {
        let session = self.lock()?;
        let view = session.view();
        let no_results_message = session
            .no_results_for(&view)
            .map(|hint| hint.message())
            .unwrap_or_default();

        Ok(FfiSearchView {
            recipes: view.recipes.iter().map(|r| FfiRecipe::from(*r)).collect(),
            ingredients: view.options.ingredients,
            appliances: view.options.appliances,
            ustensils: view.options.ustensils,
            no_results_message,
        })
    }
}

/// Lowercase and strip accents, the comparison form used for every match
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn normalize_text(text: String) -> String {
    normalize(&text)
}

/// Narrow an option list with the search box of its panel
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn narrow_option_values(values: Vec<String>, input: String) -> Vec<String> {
    narrow_options(&values, &input)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
