//! Faceted filtering over an in-memory recipe collection.
//!
//! A [`FilterState`] (free-text query plus ingredient, appliance and ustensil
//! tags) is applied to a [`RecipeRepository`] by the [`FilterEngine`], and the
//! options still selectable in each category are derived from the result.
//!
//! ```
//! use recipe_facets::{apply_filters, derive_options, Category, FilterState, RecipeRepository};
//!
//! let repository = RecipeRepository::from_json_str(r#"[
//!     { "name": "Tarte aux pommes", "ingredients": [{ "ingredient": "Pomme" }],
//!       "appliance": "Four", "ustensils": ["Moule"] },
//!     { "name": "Poisson grillé", "ingredients": [{ "ingredient": "Poisson" }],
//!       "appliance": "Grill", "ustensils": [] }
//! ]"#)?;
//!
//! let state = FilterState::new().with_tag(Category::Appliances, "Four");
//! let recipes = apply_filters(&repository, &state);
//! assert_eq!(recipes.len(), 1);
//!
//! let options = derive_options(recipes, &state);
//! assert_eq!(options.ingredients, vec!["Pomme"]);
//! assert!(options.appliances.is_empty());
//! # Ok::<(), recipe_facets::FacetsError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod options;
pub mod repository;
pub mod session;
pub mod state;
pub mod uniffi_bindings;

pub use crate::config::{load_config, FacetsConfig};
pub use engine::{apply_filters, FilterEngine};
pub use error::FacetsError;
pub use matcher::{matches, Matcher, PreparedFilter, DEFAULT_MIN_QUERY_CHARS};
pub use model::{Category, Ingredient, Quantity, Recipe};
pub use normalize::{cmp_normalized, normalize, normalize_option};
pub use options::{derive_options, narrow_options, DedupPolicy, OptionDeriver, OptionSet};
pub use repository::RecipeRepository;
pub use session::{FilterSession, NoResults, SearchView};
pub use state::{FilterState, TagSet, Tags};

// Re-export UniFFI types when feature is enabled
#[cfg(feature = "uniffi")]
pub use uniffi_bindings::*;
