use serde::Serialize;

use crate::config::FacetsConfig;
use crate::engine::FilterEngine;
use crate::model::{Category, Recipe};
use crate::options::OptionSet;
use crate::repository::RecipeRepository;
use crate::state::FilterState;

/// One interactive search over a shared recipe collection.
///
/// The session holds the only mutable [`FilterState`]. Mutators never filter
/// by themselves; call [`FilterSession::view`] afterwards to recompute the
/// results and options from scratch.
#[derive(Debug, Clone)]
pub struct FilterSession {
    repository: RecipeRepository,
    state: FilterState,
    engine: FilterEngine,
    suggestions: Vec<String>,
}

/// Filtered recipes together with the options still selectable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView<'a> {
    pub recipes: Vec<&'a Recipe>,
    pub options: OptionSet,
}

impl SearchView<'_> {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// What to tell the user when a search comes back empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoResults {
    pub query: String,
    pub suggestions: Vec<String>,
}

impl NoResults {
    pub fn message(&self) -> String {
        let mut message = if self.query.is_empty() {
            "No recipe matches the selected filters.".to_string()
        } else {
            format!("No recipe contains \u{ab} {} \u{bb}.", self.query)
        };
        if !self.suggestions.is_empty() {
            message.push_str(&format!(
                " You can search for {}, etc.",
                self.suggestions.join(", ")
            ));
        }
        message
    }
}

impl FilterSession {
    pub fn new(repository: RecipeRepository) -> Self {
        Self::with_config(repository, &FacetsConfig::default())
    }

    pub fn with_config(repository: RecipeRepository, config: &FacetsConfig) -> Self {
        Self {
            repository,
            state: FilterState::new(),
            engine: FilterEngine::from_config(config),
            suggestions: config.suggestions.clone(),
        }
    }

    pub fn repository(&self) -> &RecipeRepository {
        &self.repository
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    pub fn set_query(&mut self, text: &str) {
        self.state.set_query(text);
    }

    pub fn add_tag(&mut self, category: Category, value: impl Into<String>) -> bool {
        self.state.add_tag(category, value)
    }

    pub fn remove_tag(&mut self, category: Category, value: &str) -> bool {
        self.state.remove_tag(category, value)
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Run the filter and option derivation for the current state
    pub fn view(&self) -> SearchView<'_> {
        let recipes = self.engine.apply_filters(&self.repository, &self.state);
        let options = self
            .engine
            .derive_options(recipes.iter().copied(), &self.state);
        SearchView { recipes, options }
    }

    /// Hint for an empty result, `None` when the current state has matches
    pub fn no_results(&self) -> Option<NoResults> {
        self.no_results_for(&self.view())
    }

    /// Hint for a view already computed with [`FilterSession::view`]
    pub fn no_results_for(&self, view: &SearchView<'_>) -> Option<NoResults> {
        if !view.is_empty() {
            return None;
        }
        Some(NoResults {
            query: self.state.query.clone(),
            suggestions: self.suggestions.clone(),
        })
    }
}
