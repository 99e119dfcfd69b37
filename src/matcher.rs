//! Per-recipe pass/fail decision.
//!
//! A [`FilterState`] is normalized once into a [`PreparedFilter`], then every
//! recipe of the collection is tested against it. The four predicate groups
//! are combined with AND:
//!
//! - text query (name, description or any ingredient name contains it),
//!   only active from [`DEFAULT_MIN_QUERY_CHARS`] normalized characters
//! - ingredient tags, all required
//! - appliance tags, any one suffices
//! - ustensil tags, all required

use crate::model::Recipe;
use crate::normalize::{normalize, normalize_option};
use crate::state::{FilterState, TagSet};

/// Shortest normalized query that restricts results
pub const DEFAULT_MIN_QUERY_CHARS: usize = 3;

/// Decides whether recipes pass a filter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    min_query_chars: usize,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
        }
    }
}

impl Matcher {
    pub fn new(min_query_chars: usize) -> Self {
        Self { min_query_chars }
    }

    pub fn min_query_chars(&self) -> usize {
        self.min_query_chars
    }

    /// Normalize `state` once for a whole filtering pass
    pub fn prepare(&self, state: &FilterState) -> PreparedFilter {
        let query = normalize(&state.query);
        let query = (query.chars().count() >= self.min_query_chars).then_some(query);

        PreparedFilter {
            query,
            ingredients: normalize_tags(&state.tags.ingredients),
            appliances: normalize_tags(&state.tags.appliances),
            ustensils: normalize_tags(&state.tags.ustensils),
        }
    }

    pub fn matches(&self, recipe: &Recipe, state: &FilterState) -> bool {
        self.prepare(state).matches(recipe)
    }
}

/// A filter state with every comparison value already normalized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedFilter {
    query: Option<String>,
    ingredients: Vec<String>,
    appliances: Vec<String>,
    ustensils: Vec<String>,
}

impl PreparedFilter {
    /// The normalized query, if it is long enough to apply
    pub fn active_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_text(recipe)
            && self.matches_ingredients(recipe)
            && self.matches_appliance(recipe)
            && self.matches_ustensils(recipe)
    }

    fn matches_text(&self, recipe: &Recipe) -> bool {
        let Some(query) = self.query.as_deref() else {
            return true;
        };
        // nameless records never match a search
        let Some(name) = recipe.name.as_deref() else {
            return false;
        };

        normalize(name).contains(query)
            || normalize(&recipe.description).contains(query)
            || recipe
                .ingredient_names()
                .any(|ingredient| normalize(ingredient).contains(query))
    }

    fn matches_ingredients(&self, recipe: &Recipe) -> bool {
        if self.ingredients.is_empty() {
            return true;
        }
        let present: Vec<String> = recipe.ingredient_names().map(normalize).collect();
        contains_all(&present, &self.ingredients)
    }

    fn matches_appliance(&self, recipe: &Recipe) -> bool {
        if self.appliances.is_empty() {
            return true;
        }
        let appliance = normalize_option(recipe.appliance.as_deref());
        self.appliances.iter().any(|tag| *tag == appliance)
    }

    fn matches_ustensils(&self, recipe: &Recipe) -> bool {
        if self.ustensils.is_empty() {
            return true;
        }
        let present: Vec<String> = recipe.ustensils.iter().map(|u| normalize(u)).collect();
        contains_all(&present, &self.ustensils)
    }
}

/// Test one recipe with the default query threshold
pub fn matches(recipe: &Recipe, state: &FilterState) -> bool {
    Matcher::default().matches(recipe, state)
}

fn normalize_tags(tags: &TagSet) -> Vec<String> {
    tags.iter().map(|tag| normalize(tag)).collect()
}

fn contains_all(present: &[String], required: &[String]) -> bool {
    required.iter().all(|tag| present.contains(tag))
}
