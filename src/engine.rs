use log::debug;

use crate::config::FacetsConfig;
use crate::matcher::Matcher;
use crate::model::Recipe;
use crate::options::{DedupPolicy, OptionDeriver, OptionSet};
use crate::state::FilterState;

/// Runs the matcher over a collection and derives the remaining options.
///
/// The engine holds no state of its own between calls: the same collection
/// and an equal [`FilterState`] always produce the same output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterEngine {
    matcher: Matcher,
    deriver: OptionDeriver,
}

impl FilterEngine {
    pub fn new(min_query_chars: usize, dedup: DedupPolicy) -> Self {
        Self {
            matcher: Matcher::new(min_query_chars),
            deriver: OptionDeriver::new(dedup),
        }
    }

    pub fn from_config(config: &FacetsConfig) -> Self {
        Self::new(config.min_query_chars, config.dedup)
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn deriver(&self) -> &OptionDeriver {
        &self.deriver
    }

    /// Recipes passing every active criterion, in collection order
    pub fn apply_filters<'a, I>(&self, collection: I, state: &FilterState) -> Vec<&'a Recipe>
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let prepared = self.matcher.prepare(state);
        let filtered: Vec<&'a Recipe> = collection
            .into_iter()
            .filter(|recipe| prepared.matches(recipe))
            .collect();
        debug!(
            "Filter pass: query={:?} active={} -> {} recipes",
            state.query,
            prepared.active_query().is_some(),
            filtered.len()
        );
        filtered
    }

    pub fn derive_options<'a, I>(&self, filtered: I, state: &FilterState) -> OptionSet
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let options = self.deriver.derive(filtered, state);
        debug!(
            "Options: {} ingredients, {} appliances, {} ustensils",
            options.ingredients.len(),
            options.appliances.len(),
            options.ustensils.len()
        );
        options
    }
}

/// Filter `collection` with the default engine
pub fn apply_filters<'a, I>(collection: I, state: &FilterState) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    FilterEngine::default().apply_filters(collection, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Ingredient};

    fn named(name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            name: Some(name.to_string()),
            ingredients: ingredients.iter().map(|i| Ingredient::new(*i)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_preserves_collection_order() {
        let recipes = vec![
            named("Gâteau au chocolat", &["Chocolat"]),
            named("Salade", &["Tomate"]),
            named("Mousse au chocolat", &["Chocolat", "Oeuf"]),
        ];
        let state = FilterState::new().with_query("chocolat");

        let names: Vec<&str> = apply_filters(&recipes, &state)
            .into_iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(names, vec!["Gâteau au chocolat", "Mousse au chocolat"]);
    }

    #[test]
    fn test_filtering_filtered_output_is_fixed_point() {
        let recipes = vec![
            named("Tarte", &["Pomme"]),
            named("Compote", &["Pomme", "Sucre"]),
            named("Soupe", &["Poireau"]),
        ];
        let state = FilterState::new().with_tag(Category::Ingredients, "Pomme");

        let once = apply_filters(&recipes, &state);
        let twice = apply_filters(once.iter().copied(), &state);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_equal_states_give_equal_results() {
        let recipes = vec![named("Tarte", &["Pomme"]), named("Soupe", &["Poireau"])];
        let a = FilterState::new().with_query("pom");
        let b = FilterState::new().with_query("  pom ");
        assert_eq!(apply_filters(&recipes, &a), apply_filters(&recipes, &b));
    }

    #[test]
    fn test_configured_engine() {
        let recipes = vec![named("Tarte", &["Pomme"]), named("Soupe", &["Poireau"])];
        let engine = FilterEngine::new(1, DedupPolicy::Normalized);
        let state = FilterState::new().with_query("t");

        let filtered = engine.apply_filters(&recipes, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(engine.matcher().min_query_chars(), 1);
        assert_eq!(engine.deriver().dedup(), DedupPolicy::Normalized);

        let options = engine.derive_options(filtered, &state);
        assert_eq!(options.ingredients, vec!["Pomme"]);
    }
}
