use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FacetsError;
use crate::model::{Category, Recipe};
use crate::normalize::{normalize, sort_normalized};
use crate::state::{FilterState, TagSet};

/// How option values that differ only by spelling are collapsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupPolicy {
    /// Only byte-identical values are merged: "Sucre" and "sucre" both stay
    #[default]
    Exact,
    /// Values with the same normalized form are merged, keeping the first spelling seen
    Normalized,
}

impl fmt::Display for DedupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DedupPolicy::Exact => f.write_str("exact"),
            DedupPolicy::Normalized => f.write_str("normalized"),
        }
    }
}

impl FromStr for DedupPolicy {
    type Err = FacetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(DedupPolicy::Exact),
            "normalized" => Ok(DedupPolicy::Normalized),
            _ => Err(FacetsError::UnknownDedupPolicy(s.to_string())),
        }
    }
}

/// Values still selectable in each category, sorted by normalized form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    pub ingredients: Vec<String>,
    pub appliances: Vec<String>,
    pub ustensils: Vec<String>,
}

impl OptionSet {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Ingredients => &self.ingredients,
            Category::Appliances => &self.appliances,
            Category::Ustensils => &self.ustensils,
        }
    }

    /// Options of one category whose text contains `input`
    pub fn narrow(&self, category: Category, input: &str) -> Vec<&str> {
        narrow_options(self.get(category), input)
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.appliances.is_empty() && self.ustensils.is_empty()
    }
}

/// Builds the option lists from a filtered collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionDeriver {
    dedup: DedupPolicy,
}

impl OptionDeriver {
    pub fn new(dedup: DedupPolicy) -> Self {
        Self { dedup }
    }

    pub fn dedup(&self) -> DedupPolicy {
        self.dedup
    }

    /// Recompute all three lists from scratch.
    ///
    /// Values come only from `filtered`, so each selection narrows the
    /// choices offered in the other categories. Values already selected in
    /// `state` are left out.
    pub fn derive<'a, I>(&self, filtered: I, state: &FilterState) -> OptionSet
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let mut ingredients = Vec::new();
        let mut appliances = Vec::new();
        let mut ustensils = Vec::new();

        for recipe in filtered {
            ingredients.extend(recipe.ingredient_names().filter(|name| !name.is_empty()));
            appliances.extend(recipe.appliance());
            ustensils.extend(
                recipe
                    .ustensils
                    .iter()
                    .map(String::as_str)
                    .filter(|u| !u.is_empty()),
            );
        }

        OptionSet {
            ingredients: self.finish(ingredients, &state.tags.ingredients),
            appliances: self.finish(appliances, &state.tags.appliances),
            ustensils: self.finish(ustensils, &state.tags.ustensils),
        }
    }

    fn finish(&self, values: Vec<&str>, selected: &TagSet) -> Vec<String> {
        let mut unique = self.deduplicate(values);
        sort_normalized(&mut unique);

        let selected: HashSet<String> = selected.iter().map(|tag| normalize(tag)).collect();
        unique.retain(|value| !selected.contains(&normalize(value)));
        unique
    }

    fn deduplicate(&self, values: Vec<&str>) -> Vec<String> {
        let mut seen = HashSet::new();
        values
            .into_iter()
            .filter(|value| match self.dedup {
                DedupPolicy::Exact => seen.insert(value.to_string()),
                DedupPolicy::Normalized => seen.insert(normalize(value)),
            })
            .map(str::to_string)
            .collect()
    }
}

/// Option derivation with the exact-value dedup policy
pub fn derive_options<'a, I>(filtered: I, state: &FilterState) -> OptionSet
where
    I: IntoIterator<Item = &'a Recipe>,
{
    OptionDeriver::default().derive(filtered, state)
}

/// Keep the values whose normalized text contains the normalized `input`.
///
/// This is the search box inside an option panel: an empty input keeps every
/// value and there is no minimum length.
pub fn narrow_options<'a, S>(values: &'a [S], input: &str) -> Vec<&'a str>
where
    S: AsRef<str>,
{
    let needle = normalize(input.trim());
    values
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|value| needle.is_empty() || normalize(value).contains(&needle))
        .collect()
}
