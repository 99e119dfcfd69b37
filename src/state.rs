use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::Category;

/// Selected tag values for one category.
///
/// Values keep the spelling they were added with and the order they were
/// added in. Membership is by exact value; matching against recipes goes
/// through the normalizer separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the exact value was already present
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    /// Returns `false` if no stored value equals `value`
    pub fn remove(&mut self, value: &str) -> bool {
        match self.0.iter().position(|v| v == value) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = TagSet::new();
        for value in iter {
            tags.insert(value);
        }
        tags
    }
}

/// Tag sets of the three categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    #[serde(default)]
    pub ingredients: TagSet,
    #[serde(default)]
    pub appliances: TagSet,
    #[serde(default)]
    pub ustensils: TagSet,
}

impl Tags {
    pub fn get(&self, category: Category) -> &TagSet {
        match category {
            Category::Ingredients => &self.ingredients,
            Category::Appliances => &self.appliances,
            Category::Ustensils => &self.ustensils,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut TagSet {
        match category {
            Category::Ingredients => &mut self.ingredients,
            Category::Appliances => &mut self.appliances,
            Category::Ustensils => &mut self.ustensils,
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_empty())
    }
}

/// The complete filter input: free-text query plus selected tags.
///
/// Starts empty. Mutators only change the value; callers re-run the engine
/// afterwards to see the effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub tags: Tags,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the query with leading and trailing whitespace removed
    pub fn set_query(&mut self, text: &str) {
        self.query = text.trim().to_string();
        debug!("Query set to {:?}", self.query);
    }

    /// Add a tag verbatim. Adding an existing value is a no-op.
    pub fn add_tag(&mut self, category: Category, value: impl Into<String>) -> bool {
        let value = value.into();
        let inserted = self.tags.get_mut(category).insert(value.as_str());
        if inserted {
            debug!("Added {} tag {:?}", category, value);
        }
        inserted
    }

    /// Remove the tag stored as exactly `value`. Removing an absent value is a no-op.
    pub fn remove_tag(&mut self, category: Category, value: &str) -> bool {
        let removed = self.tags.get_mut(category).remove(value);
        if removed {
            debug!("Removed {} tag {:?}", category, value);
        }
        removed
    }

    pub fn tags(&self, category: Category) -> &TagSet {
        self.tags.get(category)
    }

    /// Drop the query and every tag
    pub fn clear(&mut self) {
        self.query.clear();
        for category in Category::ALL {
            self.tags.get_mut(category).clear();
        }
    }

    pub fn with_query(mut self, text: &str) -> Self {
        self.set_query(text);
        self
    }

    pub fn with_tag(mut self, category: Category, value: impl Into<String>) -> Self {
        self.add_tag(category, value);
        self
    }
}
