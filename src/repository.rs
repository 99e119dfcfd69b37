use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use crate::error::FacetsError;
use crate::model::Recipe;

/// Immutable recipe collection shared by every filtering pass.
///
/// Cloning is cheap: all clones point at the same records, which are never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    recipes: Arc<[Recipe]>,
}

impl RecipeRepository {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let nameless = recipes.iter().filter(|r| r.name.is_none()).count();
        if nameless > 0 {
            warn!(
                "{} recipe(s) without a name will never match a text search",
                nameless
            );
        }
        info!("Loaded {} recipes", recipes.len());
        Self {
            recipes: recipes.into(),
        }
    }

    /// Parse a JSON array of recipes
    pub fn from_json_str(json: &str) -> Result<Self, FacetsError> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Ok(Self::new(recipes))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, FacetsError> {
        let recipes: Vec<Recipe> = serde_json::from_reader(reader)?;
        Ok(Self::new(recipes))
    }

    /// Read a JSON array of recipes from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FacetsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let repository = Self::from_json_str(&content)?;
        info!("Recipes read from {}", path.display());
        Ok(repository)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Default for RecipeRepository {
    fn default() -> Self {
        Self {
            recipes: Arc::from(Vec::new()),
        }
    }
}

impl From<Vec<Recipe>> for RecipeRepository {
    fn from(recipes: Vec<Recipe>) -> Self {
        Self::new(recipes)
    }
}

impl<'a> IntoIterator for &'a RecipeRepository {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str_keeps_source_order() {
        let repository = RecipeRepository::from_json_str(
            r#"[{ "name": "B" }, { "name": "A" }, { "name": "C" }]"#,
        )
        .unwrap();

        let names: Vec<&str> = repository.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(repository.len(), 3);
    }

    #[test]
    fn test_null_fields_do_not_fail_the_collection() {
        let repository = RecipeRepository::from_json_str(
            r#"[
                { "name": "Tarte", "ustensils": ["Moule"] },
                { "name": "Salade", "ustensils": null, "description": null },
                { "name": "Soupe", "ingredients": [{ "ingredient": null }] }
            ]"#,
        )
        .unwrap();

        assert_eq!(repository.len(), 3);
        assert!(repository.recipes()[1].ustensils.is_empty());
        assert_eq!(repository.recipes()[2].ingredient_names().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_rejects_non_array() {
        let result = RecipeRepository::from_json_str(r#"{ "name": "seul" }"#);
        assert!(matches!(result, Err(FacetsError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = RecipeRepository::load("/definitely/not/here/recipes.json");
        assert!(matches!(result, Err(FacetsError::Io(_))));
    }

    #[test]
    fn test_clones_share_records() {
        let repository = RecipeRepository::from(vec![Recipe::default()]);
        let clone = repository.clone();
        assert!(std::ptr::eq(repository.recipes(), clone.recipes()));
    }

    #[test]
    fn test_from_reader() {
        let json = br#"[{ "name": "Tarte" }]"#;
        let repository = RecipeRepository::from_reader(&json[..]).unwrap();
        assert_eq!(repository.recipes()[0].name(), "Tarte");
    }
}
