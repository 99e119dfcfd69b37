use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FacetsError;

/// A recipe record as supplied by the host.
///
/// Optional fields are modeled as such; anything missing from the input
/// deserializes to an empty value instead of failing the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Preparation time in minutes
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default)]
    pub appliance: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ustensils: Vec<String>,
}

impl Recipe {
    /// The recipe name, or an empty string for a nameless record
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// The appliance, with an empty string treated as absent
    pub fn appliance(&self) -> Option<&str> {
        self.appliance.as_deref().filter(|a| !a.is_empty())
    }

    /// Ingredient names in recipe order
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|i| i.ingredient.as_str())
    }
}

// an explicit `null` is read like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One line of a recipe's ingredient list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(ingredient: impl Into<String>) -> Self {
        Self {
            ingredient: ingredient.into(),
            ..Default::default()
        }
    }

    pub fn with_quantity(mut self, quantity: impl Into<Quantity>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Human readable amount such as `"400 grammes"` or `"2"`.
    ///
    /// Returns `None` when there is nothing worth showing: no quantity, a
    /// zero amount or a blank text amount.
    pub fn quantity_label(&self) -> Option<String> {
        let quantity = self.quantity.as_ref().filter(|q| !q.is_blank())?;
        match self.unit.as_deref().filter(|u| !u.is_empty()) {
            Some(unit) => Some(format!("{} {}", quantity, unit)),
            None => Some(quantity.to_string()),
        }
    }
}

/// Amount of an ingredient: either a number or free text such as "1/2"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl Quantity {
    fn is_blank(&self) -> bool {
        match self {
            Quantity::Number(n) => *n == 0.0,
            Quantity::Text(t) => t.trim().is_empty(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => write!(f, "{}", n),
            Quantity::Text(t) => f.write_str(t),
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Number(value)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Quantity::Number(f64::from(value))
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Quantity::Text(value.to_string())
    }
}

/// The three tag categories a recipe can be narrowed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ingredients,
    Appliances,
    Ustensils,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Ingredients,
        Category::Appliances,
        Category::Ustensils,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ingredients => "ingredients",
            Category::Appliances => "appliances",
            Category::Ustensils => "ustensils",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FacetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingredients" | "ingredient" => Ok(Category::Ingredients),
            "appliances" | "appliance" => Ok(Category::Appliances),
            "ustensils" | "ustensil" => Ok(Category::Ustensils),
            _ => Err(FacetsError::UnknownCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_recipe() {
        let json = r#"{
            "id": 1,
            "image": "Recette01-Limonade.jpg",
            "name": "Limonade de Coco",
            "servings": 1,
            "ingredients": [
                { "ingredient": "Lait de coco", "quantity": 400, "unit": "ml" },
                { "ingredient": "Jus de citron", "quantity": 2 },
                { "ingredient": "Glaçons" }
            ],
            "time": 10,
            "description": "Mettre les glaçons à votre goût dans le blender",
            "appliance": "Blender",
            "ustensils": ["cuillère à Soupe", "verres", "presse citron"]
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, Some(1));
        assert_eq!(recipe.name(), "Limonade de Coco");
        assert_eq!(recipe.time, 10);
        assert_eq!(recipe.appliance(), Some("Blender"));
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.ingredients[0].quantity, Some(Quantity::Number(400.0)));
        assert_eq!(recipe.ingredients[2].quantity, None);
        assert_eq!(recipe.ustensils.len(), 3);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let recipe: Recipe = serde_json::from_str(r#"{ "description": "sans nom" }"#).unwrap();
        assert_eq!(recipe.name, None);
        assert_eq!(recipe.name(), "");
        assert_eq!(recipe.appliance(), None);
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.ustensils.is_empty());
        assert_eq!(recipe.time, 0);
    }

    #[test]
    fn test_explicit_nulls_default_to_empty() {
        let json = r#"{
            "id": null,
            "name": "Salade",
            "description": null,
            "time": null,
            "image": null,
            "appliance": null,
            "ingredients": [{ "ingredient": null, "quantity": null, "unit": null }],
            "ustensils": null
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.name(), "Salade");
        assert_eq!(recipe.description, "");
        assert_eq!(recipe.time, 0);
        assert_eq!(recipe.appliance(), None);
        assert_eq!(recipe.ingredients, vec![Ingredient::default()]);
        assert!(recipe.ustensils.is_empty());

        let recipe: Recipe = serde_json::from_str(r#"{ "ingredients": null }"#).unwrap();
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_empty_appliance_is_absent() {
        let recipe = Recipe {
            appliance: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(recipe.appliance(), None);
    }

    #[test]
    fn test_text_quantity() {
        let ingredient: Ingredient =
            serde_json::from_str(r#"{ "ingredient": "Sucre", "quantity": "1/2", "unit": "tasse" }"#)
                .unwrap();
        assert_eq!(ingredient.quantity, Some(Quantity::Text("1/2".to_string())));
        assert_eq!(ingredient.quantity_label().as_deref(), Some("1/2 tasse"));
    }

    #[test]
    fn test_quantity_label() {
        let with_unit = Ingredient::new("Farine").with_quantity(400u32).with_unit("grammes");
        assert_eq!(with_unit.quantity_label().as_deref(), Some("400 grammes"));

        let fractional = Ingredient::new("Beurre").with_quantity(0.5);
        assert_eq!(fractional.quantity_label().as_deref(), Some("0.5"));

        let zero = Ingredient::new("Sel").with_quantity(0u32).with_unit("g");
        assert_eq!(zero.quantity_label(), None);

        let none = Ingredient::new("Poivre").with_unit("pincée");
        assert_eq!(none.quantity_label(), None);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("ingredients".parse::<Category>().unwrap(), Category::Ingredients);
        assert_eq!("Appliance".parse::<Category>().unwrap(), Category::Appliances);
        assert_eq!(" ustensils ".parse::<Category>().unwrap(), Category::Ustensils);
        assert!(matches!(
            "spices".parse::<Category>(),
            Err(FacetsError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_category_display_round_trips() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }
}
