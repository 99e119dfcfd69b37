use std::io::{self, Write};

use serde::Serialize;

use recipe_facets::{
    narrow_options, Category, FilterSession, FilterState, NoResults, OptionSet, Recipe,
};

use crate::cli::NarrowArg;

/// Output format for one-shot searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable cards and option lists
    Text,
    /// A single JSON document
    Json,
}

#[derive(Serialize)]
struct SearchReport<'a> {
    state: &'a FilterState,
    recipes: &'a [&'a Recipe],
    options: OptionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    no_results: Option<NoResults>,
}

/// Apply the panel search boxes to the derived options
pub fn narrowed(options: OptionSet, narrow: &[NarrowArg]) -> OptionSet {
    let apply = |category: Category, values: Vec<String>| -> Vec<String> {
        narrow
            .iter()
            .filter(|arg| arg.category == category)
            .fold(values, |values, arg| {
                narrow_options(&values, &arg.text)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
    };

    OptionSet {
        ingredients: apply(Category::Ingredients, options.ingredients),
        appliances: apply(Category::Appliances, options.appliances),
        ustensils: apply(Category::Ustensils, options.ustensils),
    }
}

pub fn write(
    out: &mut impl Write,
    session: &FilterSession,
    narrow: &[NarrowArg],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(out, session, narrow),
        OutputFormat::Json => write_json(out, session, narrow),
    }
}

pub fn write_json(
    out: &mut impl Write,
    session: &FilterSession,
    narrow: &[NarrowArg],
) -> io::Result<()> {
    let view = session.view();
    let report = SearchReport {
        state: session.state(),
        recipes: &view.recipes,
        options: narrowed(view.options.clone(), narrow),
        no_results: session.no_results_for(&view),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

pub fn write_text(
    out: &mut impl Write,
    session: &FilterSession,
    narrow: &[NarrowArg],
) -> io::Result<()> {
    let view = session.view();

    match session.no_results_for(&view) {
        Some(hint) => writeln!(out, "{}", hint.message())?,
        None => {
            let noun = if view.recipes.len() == 1 { "recipe" } else { "recipes" };
            writeln!(out, "{} {}", view.recipes.len(), noun)?;
            for recipe in &view.recipes {
                write_card(out, recipe)?;
            }
        }
    }

    writeln!(out)?;
    write_options(out, &narrowed(view.options, narrow))?;
    write_tags(out, session.state())
}

fn write_card(out: &mut impl Write, recipe: &Recipe) -> io::Result<()> {
    write!(out, "\n  {} ({} min", recipe.name(), recipe.time)?;
    if let Some(appliance) = recipe.appliance() {
        write!(out, ", {}", appliance)?;
    }
    writeln!(out, ")")?;

    for ingredient in &recipe.ingredients {
        match ingredient.quantity_label() {
            Some(quantity) => writeln!(out, "    - {}: {}", ingredient.ingredient, quantity)?,
            None => writeln!(out, "    - {}", ingredient.ingredient)?,
        }
    }
    if !recipe.ustensils.is_empty() {
        writeln!(out, "    ustensils: {}", recipe.ustensils.join(", "))?;
    }
    Ok(())
}

fn write_options(out: &mut impl Write, options: &OptionSet) -> io::Result<()> {
    for category in Category::ALL {
        let values = options.get(category);
        if values.is_empty() {
            writeln!(out, "{}: -", category)?;
        } else {
            writeln!(out, "{}: {}", category, values.join(", "))?;
        }
    }
    Ok(())
}

pub fn write_tags(out: &mut impl Write, state: &FilterState) -> io::Result<()> {
    if state.tags.is_empty() {
        return writeln!(out, "tags: none");
    }
    let selected: Vec<String> = Category::ALL
        .iter()
        .flat_map(|category| {
            state
                .tags(*category)
                .iter()
                .map(move |value| format!("[{}: {}]", category, value))
        })
        .collect();
    writeln!(out, "tags: {}", selected.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_facets::RecipeRepository;

    fn session() -> FilterSession {
        FilterSession::new(
            RecipeRepository::from_json_str(
                r#"[
                    {
                        "name": "Tarte aux pommes",
                        "time": 45,
                        "ingredients": [
                            { "ingredient": "Pomme", "quantity": 4 },
                            { "ingredient": "Crème fraîche", "quantity": 20, "unit": "cl" }
                        ],
                        "appliance": "Four",
                        "ustensils": ["Moule"]
                    },
                    {
                        "name": "Crème brûlée",
                        "time": 60,
                        "ingredients": [{ "ingredient": "Crème liquide" }],
                        "appliance": "Four",
                        "ustensils": ["Chalumeau"]
                    }
                ]"#,
            )
            .unwrap(),
        )
    }

    fn render(session: &FilterSession, narrow: &[NarrowArg], format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer, session, narrow, format).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_text_output() {
        let mut session = session();
        session.add_tag(Category::Ustensils, "Moule");

        let text = render(&session, &[], OutputFormat::Text);
        assert!(text.starts_with("1 recipe\n"));
        assert!(text.contains("  Tarte aux pommes (45 min, Four)"));
        assert!(text.contains("    - Pomme: 4"));
        assert!(text.contains("    - Crème fraîche: 20 cl"));
        assert!(text.contains("ingredients: Crème fraîche, Pomme"));
        assert!(text.contains("ustensils: -"));
        assert!(text.contains("tags: [ustensils: Moule]"));
    }

    #[test]
    fn test_text_output_without_results() {
        let mut session = session();
        session.set_query("poulet");
        let text = render(&session, &[], OutputFormat::Text);
        assert!(text.starts_with("No recipe contains \u{ab} poulet \u{bb}."));
        assert!(text.contains("appliances: -"));
        assert!(text.contains("tags: none"));
    }

    #[test]
    fn test_narrowed_options() {
        let narrow: Vec<NarrowArg> = vec!["ingredients=creme".parse().unwrap()];
        let text = render(&session(), &narrow, OutputFormat::Text);
        assert!(text.contains("ingredients: Crème fraîche, Crème liquide\n"));
        assert!(text.contains("ustensils: Chalumeau, Moule"));
    }

    #[test]
    fn test_json_output() {
        let mut session = session();
        session.set_query("brulee");

        let json: serde_json::Value =
            serde_json::from_str(&render(&session, &[], OutputFormat::Json)).unwrap();
        assert_eq!(json["state"]["query"], "brulee");
        assert_eq!(json["recipes"].as_array().unwrap().len(), 1);
        assert_eq!(json["recipes"][0]["name"], "Crème brûlée");
        assert_eq!(json["options"]["ustensils"], serde_json::json!(["Chalumeau"]));
        assert!(json.get("no_results").is_none());
    }

    #[test]
    fn test_json_output_without_results() {
        let mut session = session();
        session.add_tag(Category::Appliances, "Micro-ondes");

        let json: serde_json::Value =
            serde_json::from_str(&render(&session, &[], OutputFormat::Json)).unwrap();
        assert!(json["recipes"].as_array().unwrap().is_empty());
        assert_eq!(json["no_results"]["query"], "");
    }
}
