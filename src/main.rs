use std::io;

use clap::Parser;
use log::debug;

use recipe_facets::{load_config, Category, FacetsConfig, FacetsError, FilterSession, RecipeRepository};

mod cli;
mod output;

use crate::cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = load_config(cli.config.as_deref())?;
    debug!("{:#?}", config);

    match cli.command {
        Commands::Search {
            engine,
            query,
            ingredients,
            appliances,
            ustensils,
            narrow,
            format,
        } => {
            engine.apply(&mut config);
            let mut session = FilterSession::with_config(load_repository(&config)?, &config);

            session.set_query(&query);
            for value in ingredients {
                session.add_tag(Category::Ingredients, value);
            }
            for value in appliances {
                session.add_tag(Category::Appliances, value);
            }
            for value in ustensils {
                session.add_tag(Category::Ustensils, value);
            }

            output::write(&mut io::stdout().lock(), &session, &narrow, format)?;
        }
        Commands::Session { engine } => {
            engine.apply(&mut config);
            let mut session = FilterSession::with_config(load_repository(&config)?, &config);
            cli::run_session(&mut session, io::stdin().lock(), &mut io::stdout().lock())?;
        }
    }

    Ok(())
}

fn load_repository(config: &FacetsConfig) -> Result<RecipeRepository, FacetsError> {
    let path = config.recipes.as_deref().ok_or_else(|| {
        FacetsError::InvalidCommand(
            "no recipe collection given, use --recipes or set `recipes` in recipe-facets.toml"
                .to_string(),
        )
    })?;
    RecipeRepository::load(path)
}
