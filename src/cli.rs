use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

use recipe_facets::{Category, DedupPolicy, FacetsConfig, FacetsError, FilterSession};

use crate::output::{self, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "recipe-facets")]
#[command(about = "Search recipes by text and narrow them by ingredient, appliance and ustensil", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./recipe-facets.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one search and print the matching recipes and remaining options
    Search {
        #[command(flatten)]
        engine: EngineArgs,

        /// Free-text query (active from three characters)
        #[arg(short, long, default_value = "")]
        query: String,

        /// Required ingredient (repeatable, all must match)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,

        /// Accepted appliance (repeatable, any may match)
        #[arg(long = "appliance")]
        appliances: Vec<String>,

        /// Required ustensil (repeatable, all must match)
        #[arg(long = "ustensil")]
        ustensils: Vec<String>,

        /// Narrow an option list, e.g. `ingredients=choc`
        #[arg(long)]
        narrow: Vec<NarrowArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Interactive session reading commands from stdin
    Session {
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// JSON file holding the recipe collection
    #[arg(short, long)]
    pub recipes: Option<PathBuf>,

    /// Option deduplication: exact or normalized
    #[arg(long)]
    pub dedup: Option<DedupPolicy>,

    /// Shortest query that filters results
    #[arg(long)]
    pub min_query_chars: Option<usize>,
}

impl EngineArgs {
    /// Command line flags win over the loaded configuration
    pub fn apply(&self, config: &mut FacetsConfig) {
        if let Some(recipes) = &self.recipes {
            config.recipes = Some(recipes.display().to_string());
        }
        if let Some(dedup) = self.dedup {
            config.dedup = dedup;
        }
        if let Some(min_query_chars) = self.min_query_chars {
            config.min_query_chars = min_query_chars;
        }
    }
}

/// A `<category>=<text>` option panel search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrowArg {
    pub category: Category,
    pub text: String,
}

impl FromStr for NarrowArg {
    type Err = FacetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, text) = s.split_once('=').ok_or_else(|| {
            FacetsError::InvalidCommand(format!("expected <category>=<text>, got {:?}", s))
        })?;
        Ok(NarrowArg {
            category: category.parse()?,
            text: text.to_string(),
        })
    }
}

/// One line of an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Query(String),
    Add(Category, String),
    Remove(Category, String),
    Narrow(Category, String),
    Clear,
    Tags,
    Show,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = FacetsError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_lowercase().as_str() {
            "query" | "q" => Ok(SessionCommand::Query(rest.to_string())),
            "add" => {
                let (category, value) = category_and_text(rest)?;
                require_value(word, &value)?;
                Ok(SessionCommand::Add(category, value))
            }
            "remove" | "rm" => {
                let (category, value) = category_and_text(rest)?;
                require_value(word, &value)?;
                Ok(SessionCommand::Remove(category, value))
            }
            "narrow" => {
                let (category, text) = category_and_text(rest)?;
                Ok(SessionCommand::Narrow(category, text))
            }
            "clear" => Ok(SessionCommand::Clear),
            "tags" => Ok(SessionCommand::Tags),
            "show" => Ok(SessionCommand::Show),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            _ => Err(FacetsError::InvalidCommand(format!(
                "unknown command {:?}, type `help`",
                word
            ))),
        }
    }
}

fn category_and_text(rest: &str) -> Result<(Category, String), FacetsError> {
    let (category, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if category.is_empty() {
        return Err(FacetsError::InvalidCommand(
            "missing category (ingredients, appliances or ustensils)".to_string(),
        ));
    }
    Ok((category.parse()?, text.trim().to_string()))
}

fn require_value(command: &str, value: &str) -> Result<(), FacetsError> {
    if value.is_empty() {
        return Err(FacetsError::InvalidCommand(format!(
            "`{}` needs a value",
            command
        )));
    }
    Ok(())
}

const HELP: &str = "\
commands:
  query <text>               set the search text (empty clears it)
  add <category> <value>     select a tag
  remove <category> <value>  unselect a tag
  narrow <category> <text>   search inside an option list
  clear                      drop the query and all tags
  tags                       list selected tags
  show                       print the current results
  quit
categories: ingredients, appliances, ustensils";

/// Drive a session from line-oriented input until `quit` or end of input.
///
/// Every mutation is followed by a fresh view, so the output always reflects
/// the state after the last command.
pub fn run_session(
    session: &mut FilterSession,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    output::write_text(out, session, &[])?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        match command {
            SessionCommand::Query(text) => session.set_query(&text),
            SessionCommand::Add(category, value) => {
                if !session.add_tag(category, value.as_str()) {
                    writeln!(out, "{} tag {:?} already selected", category, value)?;
                    continue;
                }
            }
            SessionCommand::Remove(category, value) => {
                if !session.remove_tag(category, &value) {
                    writeln!(out, "{} tag {:?} is not selected", category, value)?;
                    continue;
                }
            }
            SessionCommand::Narrow(category, text) => {
                let view = session.view();
                let values = view.options.narrow(category, &text);
                writeln!(out, "{}: {}", category, values.join(", "))?;
                continue;
            }
            SessionCommand::Clear => session.clear(),
            SessionCommand::Tags => {
                output::write_tags(out, session.state())?;
                continue;
            }
            SessionCommand::Show => {}
            SessionCommand::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            SessionCommand::Quit => break,
        }

        writeln!(out)?;
        output::write_text(out, session, &[])?;
    }

    Ok(())
}
