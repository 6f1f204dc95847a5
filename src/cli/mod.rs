//! CLI entry point for recette.

pub mod handlers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Recette recipe generator
#[derive(Parser, Debug)]
#[command(name = "recette", version, about = "Recette: generate recipes from a few choices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a recipe
    Generate(GenerateArgs),
    /// List the servings, cuisines, categories and sub-categories on offer
    Options(OptionsArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Number of servings
    #[arg(short = 'n', long, default_value = "4")]
    pub servings: String,

    /// Cuisine (e.g. Italienne)
    #[arg(short, long)]
    pub cuisine: String,

    /// Category (e.g. Viande)
    #[arg(short = 'k', long)]
    pub category: String,

    /// Sub-category, only used for categories that have one (e.g. Bœuf)
    #[arg(short, long)]
    pub sub_category: Option<String>,

    /// Model id (e.g. gpt-4o-mini)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Properties file holding OPENAI_API_KEY, tried after the environment
    #[arg(long)]
    pub credentials_file: Option<PathBuf>,
}

/// Arguments for the `options` subcommand.
#[derive(Parser, Debug)]
pub struct OptionsArgs {
    /// Only list the sub-categories of this category
    #[arg(long)]
    pub category: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
