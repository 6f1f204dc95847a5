//! CLI command handlers.

use std::sync::Arc;

use crate::catalog;
use crate::config::{ChainedCredential, EnvCredential, PropertiesFileCredential, RecipeConfig};
use crate::orchestrator::{OrchestratorState, RecipeOrchestrator, StartOutcome, StateTransition};
use crate::transport::HttpTransport;
use crate::types::RecipeRequestParams;

use super::{GenerateArgs, OptionsArgs};

/// Handle `recette generate`. Returns whether a recipe was produced.
pub async fn handle_generate(args: GenerateArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let mut config = RecipeConfig::load(args.config.as_deref())?;
    if let Some(model) = &args.model {
        config.set_model(model)?;
    }
    if let Some(t) = args.temperature {
        config.set_temperature(t)?;
    }

    let mut credentials = ChainedCredential::new().with(EnvCredential::default());
    if let Some(path) = &args.credentials_file {
        credentials = credentials.with(PropertiesFileCredential::new(path));
    }

    let transport = Arc::new(HttpTransport::from_config(&config)?);
    let orchestrator = RecipeOrchestrator::with_sink(
        transport,
        Arc::new(credentials),
        &config,
        Arc::new(render_transition),
    );

    let params = RecipeRequestParams::from_selection(
        args.servings,
        args.cuisine,
        args.category,
        args.sub_category,
    );

    if orchestrator.start_generation(params).await == StartOutcome::Rejected {
        return Err("a generation is already running".into());
    }

    match orchestrator.wait_until_settled().await {
        OrchestratorState::Succeeded { recipe_text, .. } => {
            println!("{recipe_text}");
            if let Some(url) = orchestrator.image_url() {
                println!();
                println!("Image: {url}");
            }
            Ok(true)
        }
        OrchestratorState::Failed { message, .. } => {
            eprintln!("Erreur: {message}");
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle `recette options`.
pub fn handle_options(args: OptionsArgs) {
    if let Some(category) = args.category {
        let subs = catalog::sub_categories(&category);
        if subs.is_empty() {
            println!("{category}: no sub-categories");
        } else {
            println!("{category}: {}", subs.join(", "));
        }
        return;
    }

    println!("Servings:   {}", catalog::SERVINGS.join(", "));
    println!("Cuisines:   {}", catalog::CUISINES.join(", "));
    println!("Categories: {}", catalog::CATEGORIES.join(", "));
    for category in catalog::CATEGORIES {
        let subs = catalog::sub_categories(category);
        if !subs.is_empty() {
            println!("  {category}: {}", subs.join(", "));
        }
    }
}

fn render_transition(transition: &StateTransition) {
    match &transition.state {
        OrchestratorState::InFlight { .. } => eprintln!("Recherche de recette en cours..."),
        OrchestratorState::Failed { error_kind, .. } => {
            tracing::debug!(kind = %error_kind, "generation failed")
        }
        _ => {}
    }
}
