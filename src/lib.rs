//! Recette: recipe generation orchestrator.
//!
//! Turns user-picked parameters (servings, cuisine, category, optional
//! sub-category) into a chat-completions prompt, sends it through an
//! injected [`transport::Transport`], validates the response shape, and
//! exposes the cycle as a small state machine a presentation layer observes.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use recette::config::{EnvCredential, RecipeConfig};
//! use recette::orchestrator::{OrchestratorState, RecipeOrchestrator};
//! use recette::transport::HttpTransport;
//! use recette::types::RecipeRequestParams;
//!
//! # async fn example() -> recette::error::Result<()> {
//! let config = RecipeConfig::load(None)?;
//! let transport = Arc::new(HttpTransport::from_config(&config)?);
//! let orchestrator =
//!     RecipeOrchestrator::new(transport, Arc::new(EnvCredential::default()), &config);
//!
//! let params = RecipeRequestParams::new("4", "Italienne", "Viande", "Bœuf");
//! orchestrator.start_generation(params).await;
//! if let OrchestratorState::Succeeded { recipe_text, .. } = orchestrator.wait_until_settled().await {
//!     println!("{recipe_text}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod image;
pub mod models;
pub mod orchestrator;
pub mod prelude;
pub mod prompt;
pub mod transport;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
