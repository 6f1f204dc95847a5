//! Orchestrator states and the transition envelope observers receive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ImageSettings;
use crate::error::ErrorKind;
use crate::image;
use crate::types::RecipeRequestParams;

/// Current phase of the generation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OrchestratorState {
    #[default]
    Idle,
    InFlight {
        params: RecipeRequestParams,
    },
    Succeeded {
        recipe_text: String,
        image_query: String,
    },
    Failed {
        error_kind: ErrorKind,
        message: String,
    },
}

impl OrchestratorState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    /// Whether a new generation can be triggered. False exactly while a
    /// request is in flight.
    pub fn trigger_enabled(&self) -> bool {
        !self.is_in_flight()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    /// URL of the representative image, once a recipe exists.
    pub fn image_url(&self, settings: &ImageSettings) -> Option<String> {
        match self {
            Self::Succeeded { image_query, .. } => Some(image::image_url(settings, image_query)),
            _ => None,
        }
    }

    /// Plain-text payload for sharing: the recipe, a blank line, then the
    /// image URL. Only available after a successful generation.
    pub fn share_payload(&self, settings: &ImageSettings) -> Option<String> {
        match self {
            Self::Succeeded {
                recipe_text,
                image_query,
            } => Some(format!(
                "{recipe_text}\n\nImage: {}",
                image::image_url(settings, image_query)
            )),
            _ => None,
        }
    }
}

/// Envelope delivered to the state sink on every transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    /// Strictly increasing per orchestrator, starting at 1.
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub state: OrchestratorState,
}
