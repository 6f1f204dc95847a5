//! Recipe generation state machine.
//!
//! ```text
//! Idle ──start──▶ InFlight ──ok──▶ Succeeded ──start──▶ InFlight ...
//!                    │
//!                    └──err──▶ Failed ──start──▶ InFlight ...
//! ```
//!
//! A start while in flight is rejected without touching state. A missing
//! credential fails the cycle before any request is issued.

pub mod runner;
pub mod state;

pub use runner::{StartOutcome, StateSink};
pub use state::{OrchestratorState, StateTransition};

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};

use crate::config::{CredentialSupplier, ImageSettings, RecipeConfig};
use crate::transport::Transport;
use crate::types::RecipeRequestParams;

use runner::{Command, Runner};

/// Handle to a running orchestrator. Cheap to clone.
///
/// Must be created inside a tokio runtime: construction spawns the task that
/// owns the state.
#[derive(Clone)]
pub struct RecipeOrchestrator {
    commands: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<OrchestratorState>,
    image: ImageSettings,
}

impl RecipeOrchestrator {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialSupplier>,
        config: &RecipeConfig,
    ) -> Self {
        Self::spawn(transport, credentials, config, None)
    }

    /// Like [`RecipeOrchestrator::new`], delivering every transition to `sink`.
    pub fn with_sink(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialSupplier>,
        config: &RecipeConfig,
        sink: StateSink,
    ) -> Self {
        Self::spawn(transport, credentials, config, Some(sink))
    }

    fn spawn(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialSupplier>,
        config: &RecipeConfig,
        sink: Option<StateSink>,
    ) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(OrchestratorState::Idle);

        let runner = Runner {
            transport,
            credentials,
            generation: config.generation.clone(),
            empty_content: config.empty_content,
            sink,
            state_tx,
        };
        tokio::spawn(runner.run(command_rx));

        Self {
            commands,
            state_rx,
            image: config.image.clone(),
        }
    }

    /// Start a generation for `params`.
    ///
    /// When this returns [`StartOutcome::Started`] the in-flight transition has
    /// already been delivered; the result arrives later as another transition.
    pub async fn start_generation(&self, params: RecipeRequestParams) -> StartOutcome {
        let (reply, reply_rx) = oneshot::channel();
        if self.commands.send(Command::Start { params, reply }).is_err() {
            tracing::error!("orchestrator task is gone; start ignored");
            return StartOutcome::Rejected;
        }
        reply_rx.await.unwrap_or(StartOutcome::Rejected)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> OrchestratorState {
        self.state_rx.borrow().clone()
    }

    /// Receiver that observes every state change (latest value wins).
    pub fn subscribe(&self) -> watch::Receiver<OrchestratorState> {
        self.state_rx.clone()
    }

    /// Wait until nothing is in flight and return that state.
    pub async fn wait_until_settled(&self) -> OrchestratorState {
        let mut rx = self.state_rx.clone();
        let settled = match rx.wait_for(|s| !s.is_in_flight()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    /// Image URL for the current recipe, if there is one.
    pub fn image_url(&self) -> Option<String> {
        self.state_rx.borrow().image_url(&self.image)
    }

    /// Share payload for the current recipe, if there is one.
    pub fn share_payload(&self) -> Option<String> {
        self.state_rx.borrow().share_payload(&self.image)
    }
}

impl std::fmt::Debug for RecipeOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeOrchestrator")
            .field("state", &*self.state_rx.borrow())
            .field("image", &self.image)
            .finish()
    }
}
