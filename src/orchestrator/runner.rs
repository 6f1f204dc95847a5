//! The task that owns orchestrator state.
//!
//! All state mutation happens here. Commands from handles and transport
//! completions arrive over channels and are applied one at a time, so
//! transitions are totally ordered and sinks see them in that order.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::codec;
use crate::config::{CredentialSupplier, EmptyContentPolicy, GenerationSettings};
use crate::error::{ErrorKind, RecetteError};
use crate::image;
use crate::prompt;
use crate::transport::{RawResponse, Transport};
use crate::types::RecipeRequestParams;

use super::state::{OrchestratorState, StateTransition};

/// Callback used for delivering state transitions.
pub type StateSink = Arc<dyn Fn(&StateTransition) + Send + Sync>;

/// Result of asking the orchestrator to start a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The request was issued; state is now in flight.
    Started,
    /// A request was already in flight; nothing changed.
    Rejected,
    /// The cycle failed before any network attempt.
    Failed(ErrorKind),
}

pub(super) enum Command {
    Start {
        params: RecipeRequestParams,
        reply: oneshot::Sender<StartOutcome>,
    },
}

type Completion = Result<RawResponse, RecetteError>;

pub(super) struct Runner {
    pub(super) transport: Arc<dyn Transport>,
    pub(super) credentials: Arc<dyn CredentialSupplier>,
    pub(super) generation: GenerationSettings,
    pub(super) empty_content: EmptyContentPolicy,
    pub(super) sink: Option<StateSink>,
    pub(super) state_tx: watch::Sender<OrchestratorState>,
}

struct RunnerState {
    current: OrchestratorState,
    seq: u64,
}

impl Runner {
    /// Run until every handle is gone and nothing is in flight.
    pub(super) async fn run(self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let (completion_tx, mut completions) = mpsc::unbounded_channel::<Completion>();
        let mut state = RunnerState {
            current: OrchestratorState::Idle,
            seq: 0,
        };
        let mut commands_open = true;

        loop {
            tokio::select! {
                cmd = commands.recv(), if commands_open => match cmd {
                    Some(Command::Start { params, reply }) => {
                        let outcome = self.start(&mut state, params, &completion_tx);
                        let _ = reply.send(outcome);
                    }
                    None => commands_open = false,
                },
                Some(done) = completions.recv() => self.complete(&mut state, done),
            }

            if !commands_open && !state.current.is_in_flight() {
                debug!("orchestrator handles dropped; stopping");
                break;
            }
        }
    }

    fn start(
        &self,
        state: &mut RunnerState,
        params: RecipeRequestParams,
        completion_tx: &mpsc::UnboundedSender<Completion>,
    ) -> StartOutcome {
        if state.current.is_in_flight() {
            debug!("generation already in flight; ignoring start");
            return StartOutcome::Rejected;
        }

        let prompt = prompt::build(&params);
        let credential = self.credentials.credential();
        let request = match codec::encode(&prompt, credential.as_deref(), &self.generation) {
            Ok(request) => request,
            Err(err) => {
                let kind = err.kind();
                warn!(error = %err, "generation not started");
                self.transition(
                    state,
                    OrchestratorState::Failed {
                        error_kind: kind,
                        message: err.to_string(),
                    },
                );
                return StartOutcome::Failed(kind);
            }
        };

        self.transition(state, OrchestratorState::InFlight { params });

        let transport = Arc::clone(&self.transport);
        let completion_tx = completion_tx.clone();
        tokio::spawn(async move {
            let send = tokio::spawn(async move { transport.send(&request).await });
            // A panicking transport still has to settle the cycle.
            let result = send.await.unwrap_or_else(|e| {
                Err(RecetteError::Network(format!("transport task failed: {e}")))
            });
            // The runner outlives every in-flight request, so this only fails
            // if the runtime is shutting down.
            let _ = completion_tx.send(result);
        });

        StartOutcome::Started
    }

    fn complete(&self, state: &mut RunnerState, done: Completion) {
        let params = match &state.current {
            OrchestratorState::InFlight { params } => params.clone(),
            other => {
                warn!(state = ?other, "completion arrived with nothing in flight");
                return;
            }
        };

        let next = match done.and_then(|raw| codec::decode(raw.status, &raw.body, self.empty_content)) {
            Ok(recipe) => OrchestratorState::Succeeded {
                recipe_text: recipe.text,
                image_query: image::derive(&params),
            },
            Err(err) => {
                warn!(kind = %err.kind(), error = %err, "generation failed");
                OrchestratorState::Failed {
                    error_kind: err.kind(),
                    message: err.to_string(),
                }
            }
        };
        self.transition(state, next);
    }

    fn transition(&self, state: &mut RunnerState, next: OrchestratorState) {
        state.seq += 1;
        state.current = next.clone();
        info!(seq = state.seq, state = state_label(&next), "orchestrator transition");

        self.state_tx.send_replace(next.clone());
        if let Some(sink) = &self.sink {
            sink(&StateTransition {
                seq: state.seq,
                timestamp: Utc::now(),
                state: next,
            });
        }
    }
}

fn state_label(state: &OrchestratorState) -> &'static str {
    match state {
        OrchestratorState::Idle => "idle",
        OrchestratorState::InFlight { .. } => "in_flight",
        OrchestratorState::Succeeded { .. } => "succeeded",
        OrchestratorState::Failed { .. } => "failed",
    }
}
