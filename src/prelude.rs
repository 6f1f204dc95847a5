//! Convenience re-exports for common use.

pub use crate::codec::{GenerationRequest, GenerationResult};
pub use crate::config::{
    CredentialSupplier, EmptyContentPolicy, EnvCredential, GenerationSettings, ImageSettings,
    RecipeConfig,
};
pub use crate::error::{ErrorKind, RecetteError, Result};
pub use crate::models::ChatModel;
pub use crate::orchestrator::{
    OrchestratorState, RecipeOrchestrator, StartOutcome, StateSink, StateTransition,
};
pub use crate::transport::{HttpTransport, RawResponse, Transport};
pub use crate::types::{Recipe, RecipeRequestParams};
