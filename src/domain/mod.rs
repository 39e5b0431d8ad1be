//! Client-side document-lifecycle and block-assembly orchestration.

mod app;
mod mining;
mod selection;
mod store;
mod validator;

pub use app::{Action, App, InputMode, StatusKind, StatusLine, Tab};
pub use mining::{
    can_assemble, first_unmined, MiningJob, MiningOrchestrator, MiningOutcome, MiningState,
};
pub use selection::{Scope, SelectionSet};
pub use store::DocumentStore;
pub use validator::ChainValidation;

use thiserror::Error;

use crate::api::ApiError;

/// Client-side policy refusal. These never reach the network: the call
/// is rejected before any request is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("nothing selected")]
    EmptySelection,
    #[error("sealed documents cannot be deleted")]
    SealedDocuments,
    #[error("{missing} more pending document(s) required to assemble a block")]
    BelowThreshold { missing: usize },
    #[error("a mining request is already in flight")]
    MiningInProgress,
    #[error("no unmined block available")]
    NoUnminedBlock,
    #[error("not authenticated")]
    NotAuthenticated,
}

/// Failure of a user action: either refused client-side or failed at the
/// backend. Terminal either way; retry requires a new explicit action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
