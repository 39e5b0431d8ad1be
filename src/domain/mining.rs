//! Batch threshold gate and the mining workflow state machine.
//!
//! The actual mining is remote and opaque: the backend mines
//! synchronously, so a request is long-running from the client's side.
//! The orchestrator here owns only the workflow state; the app layer
//! spawns the request and feeds the outcome back through
//! [`MiningOrchestrator::complete`].

use tracing::info;

use super::PolicyError;
use crate::api::Block;

/// Whether a new block may be assembled. `max_docs == 0` is a degenerate
/// but legal configuration: no batching restriction.
pub fn can_assemble(pending_count: usize, max_docs: u32) -> bool {
    pending_count >= max_docs as usize
}

/// The one block that may be mined right now: the first block in creation
/// order that is not yet mined. Single-block-at-a-time mining is a
/// contract of this function, not a UI convention.
pub fn first_unmined(blocks: &[Block]) -> Option<&Block> {
    blocks.iter().find(|b| !b.is_mined)
}

/// What a mining request was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningJob {
    /// `POST /blocks/create-and-mine/{maxDocs}/{zeros}`: on success the
    /// document and block lists are stale and must be fully reloaded.
    AssembleAndMine,
    /// `POST /blocks/mine/{blockId}/{zeros}`: on success only this
    /// block's mined flag needs to flip.
    MineBlock(u64),
}

/// Terminal result of a spawned mining request.
#[derive(Debug, Clone)]
pub enum MiningOutcome {
    Success(MiningJob),
    Failed(MiningJob, String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MiningState {
    #[default]
    Idle,
    Requesting(MiningJob),
    Success(MiningJob),
    Failed(MiningJob, String),
}

/// Workflow state: `Idle → Requesting → (Success | Failed) → Idle`.
/// Terminal states persist until the user acknowledges them.
#[derive(Debug, Default)]
pub struct MiningOrchestrator {
    state: MiningState,
}

impl MiningOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MiningState {
        &self.state
    }

    /// A request is in flight; re-entrant invocation is refused and the
    /// progress indicator stays up.
    pub fn in_flight(&self) -> bool {
        matches!(self.state, MiningState::Requesting(_))
    }

    /// Whether the workflow sits in a terminal state awaiting user
    /// acknowledgement.
    pub fn awaiting_ack(&self) -> bool {
        matches!(
            self.state,
            MiningState::Success(_) | MiningState::Failed(_, _)
        )
    }

    /// Enter `Requesting` for `job`. Refused while another request is in
    /// flight; a pending terminal state is discarded in favor of the new
    /// request.
    pub fn begin(&mut self, job: MiningJob) -> Result<(), PolicyError> {
        if self.in_flight() {
            return Err(PolicyError::MiningInProgress);
        }
        info!(?job, "mining request started");
        self.state = MiningState::Requesting(job);
        Ok(())
    }

    /// Record the outcome of the in-flight request. Outcomes for a job
    /// that is no longer in flight are ignored.
    pub fn complete(&mut self, outcome: MiningOutcome) {
        let MiningState::Requesting(current) = &self.state else {
            return;
        };
        let current = *current;
        match outcome {
            MiningOutcome::Success(job) if job == current => {
                info!(?job, "mining request succeeded");
                self.state = MiningState::Success(job);
            }
            MiningOutcome::Failed(job, error) if job == current => {
                info!(?job, %error, "mining request failed");
                self.state = MiningState::Failed(job, error);
            }
            _ => {}
        }
    }

    /// User acknowledged the terminal state; return to `Idle`. No-op
    /// while a request is in flight: the indicator is non-dismissible.
    pub fn acknowledge(&mut self) {
        if self.awaiting_ack() {
            self.state = MiningState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: u64, is_mined: bool) -> Block {
        Block {
            id,
            created_at: chrono::Utc::now(),
            documents: Vec::new(),
            is_mined,
            previous_hash: None,
            hash: None,
            mined_at: None,
            proof: None,
            milliseconds: None,
        }
    }

    #[test]
    fn gate_truth_table() {
        assert!(can_assemble(5, 5));
        assert!(can_assemble(6, 5));
        assert!(!can_assemble(4, 5));
        // Degenerate config: no restriction.
        assert!(can_assemble(0, 0));
        assert!(can_assemble(100, 0));
    }

    #[test]
    fn first_unmined_follows_creation_order() {
        let blocks = vec![block(1, true), block(2, false), block(3, false)];
        assert_eq!(first_unmined(&blocks).unwrap().id, 2);

        let all_mined = vec![block(1, true)];
        assert!(first_unmined(&all_mined).is_none());
    }

    #[test]
    fn reentrant_begin_is_refused() {
        let mut miner = MiningOrchestrator::new();
        miner.begin(MiningJob::AssembleAndMine).unwrap();
        let err = miner.begin(MiningJob::MineBlock(2)).unwrap_err();
        assert_eq!(err, PolicyError::MiningInProgress);
        assert!(miner.in_flight());
    }

    #[test]
    fn success_then_acknowledge_returns_to_idle() {
        let mut miner = MiningOrchestrator::new();
        miner.begin(MiningJob::MineBlock(2)).unwrap();
        miner.complete(MiningOutcome::Success(MiningJob::MineBlock(2)));
        assert_eq!(miner.state(), &MiningState::Success(MiningJob::MineBlock(2)));
        assert!(miner.awaiting_ack());

        miner.acknowledge();
        assert_eq!(miner.state(), &MiningState::Idle);
    }

    #[test]
    fn failure_carries_error_and_resets_on_ack() {
        let mut miner = MiningOrchestrator::new();
        miner.begin(MiningJob::AssembleAndMine).unwrap();
        miner.complete(MiningOutcome::Failed(
            MiningJob::AssembleAndMine,
            "server returned HTTP 500".to_string(),
        ));
        match miner.state() {
            MiningState::Failed(MiningJob::AssembleAndMine, error) => {
                assert!(error.contains("500"));
            }
            other => panic!("unexpected state: {other:?}"),
        }
        miner.acknowledge();
        assert_eq!(miner.state(), &MiningState::Idle);
    }

    #[test]
    fn stale_outcome_for_other_job_is_ignored() {
        let mut miner = MiningOrchestrator::new();
        miner.begin(MiningJob::MineBlock(7)).unwrap();
        miner.complete(MiningOutcome::Success(MiningJob::MineBlock(9)));
        assert!(miner.in_flight());
    }

    #[test]
    fn acknowledge_cannot_dismiss_in_flight_request() {
        let mut miner = MiningOrchestrator::new();
        miner.begin(MiningJob::AssembleAndMine).unwrap();
        miner.acknowledge();
        assert!(miner.in_flight());
    }
}
