use std::fmt::Debug;
use std::time::Instant;

mod game_trait;

pub use game_trait::*;

/// Failures the engine cannot recover from. The adapter's contracts are
/// assumed to hold; when one is broken the decision is abandoned rather than
/// patched over.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A move was requested for a position that already has an outcome.
    #[error("position already has an outcome")]
    GameOver,
    /// The adapter reported no legal moves for a position still in progress.
    #[error("no legal moves from an undecided position")]
    NoLegalMoves,
    /// The adapter rejected a move it had itself enumerated.
    #[error("adapter rejected the move {0}")]
    RejectedMove(String),
}

impl SearchError {
    #[inline]
    pub fn rejected<A: Debug, E: Debug>(action: A, err: E) -> Self {
        SearchError::RejectedMove(format!("{action:?}: {err:?}"))
    }
}

/// Caps on a single search invocation. With both fields `None` the search
/// never terminates on its own; callers are expected to set at least one.
#[derive(Debug, Default, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    pub max_time_ms: Option<u128>,
    pub max_iterations: Option<u64>,
}

impl SearchLimits {
    #[inline]
    pub fn time_only(max_time_ms: u128) -> Self {
        Self {
            max_time_ms: Some(max_time_ms),
            max_iterations: None,
        }
    }

    /// Whether a search that started at `start_time` and has completed
    /// `iterations` iterations should stop issuing new ones. Checked between
    /// iterations only; an iteration in flight always runs to completion.
    pub fn should_terminate(&self, start_time: Instant, iterations: u64) -> bool {
        if let Some(max_time_ms) = self.max_time_ms {
            return start_time.elapsed().as_millis() >= max_time_ms;
        }
        if let Some(max_iterations) = self.max_iterations {
            return iterations >= max_iterations;
        }

        false
    }
}

#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchCounter {
    /// Completed search iterations (one playout each).
    pub iterations: u64,
    /// Number of states visited through game state advancements.
    pub states_visited: u64,
}

impl SearchCounter {
    pub fn summary(&self, dt_ns: u128) -> String {
        let dt_ms: f64 = 1e-6 * (dt_ns as f64);
        let rate: f64 = (1e-6_f64 * 1e9_f64) * (self.states_visited as f64) / (dt_ns as f64);
        format!(
            "iters={} dt={dt_ms:.2}ms rate={rate:.4} Mstates/s",
            self.iterations
        )
    }
}

/// Outcome of a completed search: the chosen move plus counters.
#[derive(Debug, Clone)]
pub struct SearchResult<G: Game> {
    pub action: G::Action,
    pub counter: SearchCounter,
}

/// A move-selection algorithm driving a [`Game`] adapter.
pub trait GameTreeSearch<G: Game> {
    fn search(&mut self, position: &G) -> Result<SearchResult<G>, SearchError>;
}
