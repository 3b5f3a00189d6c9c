use instant::Instant;

use gambit::prelude::*;

use crate::dedup::trim_transpositions;
use crate::mcts::{Mcts, MctsConfig};
use crate::tactics;

/// Per-move wall-clock budgets plus the engine configuration.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// Budget for the opening move, which the host allows extra time for.
    pub first_move_ms: u64,
    /// Budget for every move after the first.
    pub regular_move_ms: u64,
    pub search: MctsConfig,
}

impl AgentConfig {
    pub const STANDARD: Self = Self {
        first_move_ms: 12_000,
        regular_move_ms: 1_950,
        search: MctsConfig::STANDARD,
    };
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Chooses one legal move per turn: two one-ply tactical pre-checks first,
/// then anytime tree search on whatever budget remains.
#[derive(Debug, Default, Copy, Clone)]
pub struct Agent {
    pub config: AgentConfig,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    /// Decide a move for `position` within the per-move budget. The host
    /// receives exactly one legal move, or the error is unrecoverable.
    pub fn choose_move<G: Game>(&self, position: &G) -> Result<G::Action, SearchError> {
        let start = Instant::now();
        if position.winner().is_some() {
            return Err(SearchError::GameOver);
        }
        let budget_ms = if position.turn_index() == 0 {
            self.config.first_move_ms
        } else {
            self.config.regular_move_ms
        };
        let debug = self.config.search.debug;

        let moves = trim_transpositions(position, position.actions())?;
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        if let Some(action) = tactics::immediate_win(position, &moves)? {
            if debug {
                println!("- found a one-ply winning move");
            }
            return Ok(action);
        }

        // TODO: revisit. The move returned by `immediate_loss` is one whose
        // own aftermath hands the opponent the win, so playing it concedes on
        // the spot. A real block would keep only the moves after which the
        // opponent has no winning reply.
        if let Some(action) = tactics::immediate_loss(position, &moves)? {
            if debug {
                println!("- opponent threatens to win; answering with the flagged move");
            }
            return Ok(action);
        }

        // Whatever the pre-checks spent comes out of the search budget.
        let remaining_ms = u128::from(budget_ms).saturating_sub(start.elapsed().as_millis());
        let mut config = self.config.search;
        config.limits = Some(SearchLimits {
            max_time_ms: Some(remaining_ms),
            max_iterations: config.limits.and_then(|l| l.max_iterations),
        });
        let mut search = Mcts::new(config);
        let result = search.search(position)?;
        if debug {
            println!(
                "- decided in {:.3}s ({})",
                start.elapsed().as_secs_f64(),
                result.counter.summary(start.elapsed().as_nanos())
            );
        }
        Ok(result.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TakeAway, TakeAwayMove};

    /// Zero-budget config so tests finish in microseconds; the engine still
    /// guarantees one iteration.
    fn instant_agent() -> Agent {
        Agent::new(AgentConfig {
            first_move_ms: 0,
            regular_move_ms: 0,
            search: MctsConfig::STANDARD,
        })
    }

    #[test]
    fn winning_move_short_circuits_the_search() {
        let agent = instant_agent();
        let action = agent.choose_move(&TakeAway::new(3)).unwrap();
        assert_eq!(action, TakeAwayMove::Take { count: 3, label: 0 });
    }

    #[test]
    fn flagged_conceding_move_is_played_as_is() {
        let agent = instant_agent();
        let game = TakeAway::with_rules(10, 3, 1, true);
        let action = agent.choose_move(&game).unwrap();
        assert_eq!(action, TakeAwayMove::Concede);
    }

    #[test]
    fn zero_budget_still_yields_a_legal_move() {
        let agent = instant_agent();
        let game = TakeAway::new(10);
        let action = agent.choose_move(&game).unwrap();
        assert!(game.actions().contains(&action));
    }

    #[test]
    fn later_turns_use_the_regular_budget_path() {
        let agent = instant_agent();
        let mut game = TakeAway::new(10);
        game.advance(TakeAwayMove::Take { count: 1, label: 0 }).unwrap();
        assert_eq!(game.turn_index(), 1);
        let action = agent.choose_move(&game).unwrap();
        assert!(game.actions().contains(&action));
    }

    #[test]
    fn a_decided_position_is_an_error() {
        let agent = instant_agent();
        let mut game = TakeAway::new(2);
        game.advance(TakeAwayMove::Take { count: 2, label: 0 }).unwrap();
        assert!(matches!(
            agent.choose_move(&game),
            Err(SearchError::GameOver)
        ));
    }
}
