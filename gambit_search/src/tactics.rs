use gambit::prelude::*;

/// First candidate whose aftermath declares the side to move the winner, if
/// any. `moves` is expected to be the deduplicated legal-move list for
/// `position`.
pub fn immediate_win<G: Game>(
    position: &G,
    moves: &[G::Action],
) -> Result<Option<G::Action>, SearchError> {
    scan(position, moves, Winner::Player(position.to_move()))
}

/// First candidate whose own aftermath declares the *opponent* the winner, if
/// any: the game's mandatory post-move adjustment can finish the opponent's
/// line for them. Callers decide what to do with such a move; this function
/// only reports it.
pub fn immediate_loss<G: Game>(
    position: &G,
    moves: &[G::Action],
) -> Result<Option<G::Action>, SearchError> {
    scan(position, moves, Winner::Player(position.to_move().opposite()))
}

fn scan<G: Game>(
    position: &G,
    moves: &[G::Action],
    target: Winner,
) -> Result<Option<G::Action>, SearchError> {
    for &action in moves {
        let mut next = position.clone();
        next.advance(action).map_err(|e| SearchError::rejected(action, e))?;
        if next.winner() == Some(target) {
            return Ok(Some(action));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::trim_transpositions;
    use crate::testing::{TakeAway, TakeAwayMove};

    fn trimmed(game: &TakeAway) -> Vec<TakeAwayMove> {
        trim_transpositions(game, game.actions()).unwrap().into_vec()
    }

    #[test]
    fn finds_the_winning_take() {
        let game = TakeAway::new(3);
        let moves = trimmed(&game);
        let found = immediate_win(&game, &moves).unwrap();
        assert_eq!(found, Some(TakeAwayMove::Take { count: 3, label: 0 }));
    }

    #[test]
    fn reports_no_win_when_the_pile_is_too_big() {
        let game = TakeAway::new(5);
        let moves = trimmed(&game);
        assert_eq!(immediate_win(&game, &moves).unwrap(), None);
    }

    #[test]
    fn finds_the_conceding_move() {
        let game = TakeAway::with_rules(10, 3, 1, true);
        let moves = trimmed(&game);
        let found = immediate_loss(&game, &moves).unwrap();
        assert_eq!(found, Some(TakeAwayMove::Concede));
    }

    #[test]
    fn reports_no_concession_without_one() {
        let game = TakeAway::new(10);
        let moves = trimmed(&game);
        assert_eq!(immediate_loss(&game, &moves).unwrap(), None);
    }

    #[test]
    fn original_position_is_untouched() {
        let game = TakeAway::new(3);
        let moves = trimmed(&game);
        let _ = immediate_win(&game, &moves).unwrap();
        assert_eq!(game.winner(), None);
        assert_eq!(game.turn_index(), 0);
    }
}
