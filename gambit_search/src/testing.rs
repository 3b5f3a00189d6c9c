//! A tiny take-away game for exercising the engine in tests.
//!
//! Players alternately remove 1..=`max_take` tokens from a pile; whoever
//! empties it wins. Two knobs make it awkward in exactly the ways the engine
//! has to cope with: `duplicates` emits several identically-behaving labelled
//! copies of each take (transpositions for the deduplicator), and
//! `with_concession` adds a move whose aftermath awards the game to the
//! opponent (the tactical scanner's second check).

use gambit::prelude::*;

#[derive(Debug, Clone)]
pub(crate) struct TakeAway {
    pile: u8,
    max_take: u8,
    duplicates: u8,
    with_concession: bool,
    to_move: PlayerId,
    turn: u32,
    winner: Option<Winner>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum TakeAwayMove {
    /// Remove `count` tokens; `label` distinguishes otherwise identical
    /// copies of the same take.
    Take { count: u8, label: u8 },
    /// Ends the game in the opponent's favor.
    Concede,
}

impl TakeAway {
    pub(crate) fn new(pile: u8) -> Self {
        Self::with_rules(pile, 3, 1, false)
    }

    pub(crate) fn with_rules(pile: u8, max_take: u8, duplicates: u8, with_concession: bool) -> Self {
        Self {
            pile,
            max_take,
            duplicates,
            with_concession,
            to_move: PlayerId::PlayerFirst,
            turn: 0,
            winner: None,
        }
    }
}

impl CanonicalState for TakeAway {
    fn canonical_key(&self) -> StateKey {
        // Labels are deliberately absent: positions reached through different
        // copies of the same take collide.
        let winner_bits: u64 = match self.winner {
            None => 0,
            Some(Winner::Player(PlayerId::PlayerFirst)) => 1,
            Some(Winner::Player(PlayerId::PlayerSecond)) => 2,
            Some(Winner::Draw) => 3,
        };
        (u64::from(self.pile) << 8) | ((self.to_move as u64) << 2) | winner_bits
    }
}

impl Game for TakeAway {
    type Action = TakeAwayMove;
    type Actions = Vec<TakeAwayMove>;
    type Error = String;

    fn winner(&self) -> Option<Winner> {
        self.winner
    }

    fn to_move(&self) -> PlayerId {
        self.to_move
    }

    fn turn_index(&self) -> u32 {
        self.turn
    }

    fn actions(&self) -> Vec<TakeAwayMove> {
        if self.winner.is_some() {
            return Vec::new();
        }
        let mut moves = Vec::new();
        for count in 1..=self.max_take.min(self.pile) {
            for label in 0..self.duplicates {
                moves.push(TakeAwayMove::Take { count, label });
            }
        }
        if self.with_concession && self.pile > 0 {
            moves.push(TakeAwayMove::Concede);
        }
        moves
    }

    fn advance(&mut self, action: TakeAwayMove) -> Result<(), String> {
        if self.winner.is_some() {
            return Err("game already decided".to_string());
        }
        match action {
            TakeAwayMove::Take { count, .. } => {
                if count == 0 || count > self.max_take.min(self.pile) {
                    return Err(format!("illegal take of {count} from {}", self.pile));
                }
                self.pile -= count;
                if self.pile == 0 {
                    self.winner = Some(Winner::Player(self.to_move));
                }
            }
            TakeAwayMove::Concede => {
                if !self.with_concession {
                    return Err("concession not allowed".to_string());
                }
                self.winner = Some(Winner::Player(self.to_move.opposite()));
            }
        }
        self.to_move = self.to_move.opposite();
        self.turn += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptying_the_pile_wins() {
        let mut game = TakeAway::new(3);
        game.advance(TakeAwayMove::Take { count: 3, label: 0 }).unwrap();
        assert_eq!(game.winner(), Some(Winner::Player(PlayerId::PlayerFirst)));
        assert!(game.actions().is_empty());
    }

    #[test]
    fn conceding_awards_the_opponent() {
        let mut game = TakeAway::with_rules(5, 3, 1, true);
        game.advance(TakeAwayMove::Concede).unwrap();
        assert_eq!(game.winner(), Some(Winner::Player(PlayerId::PlayerSecond)));
    }

    #[test]
    fn labels_do_not_reach_the_canonical_key() {
        let base = TakeAway::with_rules(5, 3, 2, false);
        let mut a = base.clone();
        let mut b = base.clone();
        a.advance(TakeAwayMove::Take { count: 2, label: 0 }).unwrap();
        b.advance(TakeAwayMove::Take { count: 2, label: 1 }).unwrap();
        assert_eq!(a.canonical_key(), b.canonical_key());

        let mut c = base;
        c.advance(TakeAwayMove::Take { count: 1, label: 0 }).unwrap();
        assert_ne!(a.canonical_key(), c.canonical_key());
    }
}
