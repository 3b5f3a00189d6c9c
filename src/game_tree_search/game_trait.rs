use std::fmt::Debug;

use crate::types::{PlayerId, StateKey, Winner};

/// Positions that can report a canonical form of themselves as a hash value.
///
/// The key must ignore any detail that does not affect play (move history,
/// labelling of equivalent moves), so that transpositions collide.
pub trait CanonicalState {
    fn canonical_key(&self) -> StateKey;
}

/// The game state adapter consumed by the search engine.
///
/// The engine only ever mutates clones it owns; a borrowed position is never
/// modified. Implementations must uphold two contracts the engine relies on:
/// a position with no outcome has at least one legal move, and `advance`
/// accepts every move produced by `actions` on the same position.
pub trait Game: CanonicalState + Debug + Clone {
    type Action: Copy + Clone + Debug + PartialEq + Eq;
    type Actions: IntoIterator<Item = Self::Action>;
    type Error: Debug;

    /// Outcome of the game, or `None` while it is still in progress.
    fn winner(&self) -> Option<Winner>;

    /// The side whose turn it is to play.
    fn to_move(&self) -> PlayerId;

    /// Zero-based move counter for the position; 0 on the opening move.
    fn turn_index(&self) -> u32;

    /// Every legal move from this position.
    fn actions(&self) -> Self::Actions;

    /// Apply a move in place, handing the turn to the opponent (and applying
    /// any mandatory post-move adjustment the rules call for).
    fn advance(&mut self, action: Self::Action) -> Result<(), Self::Error>;
}
