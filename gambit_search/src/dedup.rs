use gambit::prelude::*;
use gambit::smallvec::SmallVec;
use rustc_hash::FxHashSet;

/// Collapse legal moves whose resulting positions are equal under the
/// adapter's canonical form.
///
/// Each move is simulated on a clone; the first move (in enumeration order)
/// that reaches a not-yet-seen canonical key survives, every later move to
/// the same key is dropped. Every position reachable through the original
/// list stays reachable through exactly one surviving move.
pub fn trim_transpositions<G: Game>(
    position: &G,
    moves: impl IntoIterator<Item = G::Action>,
) -> Result<SmallVec<[G::Action; 16]>, SearchError> {
    let mut seen: FxHashSet<StateKey> = FxHashSet::default();
    let mut trimmed = SmallVec::new();
    for action in moves {
        let mut next = position.clone();
        next.advance(action).map_err(|e| SearchError::rejected(action, e))?;
        if seen.insert(next.canonical_key()) {
            trimmed.push(action);
        }
    }
    Ok(trimmed)
}
