use gambit::prelude::*;

/// A single search-tree position with its accumulated statistics.
#[derive(Debug)]
pub struct NodeData<G: Game> {
    pub state: G,
    /// Move that produced this position; `None` at the root.
    pub action: Option<G::Action>,
    /// Side credited by backpropagation: the opponent of the side to move in
    /// `state`, which for a non-root node is the player whose move produced
    /// it. Owners alternate strictly with depth, root included.
    pub owner: PlayerId,
    pub visits: u32,
    pub score: f64,
}

impl<G: Game> NodeData<G> {
    #[inline]
    pub fn root(state: G) -> Self {
        let owner = state.to_move().opposite();
        Self {
            state,
            action: None,
            owner,
            visits: 0,
            score: 0.0,
        }
    }

    #[inline]
    pub fn child(state: G, action: G::Action, owner: PlayerId) -> Self {
        Self {
            state,
            action: Some(action),
            owner,
            visits: 0,
            score: 0.0,
        }
    }

    /// Add a backpropagation reward. Once the score's magnitude reaches
    /// `decisive` it stays there: a proven outcome is not diluted by later
    /// playouts.
    #[inline]
    pub fn add_reward(&mut self, amount: f64, decisive: f64) {
        if self.score.abs() >= decisive {
            return;
        }
        self.score = (self.score + amount).clamp(-decisive, decisive);
    }

    #[inline]
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / f64::from(self.visits)
        }
    }
}

/// Upper confidence bound for a child with `visits` visits and accumulated
/// `score`, under a parent visited `parent_visits` times.
///
/// A never-visited child scores `f64::MAX`, so every child is tried once
/// before any sibling is revisited. Otherwise the score is the average
/// reward plus `exploration * sqrt(ln(parent_visits) / visits)`.
#[inline]
pub fn uct_score(visits: u32, score: f64, parent_visits: u32, exploration: f64) -> f64 {
    if visits == 0 {
        return f64::MAX;
    }
    let v = f64::from(visits);
    score / v + exploration * (f64::from(parent_visits).ln() / v).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TakeAway;
    use proptest::prelude::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn saturated_score_stops_accumulating() {
        let mut node = NodeData::root(TakeAway::new(5));
        node.score = 1000.0;
        node.add_reward(200.0, 1000.0);
        assert_eq!(node.score, 1000.0);

        node.score = 950.0;
        node.add_reward(200.0, 1000.0);
        assert_eq!(node.score, 1000.0);
        node.add_reward(200.0, 1000.0);
        assert_eq!(node.score, 1000.0);
    }

    #[test]
    fn negative_saturation_also_freezes() {
        let mut node = NodeData::root(TakeAway::new(5));
        node.score = -1000.0;
        node.add_reward(200.0, 1000.0);
        assert_eq!(node.score, -1000.0);
    }

    #[test]
    fn root_owner_is_the_opponent_of_the_side_to_move() {
        let game = TakeAway::new(5);
        assert_eq!(game.to_move(), PlayerId::PlayerFirst);
        let node = NodeData::root(game);
        assert_eq!(node.owner, PlayerId::PlayerSecond);
    }

    proptest! {
        #[test]
        fn zero_visits_dominates_any_visited_child(
            visits in 1u32..1_000_000,
            score in -1e9f64..1e9,
            parent_visits in 2u32..1_000_000_000,
        ) {
            let unvisited = uct_score(0, score, parent_visits, SQRT_2);
            prop_assert_eq!(unvisited, f64::MAX);
            prop_assert!(unvisited > uct_score(visits, score, parent_visits, SQRT_2));
        }

        #[test]
        fn fixed_mean_score_is_non_increasing_in_visits(
            visits in 1u32..10_000,
            mean in -1e3f64..1e3,
            parent_visits in 2u32..1_000_000,
        ) {
            let at = |v: u32| uct_score(v, mean * f64::from(v), parent_visits, SQRT_2);
            prop_assert!(at(visits + 1) <= at(visits) + 1e-7);
        }
    }
}
