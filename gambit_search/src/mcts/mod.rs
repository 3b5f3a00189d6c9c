use instant::Instant;

use atree::{Arena, Token};

use gambit::prelude::*;
use gambit::rand::{thread_rng, Rng};
use gambit::smallvec::SmallVec;

use crate::dedup::trim_transpositions;

pub mod debug;

mod node;
pub use node::*;

/// Search cap applied when the caller set no limits at all.
const DEFAULT_MAX_TIME_MS: u128 = 600_000;

/// Tunable constants for one engine instance.
///
/// `exploration` and `reward_increment` are coupled: the exploitation term of
/// [`uct_score`] averages `reward_increment`-sized credits, so rescaling one
/// without the other shifts the balance between exploitation and the
/// `exploration * sqrt(ln N / v)` term. `decisive_score` is the magnitude at
/// which a node's score saturates.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MctsConfig {
    pub exploration: f64,
    pub reward_increment: f64,
    pub decisive_score: f64,
    pub limits: Option<SearchLimits>,
    pub debug: bool,
}

impl MctsConfig {
    pub const STANDARD: Self = Self {
        exploration: std::f64::consts::SQRT_2,
        reward_increment: 200.0,
        decisive_score: i32::MAX as f64,
        limits: None,
        debug: false,
    };
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Anytime Monte-Carlo tree search over a [`Game`] adapter.
///
/// Each call to [`GameTreeSearch::search`] roots a fresh tree at the given
/// position and drops it when the chosen move is returned; nothing is carried
/// across calls.
#[derive(Debug)]
pub struct Mcts<G: Game> {
    pub config: MctsConfig,
    tree: Arena<NodeData<G>>,
    root: Option<Token>,
}

impl<G: Game> Mcts<G> {
    pub fn new(config: MctsConfig) -> Self {
        Self {
            config,
            tree: Arena::new(),
            root: None,
        }
    }

    fn init(&mut self, position: &G) -> Result<Token, SearchError> {
        if position.winner().is_some() {
            return Err(SearchError::GameOver);
        }
        let (tree, root) = Arena::with_data(NodeData::root(position.clone()));
        self.tree = tree;
        self.root = Some(root);
        Ok(root)
    }

    #[inline]
    fn node(&self, token: Token) -> &atree::Node<NodeData<G>> {
        self.tree.get(token).expect("token must belong to this tree")
    }

    /// Descend from `start` along maximal-UCT children until reaching a node
    /// with no children, pushing every visited child onto `path`.
    fn select(&self, start: Token, path: &mut Vec<Token>) -> Token {
        let mut current = start;
        while let Some(next) = self.best_uct_child(current) {
            path.push(next);
            current = next;
        }
        current
    }

    /// Child with the highest UCT score; the first of tied maxima wins.
    fn best_uct_child(&self, token: Token) -> Option<Token> {
        let parent = self.node(token);
        let parent_visits = parent.data.visits;
        let mut best = None;
        let mut best_score = f64::MIN;
        for child in parent.children(&self.tree) {
            let score = uct_score(
                child.data.visits,
                child.data.score,
                parent_visits,
                self.config.exploration,
            );
            if score > best_score {
                best_score = score;
                best = Some(child.token());
            }
        }
        best
    }

    /// Attach one child per surviving deduplicated legal move. A position
    /// that already has an outcome is left childless: it is a true leaf of
    /// the game, not merely an unvisited one.
    fn expand(&mut self, token: Token) -> Result<u64, SearchError> {
        debug_assert!(self.node(token).is_leaf());
        let parent = self.node(token);
        if parent.data.state.winner().is_some() {
            return Ok(0);
        }
        let state = parent.data.state.clone();
        let owner = state.to_move();
        let moves = trim_transpositions(&state, state.actions())?;
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let mut appended = 0;
        for action in moves {
            let mut next = state.clone();
            next.advance(action).map_err(|e| SearchError::rejected(action, e))?;
            let _ = token.append(&mut self.tree, NodeData::child(next, action, owner));
            appended += 1;
        }
        Ok(appended)
    }

    /// Uniformly random child, if any.
    fn random_child(&self, token: Token) -> Option<Token> {
        let children: SmallVec<[Token; 16]> =
            self.node(token).children_tokens(&self.tree).collect();
        if children.is_empty() {
            return None;
        }
        let mut rng = thread_rng();
        Some(children[rng.gen_range(0..children.len())])
    }

    /// Play uniformly random deduplicated moves on a private clone of the
    /// node's state until the game ends. Returns the number of moves played
    /// and the outcome. The tree itself is never touched.
    fn rollout(&self, token: Token) -> Result<(u64, Winner), SearchError> {
        let mut game = self.node(token).data.state.clone();
        let mut rng = thread_rng();
        let mut steps = 0;
        loop {
            if let Some(winner) = game.winner() {
                return Ok((steps, winner));
            }
            let moves = trim_transpositions(&game, game.actions())?;
            if moves.is_empty() {
                return Err(SearchError::NoLegalMoves);
            }
            let action = moves[rng.gen_range(0..moves.len())];
            game.advance(action).map_err(|e| SearchError::rejected(action, e))?;
            steps += 1;
        }
    }

    /// Walk the selection path root-ward. Every node on the path gets its
    /// visit counted; nodes owned by the winner get the reward as well, in
    /// the same pass.
    fn backpropagate(&mut self, path: &[Token], winner: Winner) {
        let MctsConfig {
            reward_increment,
            decisive_score,
            ..
        } = self.config;
        for &token in path.iter().rev() {
            let data = &mut self
                .tree
                .get_mut(token)
                .expect("path token must be live")
                .data;
            data.visits += 1;
            if winner.is_player(data.owner) {
                data.add_reward(reward_increment, decisive_score);
            }
        }
    }

    /// One full select/expand/rollout/backpropagate pass. Returns the number
    /// of states visited.
    fn iteration(&mut self, root: Token) -> Result<u64, SearchError> {
        let mut path = Vec::with_capacity(8);
        path.push(root);
        let selected = self.select(root, &mut path);
        let expanded = self.expand(selected)?;
        let simulate_from = match self.random_child(selected) {
            Some(child) => {
                path.push(child);
                child
            }
            None => selected,
        };
        let (steps, winner) = self.rollout(simulate_from)?;
        self.backpropagate(&path, winner);
        Ok(1 + expanded + steps)
    }

    /// Move on the most-visited child; ties resolve to the first child in
    /// iteration order, no children (or no visited child) to `None`.
    fn best_visited_child(&self, token: Token) -> Option<G::Action> {
        let mut best = None;
        let mut best_visits = 0;
        for child in self.node(token).children(&self.tree) {
            if child.data.visits > best_visits {
                best_visits = child.data.visits;
                best = child.data.action;
            }
        }
        best
    }

    /// Uniformly random deduplicated legal move: the last-resort guarantee
    /// that a decision always produces output.
    pub fn fallback_move(&self, position: &G) -> Result<G::Action, SearchError> {
        let moves = trim_transpositions(position, position.actions())?;
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let mut rng = thread_rng();
        Ok(moves[rng.gen_range(0..moves.len())])
    }
}

impl<G: Game> GameTreeSearch<G> for Mcts<G> {
    /// Repeat selection, expansion, rollout and backpropagation until the
    /// configured limits expire, then return the most-visited root child's
    /// move. The limit check sits between iterations: an iteration in flight
    /// always completes, and the first iteration always runs even when the
    /// budget is already spent.
    fn search(&mut self, position: &G) -> Result<SearchResult<G>, SearchError> {
        let t0 = Instant::now();
        let limits = self.config.limits.unwrap_or(SearchLimits {
            max_time_ms: Some(DEFAULT_MAX_TIME_MS),
            max_iterations: None,
        });
        let root = self.init(position)?;
        let mut counter = SearchCounter::default();
        let mut last_print = t0;
        loop {
            counter.states_visited += self.iteration(root)?;
            counter.iterations += 1;
            if limits.should_terminate(t0, counter.iterations) {
                break;
            }
            if self.config.debug && last_print.elapsed().as_millis() >= 500 {
                last_print = Instant::now();
                println!("  {}", counter.summary(t0.elapsed().as_nanos()));
            }
        }

        let action = match self.best_visited_child(root) {
            Some(action) => action,
            None => self.fallback_move(position)?,
        };
        if self.config.debug {
            self.print_tree(root, 0, 2, 1);
            println!(
                "- chosen {action:?} ({})",
                counter.summary(t0.elapsed().as_nanos())
            );
        }
        Ok(SearchResult { action, counter })
    }
}
