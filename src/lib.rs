#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![doc = include_str!("../README.md")]

/// Module containing player identity and game-outcome types.
pub mod types;

/// Module containing the game adapter traits and the shared search types.
pub mod game_tree_search;

/// Re-exports the `smallvec` crate
pub use smallvec;

/// Re-exports the `rand` crate
pub use rand;

/// Re-exports the `thiserror` crate
pub use thiserror;

pub mod prelude {
    pub use crate::game_tree_search::*;
    pub use crate::types::*;
}
