use std::fmt::Display;

/// Canonical-form hash of a game position. Two positions that an adapter
/// considers equal must produce the same key.
pub type StateKey = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    #[default]
    PlayerFirst = 0,
    PlayerSecond = 1,
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::PlayerFirst => f.write_fmt(format_args!("P1")),
            PlayerId::PlayerSecond => f.write_fmt(format_args!("P2")),
        }
    }
}

impl PlayerId {
    #[inline]
    pub fn opposite(self) -> PlayerId {
        match self {
            PlayerId::PlayerFirst => PlayerId::PlayerSecond,
            PlayerId::PlayerSecond => PlayerId::PlayerFirst,
        }
    }

    #[inline]
    pub fn select<T>(self, tuple: (T, T)) -> T {
        match self {
            PlayerId::PlayerFirst => tuple.0,
            PlayerId::PlayerSecond => tuple.1,
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winner {
    Player(PlayerId),
    Draw,
}

impl Winner {
    /// True if this outcome is a win for `player_id`. A draw is a win for
    /// nobody.
    #[inline]
    pub fn is_player(self, player_id: PlayerId) -> bool {
        matches!(self, Winner::Player(p) if p == player_id)
    }
}

impl Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Player(p) => write!(f, "{p}"),
            Winner::Draw => f.write_fmt(format_args!("Draw")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for p in [PlayerId::PlayerFirst, PlayerId::PlayerSecond] {
            assert_ne!(p, p.opposite());
            assert_eq!(p, p.opposite().opposite());
        }
    }

    #[test]
    fn draw_is_a_win_for_nobody() {
        assert!(Winner::Player(PlayerId::PlayerFirst).is_player(PlayerId::PlayerFirst));
        assert!(!Winner::Player(PlayerId::PlayerFirst).is_player(PlayerId::PlayerSecond));
        assert!(!Winner::Draw.is_player(PlayerId::PlayerFirst));
        assert!(!Winner::Draw.is_player(PlayerId::PlayerSecond));
    }
}
