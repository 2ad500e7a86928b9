use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// Integer cell coordinate on the world grid.
///
/// Also used as a displacement (for instance an ant's orientation), in which
/// case each component is expected to be in `-1..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sign, turning any displacement into a single king move.
    #[inline(always)]
    pub fn signum(self) -> Self {
        Self::new(self.x.signum(), self.y.signum())
    }

    /// Chebyshev (king move) length of a displacement.
    #[inline(always)]
    pub fn king_len(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Position {
        Position::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

/// Shortest signed offset from `from` to `to` along an axis of length `len`
/// that wraps around.
#[inline(always)]
pub fn wrapped_offset(from: i32, to: i32, len: i32) -> i32 {
    let raw = (to - from).rem_euclid(len);
    if raw * 2 > len { raw - len } else { raw }
}

/// The eight king-move directions, clockwise starting north-west.
pub const KING_MOVES: [Position; 8] = [
    Position::new(-1, -1),
    Position::new(0, -1),
    Position::new(1, -1),
    Position::new(1, 0),
    Position::new(1, 1),
    Position::new(0, 1),
    Position::new(-1, 1),
    Position::new(-1, 0),
];
