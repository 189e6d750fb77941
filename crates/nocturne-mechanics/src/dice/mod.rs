//! Dice rolling for both rule regimes.
//!
//! The pool system rolls d10s partitioned into normal and hunger dice
//! and counts successes; the legacy system rolls d20 checks and
//! `NdS±M` expressions. Every roll takes a caller-supplied [`StdRng`]
//! so outcomes are reproducible under a fixed seed, and every result is
//! an immutable value object the caller may serialize for journaling.

pub mod check;
pub mod expression;
pub mod pool;

pub use check::{D20Check, InitiativeRoll, roll_check, roll_initiative};
pub use expression::{DiceExpression, ExpressionRoll};
pub use pool::{PoolRoll, RouseCheck, WillpowerRoll, roll_pool, roll_willpower, rouse_check};

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// The category of a die within a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceCategory {
    /// A standard pool die.
    Normal,
    /// A hunger die — triggers messy criticals and bestial failures.
    Hunger,
}

impl std::fmt::Display for DiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Hunger => write!(f, "hunger"),
        }
    }
}

/// Count pool successes over a set of d10 faces.
///
/// A face of 6 or higher scores one success; a 10 scores one more on
/// top of that (two total). The rule is identical for normal and
/// hunger dice.
pub fn count_successes(faces: &[u32]) -> u32 {
    faces
        .iter()
        .map(|&face| match face {
            10 => 2,
            6..=9 => 1,
            _ => 0,
        })
        .sum()
}

/// Count how many faces show a 10.
pub fn count_tens(faces: &[u32]) -> u32 {
    faces.iter().filter(|&&face| face == 10).count() as u32
}

/// Roll `count` ten-sided dice.
pub(crate) fn roll_d10s(rng: &mut StdRng, count: u32) -> Vec<u32> {
    (0..count).map(|_| rng.random_range(1..=10)).collect()
}
