//! Single d20 checks and initiative.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// The result of a single d20 check against a difficulty class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct D20Check {
    /// The raw d20 face.
    pub roll: u32,
    /// Flat bonus added to the face.
    pub bonus: i64,
    /// Face plus bonus.
    pub total: i64,
    /// Difficulty class the total was compared against.
    pub difficulty: i64,
    /// Whether the total met the difficulty.
    pub success: bool,
    /// The raw face was a natural 20, regardless of total.
    pub critical_success: bool,
    /// The raw face was a natural 1, regardless of total.
    pub critical_failure: bool,
}

/// Roll a d20 check: `1d20 + bonus` against a difficulty class.
pub fn roll_check(rng: &mut StdRng, bonus: i64, difficulty: i64) -> D20Check {
    let roll: u32 = rng.random_range(1..=20);
    let total = i64::from(roll) + bonus;
    D20Check {
        roll,
        bonus,
        total,
        difficulty,
        success: total >= difficulty,
        critical_success: roll == 20,
        critical_failure: roll == 1,
    }
}

/// The result of an initiative roll.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InitiativeRoll {
    /// The raw d20 face.
    pub roll: u32,
    /// Dexterity modifier applied.
    pub modifier: i64,
    /// Face plus modifier.
    pub total: i64,
}

/// Roll initiative: `1d20 + dexterity modifier`, no target number.
pub fn roll_initiative(rng: &mut StdRng, modifier: i64) -> InitiativeRoll {
    let roll: u32 = rng.random_range(1..=20);
    InitiativeRoll {
        roll,
        modifier,
        total: i64::from(roll) + modifier,
    }
}
