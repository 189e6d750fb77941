//! Pool rolls, rouse checks, and willpower rolls.
//!
//! A pool is attribute dots plus skill dots, rolled as d10s. Hunger
//! converts that many dice into hunger dice, capped at the pool size.
//! Specials are evaluated over the whole pool after rolling:
//!
//! - **Critical**: at least two 10s anywhere in the pool; fixes the
//!   total at four successes.
//! - **Messy critical**: a critical while hunger dice were in the pool.
//! - **Bestial failure**: zero raw successes while a hunger die shows 1.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{DiceCategory, count_successes, count_tens, roll_d10s};

/// Total successes awarded by a critical, overriding the raw count.
const CRITICAL_SUCCESSES: u32 = 4;

/// The result of rolling a dice pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolRoll {
    /// Attribute dots contributed to the pool.
    pub attribute: i64,
    /// Skill dots contributed to the pool.
    pub skill: i64,
    /// Number of dice rolled (0 when the pool was invalid).
    pub pool_size: u32,
    /// Successes required to pass.
    pub difficulty: u32,
    /// Hunger level at the time of the roll.
    pub hunger: u32,
    /// Faces rolled on normal dice.
    pub normal: Vec<u32>,
    /// Faces rolled on hunger dice.
    pub hunger_dice: Vec<u32>,
    /// Raw success count before the critical override.
    pub successes: u32,
    /// Final success count (fixed at four on a critical).
    pub total_successes: u32,
    /// Two or more 10s were rolled.
    pub critical: bool,
    /// Critical with hunger dice in the pool.
    pub messy_critical: bool,
    /// Zero successes with a 1 on a hunger die.
    pub bestial_failure: bool,
    /// Whether `total_successes` met the difficulty.
    pub success: bool,
    /// The requested pool had no dice. Callers must check this flag;
    /// an invalid pool is not an error.
    pub invalid_pool: bool,
}

impl PoolRoll {
    /// Classify already-rolled faces. `roll_pool` uses this after
    /// drawing from the RNG; it is also the replay path for callers
    /// that record raw faces.
    pub fn from_faces(
        attribute: i64,
        skill: i64,
        difficulty: u32,
        hunger: u32,
        normal: Vec<u32>,
        hunger_dice: Vec<u32>,
    ) -> Self {
        let successes = count_successes(&normal) + count_successes(&hunger_dice);
        let tens = count_tens(&normal) + count_tens(&hunger_dice);
        let critical = tens >= 2;
        let messy_critical = critical && !hunger_dice.is_empty();
        let bestial_failure = successes == 0 && hunger_dice.contains(&1);
        let total_successes = if critical {
            CRITICAL_SUCCESSES
        } else {
            successes
        };
        let pool_size = (normal.len() + hunger_dice.len()) as u32;

        Self {
            attribute,
            skill,
            pool_size,
            difficulty,
            hunger,
            normal,
            hunger_dice,
            successes,
            total_successes,
            critical,
            messy_critical,
            bestial_failure,
            success: total_successes >= difficulty,
            invalid_pool: false,
        }
    }

    /// A flagged zero-result for a pool with no dice.
    fn invalid(attribute: i64, skill: i64, difficulty: u32, hunger: u32) -> Self {
        Self {
            attribute,
            skill,
            pool_size: 0,
            difficulty,
            hunger,
            normal: Vec::new(),
            hunger_dice: Vec::new(),
            successes: 0,
            total_successes: 0,
            critical: false,
            messy_critical: false,
            bestial_failure: false,
            success: false,
            invalid_pool: true,
        }
    }

    /// All faces rolled with their category, normal dice first.
    pub fn all_faces(&self) -> impl Iterator<Item = (DiceCategory, u32)> + '_ {
        self.normal
            .iter()
            .map(|&face| (DiceCategory::Normal, face))
            .chain(
                self.hunger_dice
                    .iter()
                    .map(|&face| (DiceCategory::Hunger, face)),
            )
    }
}

/// Roll a dice pool of `attribute + skill` d10s against a difficulty.
///
/// Hunger dice are `min(hunger, pool)`; the remainder are normal dice,
/// so a hunger level above the pool size simply makes every die a
/// hunger die. A pool of zero or fewer dice returns a result with
/// [`PoolRoll::invalid_pool`] set rather than an error.
pub fn roll_pool(
    rng: &mut StdRng,
    attribute: i64,
    skill: i64,
    difficulty: u32,
    hunger: u32,
) -> PoolRoll {
    let pool = attribute + skill;
    if pool <= 0 {
        return PoolRoll::invalid(attribute, skill, difficulty, hunger);
    }
    let pool_size = pool as u32;
    let hunger_count = hunger.min(pool_size);
    let normal_count = pool_size - hunger_count;

    let normal = roll_d10s(rng, normal_count);
    let hunger_dice = roll_d10s(rng, hunger_count);
    PoolRoll::from_faces(attribute, skill, difficulty, hunger, normal, hunger_dice)
}

/// The result of a rouse check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RouseCheck {
    /// The d10 face rolled.
    pub roll: u32,
    /// Whether the check succeeded (face of 6 or higher).
    pub success: bool,
    /// Hunger gained (1 on failure, 0 on success).
    pub hunger_change: u32,
    /// Hunger level after the check.
    pub new_hunger: u32,
}

/// Roll a rouse check: one d10, success on 6+, failure raises hunger
/// by one. This operation cannot fail.
pub fn rouse_check(rng: &mut StdRng, hunger: u32) -> RouseCheck {
    let roll = roll_d10s(rng, 1)[0];
    let success = roll >= 6;
    let hunger_change = u32::from(!success);
    RouseCheck {
        roll,
        success,
        hunger_change,
        new_hunger: hunger + hunger_change,
    }
}

/// The result of a willpower roll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WillpowerRoll {
    /// Willpower dots the character has.
    pub dots: u32,
    /// Dice actually rolled (dots capped at three).
    pub dice_rolled: u32,
    /// The faces rolled.
    pub rolls: Vec<u32>,
    /// Raw success count before the critical override.
    pub successes: u32,
    /// Final success count (fixed at four on a critical).
    pub total_successes: u32,
    /// Two or more 10s were rolled.
    pub critical: bool,
}

/// Roll willpower dice. Willpower rolls are capped at three dice
/// regardless of dots, and willpower dice are never hunger dice, so
/// only the critical special applies.
pub fn roll_willpower(rng: &mut StdRng, dots: u32) -> WillpowerRoll {
    let dice_rolled = dots.min(3);
    let rolls = roll_d10s(rng, dice_rolled);
    let successes = count_successes(&rolls);
    let critical = count_tens(&rolls) >= 2;
    let total_successes = if critical {
        CRITICAL_SUCCESSES
    } else {
        successes
    };
    WillpowerRoll {
        dots,
        dice_rolled,
        rolls,
        successes,
        total_successes,
        critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn empty_pool_is_flagged_not_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let roll = roll_pool(&mut rng, 0, 0, 2, 1);
        assert!(roll.invalid_pool);
        assert_eq!(roll.pool_size, 0);
        assert_eq!(roll.total_successes, 0);
        assert!(!roll.success);
        assert!(!roll.critical && !roll.messy_critical && !roll.bestial_failure);
    }

    #[test]
    fn negative_trait_sum_is_flagged() {
        let mut rng = StdRng::seed_from_u64(1);
        let roll = roll_pool(&mut rng, -3, 1, 2, 0);
        assert!(roll.invalid_pool);
    }

    #[test]
    fn pool_partition_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        let roll = roll_pool(&mut rng, 3, 2, 2, 2);
        assert!(!roll.invalid_pool);
        assert_eq!(roll.pool_size, 5);
        assert_eq!(roll.normal.len(), 3);
        assert_eq!(roll.hunger_dice.len(), 2);
    }

    #[test]
    fn hunger_above_pool_converts_every_die() {
        let mut rng = StdRng::seed_from_u64(7);
        let roll = roll_pool(&mut rng, 1, 1, 2, 5);
        assert!(roll.normal.is_empty());
        assert_eq!(roll.hunger_dice.len(), 2);
        assert_eq!(roll.pool_size, 2);
    }

    #[test]
    fn critical_fixes_total_at_four() {
        let roll = PoolRoll::from_faces(3, 2, 2, 0, vec![10, 10, 10, 9, 8], vec![]);
        assert!(roll.critical);
        assert_eq!(roll.successes, 8);
        assert_eq!(roll.total_successes, 4);
        assert!(roll.success);
        assert!(!roll.messy_critical);
    }

    #[test]
    fn messy_critical_requires_hunger_dice_present() {
        let messy = PoolRoll::from_faces(2, 2, 2, 1, vec![10, 3, 2], vec![10]);
        assert!(messy.critical);
        assert!(messy.messy_critical);

        // Same tens, but no hunger dice in the pool.
        let clean = PoolRoll::from_faces(2, 2, 2, 0, vec![10, 10, 3, 2], vec![]);
        assert!(clean.critical);
        assert!(!clean.messy_critical);
    }

    #[test]
    fn bestial_failure_needs_a_one_on_hunger() {
        let bestial = PoolRoll::from_faces(2, 1, 2, 2, vec![3], vec![1, 4]);
        assert_eq!(bestial.successes, 0);
        assert!(bestial.bestial_failure);

        // A 1 on a normal die is just a miss.
        let plain = PoolRoll::from_faces(2, 1, 2, 1, vec![1, 3], vec![4]);
        assert!(!plain.bestial_failure);

        // Any success suppresses bestial failure.
        let saved = PoolRoll::from_faces(2, 1, 2, 2, vec![7], vec![1, 2]);
        assert!(!saved.bestial_failure);
    }

    #[test]
    fn ten_counts_double_toward_difficulty() {
        let roll = PoolRoll::from_faces(1, 1, 3, 0, vec![10, 6], vec![]);
        assert_eq!(roll.total_successes, 3);
        assert!(roll.success);
    }

    #[test]
    fn failure_below_difficulty() {
        let roll = PoolRoll::from_faces(2, 2, 3, 0, vec![6, 6, 2, 1], vec![]);
        assert_eq!(roll.total_successes, 2);
        assert!(!roll.success);
    }

    #[test]
    fn rouse_check_failure_raises_hunger() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let check = rouse_check(&mut rng, 2);
            assert!((1..=10).contains(&check.roll));
            assert_eq!(check.success, check.roll >= 6);
            if check.success {
                assert_eq!(check.new_hunger, 2);
            } else {
                assert_eq!(check.new_hunger, 3);
            }
        }
    }

    #[test]
    fn willpower_caps_at_three_dice() {
        let mut rng = StdRng::seed_from_u64(11);
        let roll = roll_willpower(&mut rng, 5);
        assert_eq!(roll.dots, 5);
        assert_eq!(roll.dice_rolled, 3);
        assert_eq!(roll.rolls.len(), 3);

        let mut rng = StdRng::seed_from_u64(11);
        let small = roll_willpower(&mut rng, 1);
        assert_eq!(small.dice_rolled, 1);
    }

    #[test]
    fn all_faces_tags_both_categories() {
        let roll = PoolRoll::from_faces(1, 1, 2, 1, vec![4], vec![9]);
        let faces: Vec<(DiceCategory, u32)> = roll.all_faces().collect();
        assert_eq!(
            faces,
            vec![(DiceCategory::Normal, 4), (DiceCategory::Hunger, 9)]
        );
    }

    proptest! {
        #[test]
        fn pool_roll_invariants(
            attribute in -1i64..=5,
            skill in 0i64..=5,
            difficulty in 0u32..=7,
            hunger in 0u32..=5,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let roll = roll_pool(&mut rng, attribute, skill, difficulty, hunger);

            if attribute + skill <= 0 {
                prop_assert!(roll.invalid_pool);
                prop_assert_eq!(roll.total_successes, 0);
            } else {
                prop_assert!(!roll.invalid_pool);
                prop_assert_eq!(
                    (roll.normal.len() + roll.hunger_dice.len()) as u32,
                    roll.pool_size
                );
                prop_assert!(roll.all_faces().all(|(_, f)| (1..=10).contains(&f)));
                // Critical fixes the total at four; otherwise raw count stands.
                if roll.critical {
                    prop_assert_eq!(roll.total_successes, 4);
                } else {
                    prop_assert_eq!(roll.total_successes, roll.successes);
                }
                // Messy criticals never occur without a critical.
                if roll.messy_critical {
                    prop_assert!(roll.critical);
                }
                // No hunger dice, no bestial failure.
                if hunger == 0 {
                    prop_assert!(!roll.bestial_failure);
                    prop_assert!(!roll.messy_critical);
                }
                prop_assert_eq!(roll.success, roll.total_successes >= difficulty);
            }
        }

        #[test]
        fn willpower_invariants(dots in 0u32..=10, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let roll = roll_willpower(&mut rng, dots);
            prop_assert_eq!(roll.dice_rolled, dots.min(3));
            if roll.critical {
                prop_assert_eq!(roll.total_successes, 4);
            } else {
                prop_assert_eq!(roll.total_successes, roll.successes);
            }
        }
    }
}
