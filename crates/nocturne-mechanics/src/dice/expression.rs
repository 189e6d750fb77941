//! Legacy dice expressions of the form `NdS`, `NdS+M`, or `NdS-M`.
//!
//! Expressions arrive as externally supplied text, so parsing is the
//! one dice operation that fails with a typed error instead of a
//! flagged result. The whole string must parse; trailing garbage is
//! rejected.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// A parsed dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpression {
    /// Number of dice to roll (at least 1).
    pub count: u32,
    /// Sides per die (at least 1).
    pub sides: u32,
    /// Flat modifier added to the summed faces.
    pub modifier: i32,
}

impl DiceExpression {
    /// Roll the expression with the given RNG.
    pub fn roll(&self, rng: &mut StdRng) -> ExpressionRoll {
        let rolls: Vec<u32> = (0..self.count)
            .map(|_| rng.random_range(1..=self.sides))
            .collect();
        let total = rolls.iter().map(|&r| i64::from(r)).sum::<i64>() + i64::from(self.modifier);
        ExpressionRoll {
            expression: self.to_string(),
            rolls,
            modifier: self.modifier,
            total,
        }
    }
}

impl FromStr for DiceExpression {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        let parse_err = || MechError::InvalidExpression(s.to_string());

        let text: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        let (count_str, rest) = text.split_once('d').ok_or_else(parse_err)?;
        let count: u32 = count_str.parse().map_err(|_| parse_err())?;

        let (sides_str, modifier) = match rest.find(['+', '-']) {
            Some(idx) => {
                let (sides_str, modifier_str) = rest.split_at(idx);
                let modifier: i32 = modifier_str.parse().map_err(|_| parse_err())?;
                (sides_str, modifier)
            }
            None => (rest, 0),
        };
        let sides: u32 = sides_str.parse().map_err(|_| parse_err())?;

        if count == 0 || sides == 0 {
            return Err(parse_err());
        }
        Ok(Self {
            count,
            sides,
            modifier,
        })
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// The result of rolling a dice expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionRoll {
    /// Canonical form of the expression rolled.
    pub expression: String,
    /// Individual die faces.
    pub rolls: Vec<u32>,
    /// Flat modifier applied.
    pub modifier: i32,
    /// Summed faces plus modifier.
    pub total: i64,
}
