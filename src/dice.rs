//! Dice model.
//!
//! Thresholds for the six-sided attack die, the D3/D6 dice used by blast
//! and modifiers, and the "roll a die and add a number" value that rerolls,
//! blasts and nerve modifiers are expressed in.

use crate::distribution::Distribution;
use crate::error::DiceError;
use crate::numeric::{ratio, Probability};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A die that can appear in a modifier or blast value.
///
/// # Examples
///
/// ```rust
/// use combat_odds::Die;
///
/// assert_eq!(Die::D3.sides(), 3);
/// assert_eq!(Die::try_from(6u32).unwrap(), Die::D6);
/// assert!(Die::try_from(4u32).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Die {
    /// Three-sided die (faces 1..=3).
    D3,
    /// Six-sided die (faces 1..=6).
    D6,
}

impl Die {
    /// Number of faces on this die.
    pub fn sides(self) -> u32 {
        match self {
            Die::D3 => 3,
            Die::D6 => 6,
        }
    }
}

impl TryFrom<u32> for Die {
    type Error = DiceError;

    fn try_from(sides: u32) -> Result<Self, Self::Error> {
        match sides {
            3 => Ok(Die::D3),
            6 => Ok(Die::D6),
            other => Err(DiceError::invalid(
                "die",
                format!("expected 3 or 6 sides, got {}", other),
            )),
        }
    }
}

impl From<Die> for u32 {
    fn from(die: Die) -> Self {
        die.sides()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.sides())
    }
}

/// A roll target on the six-sided attack die, 2+ through 6+.
///
/// Used both as the melee value of an attacker and the defense value
/// of a defender.
///
/// # Examples
///
/// ```rust
/// use combat_odds::Threshold;
/// use combat_odds::numeric::ratio;
///
/// let melee = Threshold::new(4).unwrap();
/// assert_eq!(melee.success_probability(), ratio(1, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 6;

    /// Create a threshold, rejecting anything outside 2..=6.
    pub fn new(value: u8) -> Result<Self, DiceError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Threshold(value))
        } else {
            Err(DiceError::invalid(
                "threshold",
                format!("expected {}..={}, got {}", Self::MIN, Self::MAX, value),
            ))
        }
    }

    /// The raw roll target.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Chance that a single D6 meets or beats this threshold: `(7 - t) / 6`.
    pub fn success_probability(self) -> Probability {
        ratio(7 - i64::from(self.0), 6)
    }
}

impl TryFrom<u8> for Threshold {
    type Error = DiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Threshold::new(value)
    }
}

impl From<Threshold> for u8 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+", self.0)
    }
}

/// "Roll a die and add a number", or just "add a number".
///
/// Rerolls ("reroll up to D3 dice"), blasts ("Blast D3+1") and nerve
/// modifiers all take this shape.
///
/// # Examples
///
/// ```rust
/// use combat_odds::{DicePlusNumber, Die};
///
/// let up_to_one = DicePlusNumber::flat(1);
/// let d3_plus_one = DicePlusNumber::die_plus(Die::D3, 1);
///
/// assert_eq!(up_to_one.max_value(), 1);
/// assert_eq!(d3_plus_one.max_value(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDicePlusNumber")]
pub struct DicePlusNumber {
    /// Optional die rolled once.
    pub dice: Option<Die>,
    /// Flat amount added to the roll.
    pub plus: u32,
}

impl DicePlusNumber {
    /// Largest flat amount accepted by [`DicePlusNumber::validate`].
    pub const MAX_PLUS: u32 = 100;

    /// A flat value with no die.
    pub fn flat(plus: u32) -> Self {
        Self { dice: None, plus }
    }

    /// A bare die roll.
    pub fn die(die: Die) -> Self {
        Self {
            dice: Some(die),
            plus: 0,
        }
    }

    /// A die roll plus a flat amount.
    pub fn die_plus(die: Die, plus: u32) -> Self {
        Self {
            dice: Some(die),
            plus,
        }
    }

    /// Side count of the die, 0 when there is none.
    pub fn sides(&self) -> u32 {
        self.dice.map_or(0, Die::sides)
    }

    /// Largest value this can produce.
    pub fn max_value(&self) -> u32 {
        self.sides().saturating_add(self.plus)
    }

    /// Reject a flat amount above [`DicePlusNumber::MAX_PLUS`].
    ///
    /// `name` identifies the rule in the error.
    pub fn validate(&self, name: &'static str) -> Result<(), DiceError> {
        if self.plus > Self::MAX_PLUS {
            return Err(DiceError::invalid(
                name,
                format!("plus must be at most {}, got {}", Self::MAX_PLUS, self.plus),
            ));
        }
        Ok(())
    }

    /// Distribution of the value.
    ///
    /// With a die, each of `plus + 1 ..= plus + sides` has chance
    /// `1 / sides`. Without one the value is `plus` with certainty.
    pub fn table(&self) -> Distribution {
        match self.dice {
            Some(die) => {
                let sides = die.sides();
                (1..=sides)
                    .map(|face| (face.saturating_add(self.plus), ratio(1, i64::from(sides))))
                    .collect()
            }
            None => Distribution::certain(self.plus),
        }
    }
}

impl fmt::Display for DicePlusNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.dice, self.plus) {
            (Some(die), 0) => write!(f, "{}", die),
            (Some(die), plus) => write!(f, "{}+{}", die, plus),
            (None, plus) => write!(f, "{}", plus),
        }
    }
}

/// Wire form of [`DicePlusNumber`], checked on the way in.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawDicePlusNumber {
    dice: Option<Die>,
    plus: u32,
}

impl TryFrom<RawDicePlusNumber> for DicePlusNumber {
    type Error = DiceError;

    fn try_from(raw: RawDicePlusNumber) -> Result<Self, Self::Error> {
        let value = DicePlusNumber {
            dice: raw.dice,
            plus: raw.plus,
        };
        value.validate("plus")?;
        Ok(value)
    }
}

/// Blast amplification: every hit rolls the die once and adds `plus`.
pub type Blast = DicePlusNumber;
