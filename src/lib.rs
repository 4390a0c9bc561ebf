//! # combat-odds - Exact Dice Odds for Wargame Combat
//!
//! Computes exact probability tables for a dice-based melee:
//! - **Hits** from a pool of attack dice, with elite, rerolls and blast
//! - **Wounds** from rolling those hits against a defense value
//! - **Nerve** (steady / waver / rout) from the wounds a unit takes
//!
//! All probabilities are exact rationals; every complete table sums to
//! exactly one.
//!
//! ## Core Concepts
//!
//! ### Table Pipeline
//!
//! ```text
//! [HitsParams] → hits_table → [Distribution]
//!                                   ↓
//!                             wounds_table → [Distribution] → nerve_test → [NerveTest]
//! ```
//!
//! 1. **Primitives**: binomial success tables and dice-sum convolution
//! 2. **Modifiers**: rerolls become extra dice, blast amplifies each hit
//! 3. **Wounds** reuse the hit roll with the defense value and a random pool
//! 4. **Nerve** rolls 2d6 plus wounds against the defender's thresholds
//!
//! ## Example
//!
//! ```rust
//! use combat_odds::*;
//! use combat_odds::numeric::ratio;
//!
//! let four_plus = Threshold::new(4).unwrap();
//!
//! let hits = hits_table(&HitsParams::new(2, four_plus)).unwrap();
//! assert_eq!(hits.get(2), ratio(1, 4));
//!
//! let wounds = wounds_table(&WoundsParams::new(hits, four_plus)).unwrap();
//! assert_eq!(wounds.get(0), ratio(9, 16));
//!
//! let defender = Defender::new(NerveThresholds::new(10, 12));
//! let nerve = nerve_test(&wounds, &defender, &[]);
//! assert_eq!(nerve.total(), ratio(1, 1));
//! ```
//!
//! ## Modules
//!
//! - [`numeric`] - Exact probability type and display helpers
//! - [`dice`] - Thresholds, dice and dice-plus-number values
//! - [`distribution`] - Probability distribution tables
//! - [`dice_sum`] - Sum of several identical dice
//! - [`binomial`] - Successes among independent dice
//! - [`reroll`] - Reroll rules and reroll-count mixtures
//! - [`blast`] - Blast amplification
//! - [`hits`] - Hits tables
//! - [`wounds`] - Wounds tables
//! - [`combinators`] - Combining and comparing tables
//! - [`nerve`] - Nerve tests
//! - [`scenario`] - Multi-attacker combat scenarios
//! - [`error`] - Error types

pub mod binomial;
pub mod blast;
pub mod combinators;
pub mod dice;
pub mod dice_sum;
pub mod distribution;
pub mod error;
pub mod hits;
pub mod nerve;
pub mod numeric;
pub mod reroll;
pub mod scenario;
pub mod wounds;

// Re-export main types for convenience
pub use dice::{Blast, DicePlusNumber, Die, Threshold};
pub use distribution::Distribution;
pub use error::DiceError;
pub use numeric::Probability;

// Re-export the engines
pub use combinators::{combine, combine_all, difference};
pub use hits::{hits_table, HitsParams};
pub use nerve::{nerve_test, Defender, NerveTest, NerveThresholds, WaverThreshold};
pub use reroll::Reroll;
pub use scenario::{Attacker, AttackerReport, CombatReport, Scenario};
pub use wounds::{wounds_table, WoundsParams};
