//! Reroll modifiers and the distribution of how many dice get rerolled.

use crate::combinators::combine;
use crate::dice::DicePlusNumber;
use crate::distribution::Distribution;
use serde::{Deserialize, Serialize};

/// A reroll rule such as "reroll up to D3 dice" or "reroll one die".
///
/// `only_ones` marks rules limited to natural ones. It is kept as part of
/// the rule for callers that display or persist it; the engine rolls the
/// rerolled dice the same way in both cases.
///
/// # Examples
///
/// ```rust
/// use combat_odds::{DicePlusNumber, Die, Reroll};
///
/// let up_to_d3 = Reroll::up_to(DicePlusNumber::die(Die::D3));
/// assert!(!up_to_d3.only_ones);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reroll {
    /// How many dice may be rerolled.
    pub amount: DicePlusNumber,
    /// Whether only natural ones may be rerolled.
    #[serde(default)]
    pub only_ones: bool,
}

impl Reroll {
    /// Reroll up to `amount` failed dice.
    pub fn up_to(amount: DicePlusNumber) -> Self {
        Self {
            amount,
            only_ones: false,
        }
    }

    /// Reroll up to `amount` dice showing a natural one.
    pub fn ones(amount: DicePlusNumber) -> Self {
        Self {
            amount,
            only_ones: true,
        }
    }
}

/// Joint distribution of the total number of dice that will be rerolled.
///
/// Each rule contributes independently, so their tables are summed by
/// convolution. No rules means no rerolls, with certainty.
///
/// # Examples
///
/// ```rust
/// use combat_odds::reroll::reroll_mixture;
/// use combat_odds::{DicePlusNumber, Distribution, Reroll};
///
/// assert_eq!(reroll_mixture(&[]), Distribution::certain(0));
///
/// let two = reroll_mixture(&[
///     Reroll::up_to(DicePlusNumber::flat(1)),
///     Reroll::up_to(DicePlusNumber::flat(1)),
/// ]);
/// assert_eq!(two, Distribution::certain(2));
/// ```
pub fn reroll_mixture(rerolls: &[Reroll]) -> Distribution {
    let mixture = rerolls
        .iter()
        .map(|reroll| reroll.amount.table())
        .reduce(|acc, table| combine(&acc, &table))
        .unwrap_or_else(|| Distribution::certain(0));
    tracing::trace!(
        rules = rerolls.len(),
        outcomes = mixture.len(),
        "built reroll mixture"
    );
    mixture
}
