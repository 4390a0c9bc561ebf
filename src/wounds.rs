//! Rolling to wound.
//!
//! Each hit is rolled again against the defender's defense value, which is
//! the same mechanism as rolling to hit with a pool whose size is drawn
//! from the hits table.

use crate::dice::Threshold;
use crate::distribution::Distribution;
use crate::error::DiceError;
use crate::hits::{single_die_probability, RollConfig};
use crate::reroll::{reroll_mixture, Reroll};

/// Parameters for a wounds table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WoundsParams {
    /// Distribution of hits to roll against the defense.
    pub hits: Distribution,
    /// Roll needed on each die to wound.
    pub defense: Threshold,
    /// Natural ones are rerolled when rolling to wound.
    pub vicious: bool,
    /// Reroll rules applied to the wound roll.
    pub rerolls: Vec<Reroll>,
}

impl WoundsParams {
    /// Roll `hits` against `defense` with no special rules.
    pub fn new(hits: Distribution, defense: Threshold) -> Self {
        Self {
            hits,
            defense,
            vicious: false,
            rerolls: Vec::new(),
        }
    }

    /// Mark the wound roll as vicious.
    pub fn vicious(mut self) -> Self {
        self.vicious = true;
        self
    }

    /// Add a reroll rule to the wound roll.
    pub fn with_reroll(mut self, reroll: Reroll) -> Self {
        self.rerolls.push(reroll);
        self
    }
}

/// Distribution of the number of wounds.
///
/// For every hit count `h` the wound roll is a fresh hits computation with
/// `h` dice, weighted by the chance of `h` hits.
///
/// # Examples
///
/// ```rust
/// use combat_odds::{hits_table, wounds_table, HitsParams, Threshold, WoundsParams};
/// use combat_odds::numeric::ratio;
///
/// let four_plus = Threshold::new(4).unwrap();
/// let hits = hits_table(&HitsParams::new(2, four_plus)).unwrap();
/// let wounds = wounds_table(&WoundsParams::new(hits, four_plus)).unwrap();
///
/// assert_eq!(wounds.get(0), ratio(9, 16));
/// assert_eq!(wounds.get(1), ratio(6, 16));
/// assert_eq!(wounds.get(2), ratio(1, 16));
/// ```
pub fn wounds_table(params: &WoundsParams) -> Result<Distribution, DiceError> {
    tracing::debug!(
        defense = %params.defense,
        vicious = params.vicious,
        rerolls = params.rerolls.len(),
        max_hits = ?params.hits.max_outcome(),
        "computing wounds table"
    );
    for reroll in &params.rerolls {
        reroll.amount.validate("reroll")?;
    }
    let config = RollConfig {
        probability: single_die_probability(params.defense, params.vicious),
        rerolls: reroll_mixture(&params.rerolls),
        blast: None,
    };

    let mut wounds = Distribution::new();
    for (hits, hits_chance) in params.hits.iter() {
        for (count, p) in config.roll(hits)?.iter() {
            wounds.add_mass(count, hits_chance * p);
        }
    }
    Ok(wounds)
}
