//! Rolling to hit.
//!
//! Rerolls are modeled as extra dice rolled alongside the attack pool:
//! with `r` rerolls the engine rolls `attack + r` dice at the same chance
//! and folds every result above `attack` back down to `attack`, since
//! rerolled dice can never produce more hits than dice were rolled.
//! Blast amplification is applied after that fold, so blasted results
//! are never clamped.

use crate::blast::apply_blast;
use crate::binomial::success_table;
use crate::dice::{Blast, Threshold};
use crate::distribution::Distribution;
use crate::error::DiceError;
use crate::numeric::{ratio, Probability};
use crate::reroll::{reroll_mixture, Reroll};
use serde::{Deserialize, Serialize};

/// Parameters for a hits table.
///
/// # Examples
///
/// ```rust
/// use combat_odds::{hits_table, DicePlusNumber, Die, HitsParams, Threshold};
///
/// let params = HitsParams::new(10, Threshold::new(4).unwrap())
///     .elite()
///     .with_blast(DicePlusNumber::die(Die::D3));
/// let table = hits_table(&params).unwrap();
/// assert!(table.is_complete());
/// assert_eq!(table.max_outcome(), Some(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitsParams {
    /// Number of attack dice.
    pub attack: u32,
    /// Roll needed on each die.
    pub melee: Threshold,
    /// Natural ones are rerolled.
    #[serde(default)]
    pub elite: bool,
    /// Reroll rules applied to the attack.
    #[serde(default)]
    pub rerolls: Vec<Reroll>,
    /// Blast rule. An empty blast still amplifies; `None` skips it.
    #[serde(default)]
    pub blast: Option<Blast>,
}

impl HitsParams {
    /// A plain attack with no special rules.
    pub fn new(attack: u32, melee: Threshold) -> Self {
        Self {
            attack,
            melee,
            elite: false,
            rerolls: Vec::new(),
            blast: None,
        }
    }

    /// Mark the attack as elite.
    pub fn elite(mut self) -> Self {
        self.elite = true;
        self
    }

    /// Add a reroll rule.
    pub fn with_reroll(mut self, reroll: Reroll) -> Self {
        self.rerolls.push(reroll);
        self
    }

    /// Set the blast rule.
    pub fn with_blast(mut self, blast: Blast) -> Self {
        self.blast = Some(blast);
        self
    }

    /// Chance of a single die hitting, including the elite adjustment.
    pub fn hit_probability(&self) -> Probability {
        single_die_probability(self.melee, self.elite)
    }
}

/// Chance of one die meeting `threshold`.
///
/// Rerolling natural ones is modeled as scaling the chance by 7/6.
pub(crate) fn single_die_probability(threshold: Threshold, reroll_ones: bool) -> Probability {
    let base = threshold.success_probability();
    if reroll_ones {
        base * ratio(7, 6)
    } else {
        base
    }
}

/// How a pool of dice is rolled: per-die chance, reroll mixture and an
/// optional blast.
pub(crate) struct RollConfig<'a> {
    pub probability: Probability,
    pub rerolls: Distribution,
    pub blast: Option<&'a Blast>,
}

impl RollConfig<'_> {
    /// Distribution of successes for a pool of `attack` dice.
    pub fn roll(&self, attack: u32) -> Result<Distribution, DiceError> {
        let mut table = Distribution::new();
        for (reroll_count, reroll_chance) in self.rerolls.iter() {
            let extra = attack.min(reroll_count);
            let rolled = success_table(attack + extra, &self.probability)?;
            let mut successes: Distribution = rolled
                .iter()
                .map(|(count, p)| (count.min(attack), p.clone()))
                .collect();
            if let Some(blast) = self.blast {
                successes = apply_blast(&successes, attack, blast)?;
            }
            for (count, p) in successes.iter() {
                table.add_mass(count, reroll_chance * p);
            }
        }
        Ok(table)
    }
}

/// Distribution of the number of hits for an attack.
///
/// # Examples
///
/// ```rust
/// use combat_odds::{hits_table, DicePlusNumber, HitsParams, Reroll, Threshold};
/// use combat_odds::numeric::ratio;
///
/// let params = HitsParams::new(2, Threshold::new(4).unwrap())
///     .with_reroll(Reroll::up_to(DicePlusNumber::flat(1)));
/// let table = hits_table(&params).unwrap();
/// assert_eq!(table.get(0), ratio(1, 8));
/// assert_eq!(table.get(1), ratio(3, 8));
/// assert_eq!(table.get(2), ratio(4, 8));
/// ```
pub fn hits_table(params: &HitsParams) -> Result<Distribution, DiceError> {
    tracing::debug!(
        attack = params.attack,
        melee = %params.melee,
        elite = params.elite,
        rerolls = params.rerolls.len(),
        blast = params.blast.is_some(),
        "computing hits table"
    );
    for reroll in &params.rerolls {
        reroll.amount.validate("reroll")?;
    }
    let config = RollConfig {
        probability: params.hit_probability(),
        rerolls: reroll_mixture(&params.rerolls),
        blast: params.blast.as_ref(),
    };
    config.roll(params.attack)
}
