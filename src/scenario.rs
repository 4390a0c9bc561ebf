//! Combat scenarios.
//!
//! A scenario describes one or more attacking units charging a single
//! defender. Running it produces the hits and wounds of every attacker,
//! their combined wounds and the defender's nerve test.
//!
//! Scenarios are plain data and can be loaded from JSON:
//!
//! ```rust
//! use combat_odds::Scenario;
//!
//! let scenario = Scenario::from_json(r#"{
//!     "attackers": [
//!         { "name": "Spearmen", "attack": 10, "melee": 4 },
//!         { "name": "Knights", "attack": 8, "melee": 3, "elite": true }
//!     ],
//!     "defense": 4,
//!     "defender": { "nerve": { "waver": { "at": 14 }, "rout": 16 } }
//! }"#).unwrap();
//!
//! let report = scenario.run().unwrap();
//! assert!(report.wounds.is_complete());
//! assert_eq!(report.nerve.total(), combat_odds::numeric::one());
//! ```

use crate::combinators::{combine_all, difference};
use crate::dice::{Blast, DicePlusNumber, Threshold};
use crate::distribution::Distribution;
use crate::error::DiceError;
use crate::hits::{hits_table, HitsParams};
use crate::nerve::{nerve_test, Defender, NerveTest};
use crate::reroll::Reroll;
use crate::wounds::{wounds_table, WoundsParams};
use serde::{Deserialize, Serialize};

/// An attacking unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attacker {
    #[serde(default)]
    pub name: String,
    pub attack: u32,
    pub melee: Threshold,
    #[serde(default)]
    pub elite: bool,
    #[serde(default)]
    pub vicious: bool,
    #[serde(default)]
    pub hit_rerolls: Vec<Reroll>,
    #[serde(default)]
    pub wound_rerolls: Vec<Reroll>,
    #[serde(default)]
    pub blast: Option<Blast>,
}

impl Attacker {
    pub fn new(name: impl Into<String>, attack: u32, melee: Threshold) -> Self {
        Self {
            name: name.into(),
            attack,
            melee,
            elite: false,
            vicious: false,
            hit_rerolls: Vec::new(),
            wound_rerolls: Vec::new(),
            blast: None,
        }
    }

    pub fn elite(mut self) -> Self {
        self.elite = true;
        self
    }

    pub fn vicious(mut self) -> Self {
        self.vicious = true;
        self
    }

    pub fn with_hit_reroll(mut self, reroll: Reroll) -> Self {
        self.hit_rerolls.push(reroll);
        self
    }

    pub fn with_wound_reroll(mut self, reroll: Reroll) -> Self {
        self.wound_rerolls.push(reroll);
        self
    }

    pub fn with_blast(mut self, blast: Blast) -> Self {
        self.blast = Some(blast);
        self
    }

    /// Hits parameters for this attacker.
    pub fn hits_params(&self) -> HitsParams {
        HitsParams {
            attack: self.attack,
            melee: self.melee,
            elite: self.elite,
            rerolls: self.hit_rerolls.clone(),
            blast: self.blast,
        }
    }

    /// Hits and wounds of this attacker against `defense`.
    pub fn resolve(&self, defense: Threshold) -> Result<AttackerReport, DiceError> {
        let hits = hits_table(&self.hits_params())?;
        let wounds = wounds_table(&WoundsParams {
            hits: hits.clone(),
            defense,
            vicious: self.vicious,
            rerolls: self.wound_rerolls.clone(),
        })?;
        Ok(AttackerReport {
            name: self.name.clone(),
            hits,
            wounds,
        })
    }
}

/// Several attackers against one defender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub attackers: Vec<Attacker>,
    /// Defense value the attackers roll against to wound.
    pub defense: Threshold,
    pub defender: Defender,
    #[serde(default)]
    pub nerve_modifiers: Vec<DicePlusNumber>,
}

impl Scenario {
    /// Parse and validate a scenario from JSON.
    pub fn from_json(json: &str) -> Result<Self, DiceError> {
        serde_json::from_str(json).map_err(|e| DiceError::InvalidScenario(e.to_string()))
    }

    /// Serialize the scenario to pretty JSON.
    pub fn to_json(&self) -> Result<String, DiceError> {
        serde_json::to_string_pretty(self).map_err(|e| DiceError::InvalidScenario(e.to_string()))
    }

    /// Resolve every attacker, combine their wounds and take the nerve test.
    ///
    /// Attackers roll independently, so their wounds are summed by
    /// convolution. With no attackers the defender takes no wounds.
    pub fn run(&self) -> Result<CombatReport, DiceError> {
        tracing::debug!(
            attackers = self.attackers.len(),
            defense = %self.defense,
            "running scenario"
        );
        let attackers = self
            .attackers
            .iter()
            .map(|attacker| attacker.resolve(self.defense))
            .collect::<Result<Vec<_>, _>>()?;

        let wounds = if attackers.is_empty() {
            Distribution::certain(0)
        } else {
            let tables: Vec<Distribution> =
                attackers.iter().map(|report| report.wounds.clone()).collect();
            combine_all(&tables)
        };
        let nerve = nerve_test(&wounds, &self.defender, &self.nerve_modifiers);

        tracing::debug!(
            max_wounds = ?wounds.max_outcome(),
            rout = %nerve.rout,
            "scenario resolved"
        );
        Ok(CombatReport {
            attackers,
            wounds,
            nerve,
        })
    }
}

/// Hits and wounds of a single attacker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackerReport {
    pub name: String,
    pub hits: Distribution,
    pub wounds: Distribution,
}

/// Result of running a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    pub attackers: Vec<AttackerReport>,
    /// Combined wounds of all attackers.
    pub wounds: Distribution,
    pub nerve: NerveTest,
}

impl CombatReport {
    /// Per-outcome difference between this report's wounds and `other`'s.
    pub fn compare(&self, other: &CombatReport) -> Distribution {
        difference(&self.wounds, &other.wounds)
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self) -> Result<String, DiceError> {
        serde_json::to_string(self).map_err(|e| DiceError::InvalidScenario(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nerve::NerveThresholds;
    use crate::numeric::ratio;

    fn threshold(value: u8) -> Threshold {
        Threshold::new(value).unwrap()
    }

    fn scenario(attackers: Vec<Attacker>) -> Scenario {
        Scenario {
            attackers,
            defense: threshold(4),
            defender: Defender::new(NerveThresholds::new(10, 12)),
            nerve_modifiers: Vec::new(),
        }
    }

    #[test]
    fn test_single_attacker_matches_engines() {
        let report = scenario(vec![Attacker::new("A", 2, threshold(4))])
            .run()
            .unwrap();
        assert_eq!(report.attackers.len(), 1);
        assert_eq!(
            report.wounds,
            Distribution::from_dense(vec![ratio(9, 16), ratio(6, 16), ratio(1, 16)])
        );
        assert_eq!(report.nerve.total(), ratio(1, 1));
    }

    #[test]
    fn test_two_attackers_combine() {
        let report = scenario(vec![
            Attacker::new("A", 1, threshold(4)),
            Attacker::new("B", 1, threshold(4)),
        ])
        .run()
        .unwrap();
        // Each attacker wounds with chance 1/4.
        assert_eq!(
            report.wounds,
            Distribution::from_dense(vec![ratio(9, 16), ratio(6, 16), ratio(1, 16)])
        );
    }

    #[test]
    fn test_no_attackers() {
        let report = scenario(Vec::new()).run().unwrap();
        assert_eq!(report.wounds, Distribution::certain(0));
        assert_eq!(report.nerve.steady, ratio(1, 1));
    }

    #[test]
    fn test_compare_reports() {
        let weak = scenario(vec![Attacker::new("A", 1, threshold(4))]).run().unwrap();
        let strong = scenario(vec![Attacker::new("A", 1, threshold(4)).elite()])
            .run()
            .unwrap();
        let diff = strong.compare(&weak);
        assert_eq!(diff.total(), ratio(0, 1));
        assert!(diff.get(1) > ratio(0, 1));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = Scenario::from_json(
            r#"{"attackers": [{"attack": 5, "melee": 9}], "defense": 4,
                "defender": {"nerve": {"waver": "fearless", "rout": 12}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DiceError::InvalidScenario(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let attacker = Attacker::new("Trolls", 9, threshold(3))
            .with_blast(DicePlusNumber::flat(1))
            .with_wound_reroll(Reroll::up_to(DicePlusNumber::flat(1)));
        let original = scenario(vec![attacker]);
        let json = original.to_json().unwrap();
        assert_eq!(Scenario::from_json(&json).unwrap(), original);
    }
}
