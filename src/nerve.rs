//! Nerve (morale) tests.
//!
//! A unit that took wounds rolls 2d6, adds the wounds and compares the
//! total with its waver and rout values.

use crate::combinators::combine_with;
use crate::dice::DicePlusNumber;
use crate::dice_sum::dice_sum_table;
use crate::distribution::Distribution;
use crate::numeric::{self, serde_probability, Probability};
use serde::{Deserialize, Serialize};

/// Waver value of a unit.
///
/// `{"at": 0}` reads back as [`WaverThreshold::Fearless`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "RawWaverThreshold")]
pub enum WaverThreshold {
    /// Wavers on a total of at least this value.
    At(u32),
    /// Never wavers.
    Fearless,
}

impl From<u32> for WaverThreshold {
    /// A waver value of 0 means the unit is fearless.
    fn from(value: u32) -> Self {
        if value == 0 {
            WaverThreshold::Fearless
        } else {
            WaverThreshold::At(value)
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawWaverThreshold {
    At(u32),
    Fearless,
}

impl From<RawWaverThreshold> for WaverThreshold {
    fn from(raw: RawWaverThreshold) -> Self {
        match raw {
            RawWaverThreshold::At(value) => WaverThreshold::from(value),
            RawWaverThreshold::Fearless => WaverThreshold::Fearless,
        }
    }
}

/// Waver and rout values of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NerveThresholds {
    pub waver: WaverThreshold,
    pub rout: u32,
}

impl NerveThresholds {
    /// A unit that wavers on `waver` and routs on `rout`.
    pub fn new(waver: u32, rout: u32) -> Self {
        Self {
            waver: WaverThreshold::from(waver),
            rout,
        }
    }

    /// A fearless unit that routs on `rout`.
    pub fn fearless(rout: u32) -> Self {
        Self {
            waver: WaverThreshold::Fearless,
            rout,
        }
    }
}

/// The unit taking the nerve test.
///
/// # Examples
///
/// ```rust
/// use combat_odds::{Defender, NerveThresholds};
///
/// let regiment = Defender::new(NerveThresholds::new(14, 16)).inspired();
/// assert!(regiment.inspired);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Defender {
    pub nerve: NerveThresholds,
    /// Rerolls a rout result once.
    #[serde(default)]
    pub inspired: bool,
}

impl Defender {
    pub fn new(nerve: NerveThresholds) -> Self {
        Self {
            nerve,
            inspired: false,
        }
    }

    pub fn inspired(mut self) -> Self {
        self.inspired = true;
        self
    }
}

/// Chances of each nerve test outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NerveTest {
    #[serde(with = "serde_probability")]
    pub steady: Probability,
    #[serde(with = "serde_probability")]
    pub waver: Probability,
    #[serde(with = "serde_probability")]
    pub rout: Probability,
}

impl Default for NerveTest {
    fn default() -> Self {
        Self {
            steady: numeric::zero(),
            waver: numeric::zero(),
            rout: numeric::zero(),
        }
    }
}

impl NerveTest {
    /// Sum of the three outcomes.
    pub fn total(&self) -> Probability {
        &self.steady + &self.waver + &self.rout
    }

    /// Approximate `(steady, waver, rout)` percentages for display.
    pub fn percentages(&self) -> (f64, f64, f64) {
        (
            numeric::percent(&self.steady),
            numeric::percent(&self.waver),
            numeric::percent(&self.rout),
        )
    }

    /// Add `weight` times `other` into this result.
    fn accumulate(&mut self, other: &NerveTest, weight: &Probability) {
        self.steady += weight * &other.steady;
        self.waver += weight * &other.waver;
        self.rout += weight * &other.rout;
    }
}

/// Distribution of the nerve modifier applied to a test.
///
/// Modifiers are alternatives whose worst case applies, so independent
/// rolls are combined with `max`. No modifiers means a modifier of 0.
///
/// # Examples
///
/// ```rust
/// use combat_odds::nerve::nerve_modifier_table;
/// use combat_odds::{DicePlusNumber, Die, Distribution};
/// use combat_odds::numeric::ratio;
///
/// assert_eq!(nerve_modifier_table(&[]), Distribution::certain(0));
///
/// let table = nerve_modifier_table(&[DicePlusNumber::die(Die::D3), DicePlusNumber::flat(2)]);
/// assert_eq!(table.get(2), ratio(2, 3));
/// assert_eq!(table.get(3), ratio(1, 3));
/// ```
pub fn nerve_modifier_table(modifiers: &[DicePlusNumber]) -> Distribution {
    modifiers
        .iter()
        .map(DicePlusNumber::table)
        .reduce(|acc, table| combine_with(&acc, &table, u32::max))
        .unwrap_or_else(|| Distribution::certain(0))
}

/// Chances of each outcome for a unit that has taken `wounds` wounds.
///
/// Double one is always steady. Otherwise a total at or above the rout
/// value routs, and a total at or above the waver value wavers. Double six
/// wavers whenever it does not rout, unless the unit is fearless.
///
/// An inspired unit rerolls a rout once: the result becomes
/// `steady + rout * steady`, `waver + rout * waver` and `rout * rout`.
pub fn nerve_test_with_wounds(wounds: u32, defender: &Defender) -> NerveTest {
    let wounds = i64::from(wounds);
    let to_rout = i64::from(defender.nerve.rout) - wounds;
    let to_waver = match defender.nerve.waver {
        WaverThreshold::At(0) | WaverThreshold::Fearless => None,
        WaverThreshold::At(value) => Some(i64::from(value) - wounds),
    };

    let mut result = NerveTest::default();
    for (roll, chance) in dice_sum_table(2, 6).iter() {
        let roll = i64::from(roll);
        let bucket = if roll == 2 {
            &mut result.steady
        } else if roll >= to_rout {
            &mut result.rout
        } else if to_waver.is_some_and(|to_waver| roll >= to_waver || roll == 12) {
            &mut result.waver
        } else {
            &mut result.steady
        };
        *bucket += chance;
    }

    if defender.inspired {
        let rerolled_steady = &result.rout * &result.steady;
        let rerolled_waver = &result.rout * &result.waver;
        result.steady += rerolled_steady;
        result.waver += rerolled_waver;
        result.rout = &result.rout * &result.rout;
    }
    result
}

/// Nerve test outcome for a wounds distribution.
///
/// No wounds means no test, which counts as steady.
///
/// # Examples
///
/// ```rust
/// use combat_odds::{nerve_test, Defender, Distribution, NerveThresholds};
/// use combat_odds::numeric::ratio;
///
/// let defender = Defender::new(NerveThresholds::new(10, 12));
/// let result = nerve_test(&Distribution::certain(0), &defender, &[]);
/// assert_eq!(result.steady, ratio(1, 1));
/// ```
pub fn nerve_test(
    wounds: &Distribution,
    defender: &Defender,
    modifiers: &[DicePlusNumber],
) -> NerveTest {
    tracing::debug!(
        waver = ?defender.nerve.waver,
        rout = defender.nerve.rout,
        inspired = defender.inspired,
        modifiers = modifiers.len(),
        "computing nerve test"
    );
    let modifier_table = nerve_modifier_table(modifiers);

    let mut result = NerveTest::default();
    for (wound_count, wound_chance) in wounds.iter() {
        if wound_count == 0 {
            result.steady += wound_chance;
            continue;
        }
        for (modifier, modifier_chance) in modifier_table.iter() {
            let test = nerve_test_with_wounds(wound_count.saturating_add(modifier), defender);
            result.accumulate(&test, &(wound_chance * modifier_chance));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Die;
    use crate::numeric::ratio;

    #[test]
    fn test_no_wounds_is_steady() {
        let defender = Defender::new(NerveThresholds::new(10, 12));
        let result = nerve_test(&Distribution::certain(0), &defender, &[]);
        assert_eq!(result.steady, ratio(1, 1));
        assert_eq!(result.waver, ratio(0, 1));
        assert_eq!(result.rout, ratio(0, 1));
    }

    #[test]
    fn test_single_wound() {
        let defender = Defender::new(NerveThresholds::new(10, 12));
        let result = nerve_test_with_wounds(1, &defender);
        assert_eq!(result.steady, ratio(26, 36));
        assert_eq!(result.waver, ratio(7, 36));
        assert_eq!(result.rout, ratio(3, 36));
    }

    #[test]
    fn test_inspired_reroll() {
        let defender = Defender::new(NerveThresholds::new(10, 12)).inspired();
        let result = nerve_test_with_wounds(1, &defender);
        assert_eq!(result.steady, ratio(1014, 1296));
        assert_eq!(result.waver, ratio(273, 1296));
        assert_eq!(result.rout, ratio(9, 1296));
        assert_eq!(result.total(), ratio(1, 1));
    }

    #[test]
    fn test_fearless_never_wavers() {
        let defender = Defender::new(NerveThresholds::fearless(12));
        let result = nerve_test_with_wounds(1, &defender);
        assert_eq!(result.waver, ratio(0, 1));
        assert_eq!(result.rout, ratio(3, 36));
        assert_eq!(result.steady, ratio(33, 36));
    }

    #[test]
    fn test_zero_waver_is_fearless() {
        assert_eq!(NerveThresholds::new(0, 12), NerveThresholds::fearless(12));
    }

    #[test]
    fn test_zero_waver_from_json_is_fearless() {
        let defender: Defender =
            serde_json::from_str(r#"{"nerve": {"waver": {"at": 0}, "rout": 12}}"#).unwrap();
        assert_eq!(defender.nerve.waver, WaverThreshold::Fearless);
        assert_eq!(nerve_test_with_wounds(1, &defender).waver, ratio(0, 1));

        let literal = Defender::new(NerveThresholds {
            waver: WaverThreshold::At(0),
            rout: 12,
        });
        assert_eq!(nerve_test_with_wounds(1, &literal).waver, ratio(0, 1));
    }

    #[test]
    fn test_huge_modifier_routs() {
        let defender = Defender::new(NerveThresholds::new(10, 12));
        let result = nerve_test(
            &Distribution::certain(1),
            &defender,
            &[DicePlusNumber::flat(u32::MAX)],
        );
        assert_eq!(result.steady, ratio(1, 36));
        assert_eq!(result.rout, ratio(35, 36));
    }

    #[test]
    fn test_double_six_wavers() {
        let defender = Defender::new(NerveThresholds::new(20, 20));
        let result = nerve_test_with_wounds(1, &defender);
        assert_eq!(result.waver, ratio(1, 36));
        assert_eq!(result.steady, ratio(35, 36));
        assert_eq!(result.rout, ratio(0, 1));
    }

    #[test]
    fn test_double_one_always_steady() {
        let defender = Defender::new(NerveThresholds::new(1, 2));
        let result = nerve_test_with_wounds(5, &defender);
        assert_eq!(result.steady, ratio(1, 36));
        assert_eq!(result.rout, ratio(35, 36));
    }

    #[test]
    fn test_weighted_by_wounds() {
        let defender = Defender::new(NerveThresholds::new(10, 12));
        let wounds = Distribution::from_dense(vec![ratio(1, 2), ratio(1, 2)]);
        let result = nerve_test(&wounds, &defender, &[]);
        assert_eq!(result.steady, ratio(1, 2) + ratio(13, 36));
        assert_eq!(result.waver, ratio(7, 72));
        assert_eq!(result.rout, ratio(3, 72));
        assert_eq!(result.total(), ratio(1, 1));
    }

    #[test]
    fn test_flat_modifier_adds_wounds() {
        let defender = Defender::new(NerveThresholds::new(10, 12));
        let with_modifier = nerve_test(
            &Distribution::certain(1),
            &defender,
            &[DicePlusNumber::flat(1)],
        );
        assert_eq!(with_modifier, nerve_test_with_wounds(2, &defender));
    }

    #[test]
    fn test_modifier_ignored_without_wounds() {
        let defender = Defender::new(NerveThresholds::new(10, 12));
        let result = nerve_test(
            &Distribution::certain(0),
            &defender,
            &[DicePlusNumber::die(Die::D6)],
        );
        assert_eq!(result.steady, ratio(1, 1));
    }

    #[test]
    fn test_modifier_table_takes_max() {
        let table =
            nerve_modifier_table(&[DicePlusNumber::die(Die::D3), DicePlusNumber::die(Die::D3)]);
        assert_eq!(table.get(1), ratio(1, 9));
        assert_eq!(table.get(2), ratio(3, 9));
        assert_eq!(table.get(3), ratio(5, 9));
        assert!(table.is_complete());
    }

    #[test]
    fn test_serde_round_trip() {
        let defender = Defender::new(NerveThresholds::new(10, 12));
        let result = nerve_test_with_wounds(1, &defender);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"steady":"13/18","waver":"7/36","rout":"1/12"}"#);
        let back: NerveTest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_defender_from_json() {
        let defender: Defender =
            serde_json::from_str(r#"{"nerve": {"waver": "fearless", "rout": 19}}"#).unwrap();
        assert_eq!(defender, Defender::new(NerveThresholds::fearless(19)));

        let defender: Defender = serde_json::from_str(
            r#"{"nerve": {"waver": {"at": 14}, "rout": 16}, "inspired": true}"#,
        )
        .unwrap();
        assert_eq!(defender, Defender::new(NerveThresholds::new(14, 16)).inspired());
    }
}
