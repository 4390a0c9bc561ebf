//! Blast amplification of a hits table.

use crate::dice::Blast;
use crate::dice_sum::dice_sum_table;
use crate::distribution::Distribution;
use crate::error::DiceError;
use crate::numeric::Probability;
use num_traits::Zero;

/// Amplify a hits table: each of the `h` hits rolls the blast die once and
/// adds the flat `plus`, so `h` hits become the sum of `h` blast dice plus
/// `h * plus`.
///
/// Only hit counts `0..=attack` are read from `hits`. The result is dense
/// over `0..=attack * (sides + plus)`. A blast with neither a die nor a
/// bonus turns every hit into nothing and collapses the table to `{0: 1}`.
///
/// Fails with [`DiceError::InvalidParameter`] when `plus` exceeds
/// [`DicePlusNumber::MAX_PLUS`](crate::DicePlusNumber::MAX_PLUS) or the
/// largest outcome does not fit a `u32`.
///
/// # Examples
///
/// ```rust
/// use combat_odds::blast::apply_blast;
/// use combat_odds::{DicePlusNumber, Die, Distribution};
/// use combat_odds::numeric::ratio;
///
/// let one_die = Distribution::from_dense(vec![ratio(1, 2), ratio(1, 2)]);
/// let blasted = apply_blast(&one_die, 1, &DicePlusNumber::die(Die::D3)).unwrap();
/// assert_eq!(blasted.get(0), ratio(1, 2));
/// assert_eq!(blasted.get(3), ratio(1, 6));
/// ```
pub fn apply_blast(
    hits: &Distribution,
    attack: u32,
    blast: &Blast,
) -> Result<Distribution, DiceError> {
    blast.validate("blast")?;
    let sides = blast.sides();
    let top = attack.checked_mul(blast.max_value()).ok_or_else(|| {
        DiceError::invalid(
            "blast",
            format!("{} hits of {} overflow the outcome range", attack, blast),
        )
    })?;
    let mut amplified = vec![Probability::zero(); top as usize + 1];
    amplified[0] = hits.get(0);

    for count in 1..=attack {
        let Some(original) = hits.probability(count) else {
            continue;
        };
        if original.is_zero() {
            continue;
        }
        for (sum, chance) in dice_sum_table(count, sides).iter() {
            let outcome = sum + blast.plus * count;
            amplified[outcome as usize] += original * chance;
        }
    }

    tracing::trace!(attack, blast = %blast, top, "applied blast");
    Ok(Distribution::from_dense(amplified))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{DicePlusNumber, Die};
    use crate::numeric::ratio;

    #[test]
    fn test_oversized_plus_rejected() {
        let blast = DicePlusNumber::flat(u32::MAX);
        let err = apply_blast(&coin(), 3, &blast).unwrap_err();
        assert!(matches!(err, DiceError::InvalidParameter { name: "blast", .. }));
    }

    fn coin() -> Distribution {
        Distribution::from_dense(vec![ratio(1, 2), ratio(1, 2)])
    }

    #[test]
    fn test_d6() {
        let blasted = apply_blast(&coin(), 1, &DicePlusNumber::die(Die::D6)).unwrap();
        assert_eq!(blasted.get(0), ratio(1, 2));
        for outcome in 1..=6 {
            assert_eq!(blasted.get(outcome), ratio(1, 12));
        }
        assert_eq!(blasted.len(), 7);
    }

    #[test]
    fn test_flat_only() {
        let blasted = apply_blast(&coin(), 1, &DicePlusNumber::flat(2)).unwrap();
        assert_eq!(blasted.len(), 3);
        assert_eq!(blasted.get(0), ratio(1, 2));
        assert_eq!(blasted.get(1), ratio(0, 1));
        assert_eq!(blasted.get(2), ratio(1, 2));
    }

    #[test]
    fn test_empty_blast_collapses() {
        let blasted = apply_blast(&coin(), 1, &DicePlusNumber::default()).unwrap();
        assert_eq!(blasted, Distribution::certain(0));
        assert_eq!(blasted.len(), 1);
    }

    #[test]
    fn test_ignores_outcomes_above_attack() {
        let hits = Distribution::from_dense(vec![ratio(1, 4), ratio(1, 4), ratio(1, 2)]);
        let blasted = apply_blast(&hits, 1, &DicePlusNumber::flat(1)).unwrap();
        assert_eq!(blasted.get(0), ratio(1, 4));
        assert_eq!(blasted.get(1), ratio(1, 4));
        assert_eq!(blasted.max_outcome(), Some(1));
    }

    #[test]
    fn test_zero_attack() {
        let blasted =
            apply_blast(&Distribution::certain(0), 0, &DicePlusNumber::die(Die::D6)).unwrap();
        assert_eq!(blasted, Distribution::certain(0));
    }
}
