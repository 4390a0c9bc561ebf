//! Sum of several identical dice.

use crate::distribution::Distribution;
use crate::numeric::Probability;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// Distribution of the sum of `count` dice with faces `1..=sides`.
///
/// The table is dense over `0..=count * sides`; sums below `count` are
/// present with probability zero. With no dice or zero-sided dice the sum
/// is 0 with certainty.
///
/// Numerators are accumulated as integers and divided by `sides^count`
/// once at the end.
///
/// # Examples
///
/// ```rust
/// use combat_odds::dice_sum::dice_sum_table;
/// use combat_odds::numeric::ratio;
///
/// let two_d6 = dice_sum_table(2, 6);
/// assert_eq!(two_d6.get(7), ratio(6, 36));
/// assert_eq!(two_d6.get(2), ratio(1, 36));
/// assert_eq!(two_d6.max_outcome(), Some(12));
/// ```
pub fn dice_sum_table(count: u32, sides: u32) -> Distribution {
    if count == 0 || sides == 0 {
        return Distribution::certain(0);
    }

    let sides_usize = sides as usize;
    let mut numerators: Vec<BigUint> = vec![BigUint::one()];
    for die in 1..=count as usize {
        let mut next = vec![BigUint::zero(); sides_usize * die + 1];
        for (sum, ways) in numerators.iter().enumerate() {
            if ways.is_zero() {
                continue;
            }
            for face in 1..=sides_usize {
                next[sum + face] += ways;
            }
        }
        numerators = next;
    }

    let denominator = BigInt::from(BigUint::from(sides).pow(count));
    let probabilities = numerators
        .into_iter()
        .map(|ways| Probability::new(BigInt::from(ways), denominator.clone()))
        .collect();
    Distribution::from_dense(probabilities)
}
