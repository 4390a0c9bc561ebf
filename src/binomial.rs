//! Successes among independent dice.
//!
//! The primitive behind every "how many of N dice succeed" question.

use crate::distribution::Distribution;
use crate::error::DiceError;
use crate::numeric::{self, Probability};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// Exact binomial coefficient `C(n, k)`.
///
/// Uses the multiplicative formula `C(n, i + 1) = C(n, i) * (n - i) / (i + 1)`.
/// Each division must be exact; a remainder means the arithmetic went wrong
/// and is reported as [`DiceError::ArithmeticInvariantViolation`].
///
/// # Examples
///
/// ```rust
/// use combat_odds::binomial::binomial_coefficient;
/// use num_bigint::BigUint;
///
/// assert_eq!(binomial_coefficient(5, 2).unwrap(), BigUint::from(10u32));
/// assert_eq!(binomial_coefficient(3, 4).unwrap(), BigUint::from(0u32));
/// ```
pub fn binomial_coefficient(n: u32, k: u32) -> Result<BigUint, DiceError> {
    if k > n {
        return Ok(BigUint::zero());
    }
    let k = k.min(n - k);
    let mut coefficient = BigUint::one();
    for i in 0..k {
        coefficient *= BigUint::from(n - i);
        let divisor = BigUint::from(i + 1);
        if !(&coefficient % &divisor).is_zero() {
            return Err(DiceError::ArithmeticInvariantViolation(format!(
                "C({}, {}) is not an integer at step {}",
                n,
                k,
                i + 1
            )));
        }
        coefficient /= divisor;
    }
    Ok(coefficient)
}

/// Chance of exactly `successes` out of `dice` rolls, each succeeding
/// with probability `p`.
///
/// `C(dice, successes) * p^successes * (1 - p)^(dice - successes)`
pub fn success_probability(
    dice: u32,
    p: &Probability,
    successes: u32,
) -> Result<Probability, DiceError> {
    check_probability(p)?;
    if successes > dice {
        return Ok(numeric::zero());
    }
    let misses = dice - successes;
    let miss = numeric::one() - p;
    let coefficient =
        Probability::from_integer(BigInt::from(binomial_coefficient(dice, successes)?));
    let hits_term = num_traits::pow(p.clone(), successes as usize);
    let misses_term = num_traits::pow(miss, misses as usize);
    Ok(coefficient * hits_term * misses_term)
}

/// Distribution of the number of successes among `dice` rolls, over
/// `0..=dice`.
///
/// # Examples
///
/// ```rust
/// use combat_odds::binomial::success_table;
/// use combat_odds::numeric::ratio;
///
/// let table = success_table(2, &ratio(3, 6)).unwrap();
/// assert_eq!(table.get(0), ratio(1, 4));
/// assert_eq!(table.get(1), ratio(1, 2));
/// assert_eq!(table.get(2), ratio(1, 4));
/// ```
pub fn success_table(dice: u32, p: &Probability) -> Result<Distribution, DiceError> {
    check_probability(p)?;
    let probabilities = (0..=dice)
        .map(|successes| success_probability(dice, p, successes))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Distribution::from_dense(probabilities))
}

fn check_probability(p: &Probability) -> Result<(), DiceError> {
    if numeric::is_probability(p) {
        Ok(())
    } else {
        Err(DiceError::invalid(
            "success probability",
            format!("expected a value in [0, 1], got {}", p),
        ))
    }
}
