//! Combining and comparing distribution tables.

use crate::distribution::Distribution;
use crate::numeric::Probability;

/// Distribution of the sum of two independent outcomes.
///
/// Every pair of outcomes `(a, b)` contributes `p(a) * p(b)` to `a + b`.
///
/// # Examples
///
/// ```rust
/// use combat_odds::combinators::combine;
/// use combat_odds::Distribution;
/// use combat_odds::numeric::ratio;
///
/// let coin = Distribution::from_dense(vec![ratio(1, 2), ratio(1, 2)]);
/// let two_coins = combine(&coin, &coin);
/// assert_eq!(two_coins, Distribution::from_dense(vec![ratio(1, 4), ratio(2, 4), ratio(1, 4)]));
/// ```
pub fn combine(a: &Distribution, b: &Distribution) -> Distribution {
    combine_with(a, b, u32::saturating_add)
}

/// Combine any number of independent tables by summing their outcomes.
///
/// No tables gives an empty table and a single table is returned as is.
pub fn combine_all(tables: &[Distribution]) -> Distribution {
    match tables.split_first() {
        None => Distribution::new(),
        Some((first, rest)) => rest
            .iter()
            .fold(first.clone(), |acc, table| combine(&acc, table)),
    }
}

/// Pointwise `a[k] - b[k]` for every `k` from 0 to the highest outcome in
/// either table.
///
/// The result is a comparison aid, not a distribution: it sums to zero
/// when both inputs are complete and may hold negative values.
///
/// # Examples
///
/// ```rust
/// use combat_odds::combinators::difference;
/// use combat_odds::Distribution;
/// use combat_odds::numeric::ratio;
///
/// let a = Distribution::from_dense(vec![ratio(3, 4), ratio(1, 4)]);
/// let b = Distribution::from_dense(vec![ratio(1, 2), ratio(1, 2)]);
/// let diff = difference(&a, &b);
/// assert_eq!(diff.get(0), ratio(1, 4));
/// assert_eq!(diff.get(1), ratio(-1, 4));
/// ```
pub fn difference(a: &Distribution, b: &Distribution) -> Distribution {
    let top = match (a.max_outcome(), b.max_outcome()) {
        (None, None) => return Distribution::new(),
        (x, y) => x.max(y).unwrap_or(0),
    };
    let probabilities: Vec<Probability> = (0..=top).map(|k| a.get(k) - b.get(k)).collect();
    Distribution::from_dense(probabilities)
}

/// Combine two independent tables, mapping each outcome pair through `merge`.
pub(crate) fn combine_with<F>(a: &Distribution, b: &Distribution, merge: F) -> Distribution
where
    F: Fn(u32, u32) -> u32,
{
    let mut combined = Distribution::new();
    for (outcome_a, p_a) in a.iter() {
        for (outcome_b, p_b) in b.iter() {
            combined.add_mass(merge(outcome_a, outcome_b), p_a * p_b);
        }
    }
    combined
}
