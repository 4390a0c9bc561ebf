//! Probability distribution tables.
//!
//! A [`Distribution`] maps a non-negative outcome count (hits, wounds,
//! rerolled dice, ...) to an exact probability. Every engine returns a
//! freshly built table; none modifies its input.

use crate::numeric::{self, Probability};
use num_traits::Zero;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// An ordered map from outcome count to exact probability.
///
/// Missing outcomes have probability zero, and equality treats an explicit
/// zero entry the same as a missing one.
///
/// # Examples
///
/// ```rust
/// use combat_odds::Distribution;
/// use combat_odds::numeric::ratio;
///
/// let coin: Distribution = vec![(0, ratio(1, 2)), (1, ratio(1, 2))].into_iter().collect();
///
/// assert_eq!(coin.get(1), ratio(1, 2));
/// assert_eq!(coin.get(7), ratio(0, 1));
/// assert!(coin.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Distribution {
    entries: BTreeMap<u32, Probability>,
}

impl Distribution {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table where `outcome` happens with certainty.
    pub fn certain(outcome: u32) -> Self {
        let mut table = Self::new();
        table.entries.insert(outcome, numeric::one());
        table
    }

    /// Build a dense table from probabilities indexed by outcome.
    ///
    /// Zero entries are kept so the table still spans `0..len`.
    pub fn from_dense(probabilities: Vec<Probability>) -> Self {
        let entries = (0u32..).zip(probabilities).collect();
        Self { entries }
    }

    /// Probability of `outcome`, zero if absent.
    pub fn get(&self, outcome: u32) -> Probability {
        self.entries
            .get(&outcome)
            .cloned()
            .unwrap_or_else(Probability::zero)
    }

    /// Stored probability of `outcome`, if the table has a bucket for it.
    pub fn probability(&self, outcome: u32) -> Option<&Probability> {
        self.entries.get(&outcome)
    }

    /// Add probability mass to the bucket for `outcome`.
    pub fn add_mass(&mut self, outcome: u32, mass: Probability) {
        *self
            .entries
            .entry(outcome)
            .or_insert_with(Probability::zero) += mass;
    }

    /// Iterate `(outcome, probability)` pairs in ascending outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Probability)> + '_ {
        self.entries.iter().map(|(outcome, p)| (*outcome, p))
    }

    /// Number of buckets, including explicit zero buckets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no buckets at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest outcome with a bucket.
    pub fn max_outcome(&self) -> Option<u32> {
        self.entries.keys().next_back().copied()
    }

    /// Sum of every bucket.
    pub fn total(&self) -> Probability {
        self.entries
            .values()
            .fold(Probability::zero(), |acc, p| acc + p)
    }

    /// Returns true if the buckets sum to exactly one.
    pub fn is_complete(&self) -> bool {
        self.total() == numeric::one()
    }

    /// Mean outcome, `sum(outcome * probability)`.
    pub fn expected_value(&self) -> Probability {
        self.entries
            .iter()
            .fold(Probability::zero(), |acc, (outcome, p)| {
                acc + Probability::from_integer((*outcome).into()) * p
            })
    }

    /// Probability of an outcome of at least `outcome`.
    pub fn at_least(&self, outcome: u32) -> Probability {
        self.entries
            .range(outcome..)
            .fold(Probability::zero(), |acc, (_, p)| acc + p)
    }

    /// Approximate `(outcome, percent)` pairs for display.
    pub fn percentages(&self) -> Vec<(u32, f64)> {
        self.iter()
            .map(|(outcome, p)| (outcome, numeric::percent(p)))
            .collect()
    }
}

impl PartialEq for Distribution {
    fn eq(&self, other: &Self) -> bool {
        let nonzero = |(_, p): &(&u32, &Probability)| !p.is_zero();
        self.entries
            .iter()
            .filter(nonzero)
            .eq(other.entries.iter().filter(nonzero))
    }
}

impl Eq for Distribution {}

impl FromIterator<(u32, Probability)> for Distribution {
    /// Collect pairs, summing the probabilities of repeated outcomes.
    fn from_iter<I: IntoIterator<Item = (u32, Probability)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (outcome, p) in iter {
            table.add_mass(outcome, p);
        }
        table
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (outcome, p) in self.iter() {
            writeln!(f, "{:>4}: {:>8.3}%  ({})", outcome, numeric::percent(p), p)?;
        }
        Ok(())
    }
}

impl Serialize for Distribution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (outcome, p) in &self.entries {
            map.serialize_entry(outcome, &p.to_string())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<u32, String>::deserialize(deserializer)?;
        let mut entries = BTreeMap::new();
        for (outcome, text) in raw {
            let p = numeric::parse_probability(&text).map_err(D::Error::custom)?;
            entries.insert(outcome, p);
        }
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::ratio;

    fn coin() -> Distribution {
        vec![(0, ratio(1, 2)), (1, ratio(1, 2))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_certain() {
        let table = Distribution::certain(0);
        assert_eq!(table.get(0), ratio(1, 1));
        assert_eq!(table.len(), 1);
        assert!(table.is_complete());
    }

    #[test]
    fn test_from_iter_accumulates() {
        let table: Distribution = vec![(2, ratio(1, 4)), (2, ratio(1, 4)), (0, ratio(1, 2))]
            .into_iter()
            .collect();
        assert_eq!(table.get(2), ratio(1, 2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_equality_ignores_zero_buckets() {
        let dense = Distribution::from_dense(vec![ratio(1, 2), ratio(0, 1), ratio(1, 2)]);
        let sparse: Distribution = vec![(0, ratio(1, 2)), (2, ratio(1, 2))]
            .into_iter()
            .collect();
        assert_eq!(dense, sparse);
        assert_eq!(dense.len(), 3);
        assert_ne!(dense, coin());

        let padded = Distribution::from_dense(vec![ratio(1, 2), ratio(1, 2), ratio(0, 1)]);
        assert_eq!(padded, coin());
        assert_ne!(Distribution::certain(1), Distribution::new());
    }

    #[test]
    fn test_max_outcome() {
        assert_eq!(Distribution::new().max_outcome(), None);
        assert_eq!(coin().max_outcome(), Some(1));
    }

    #[test]
    fn test_expected_value_and_at_least() {
        let table = Distribution::from_dense(vec![ratio(1, 4), ratio(1, 2), ratio(1, 4)]);
        assert_eq!(table.expected_value(), ratio(1, 1));
        assert_eq!(table.at_least(1), ratio(3, 4));
        assert_eq!(table.at_least(0), ratio(1, 1));
        assert_eq!(table.at_least(3), ratio(0, 1));
    }

    #[test]
    fn test_incomplete_table() {
        let table: Distribution = vec![(0, ratio(1, 3))].into_iter().collect();
        assert!(!table.is_complete());
    }

    #[test]
    fn test_serde_json() {
        let table = Distribution::from_dense(vec![ratio(2, 6), ratio(4, 6)]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"0":"1/3","1":"2/3"}"#);

        let back: Distribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_serde_rejects_garbage() {
        assert!(serde_json::from_str::<Distribution>(r#"{"0":"half"}"#).is_err());
    }

    #[test]
    fn test_display() {
        let display = coin().to_string();
        assert!(display.contains("50.000%"));
        assert!(display.contains("(1/2)"));
    }
}
