//! Exact probability values.
//!
//! Every probability in the engine is a `BigRational`: arbitrary precision,
//! always reduced, never rounded. Floating point only shows up in the
//! display helpers at the bottom of this module.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

/// Type alias for exact probabilities.
pub type Probability = BigRational;

/// Build the probability `numer / denom`.
///
/// # Panics
///
/// Panics if `denom` is zero. The engine only passes side counts and
/// other non-zero constants.
///
/// # Examples
///
/// ```rust
/// use combat_odds::numeric::ratio;
///
/// assert_eq!(ratio(2, 6), ratio(1, 3));
/// ```
pub fn ratio(numer: i64, denom: i64) -> Probability {
    Probability::new(BigInt::from(numer), BigInt::from(denom))
}

/// Probability zero.
pub fn zero() -> Probability {
    Probability::zero()
}

/// Probability one (certainty).
pub fn one() -> Probability {
    Probability::one()
}

/// Returns true if `p` lies within `[0, 1]`.
pub fn is_probability(p: &Probability) -> bool {
    *p >= zero() && *p <= one()
}

/// Approximate a probability as `f64` for display.
///
/// The ratio is scaled as a whole, so huge numerators and denominators
/// still convert. Returns `NaN` only if the value itself does not fit.
pub fn to_f64(p: &Probability) -> f64 {
    p.to_f64().unwrap_or(f64::NAN)
}

/// Parse the `"n/d"` (or `"n"`) text form of a probability.
pub(crate) fn parse_probability(text: &str) -> Result<Probability, String> {
    text.trim()
        .parse::<Probability>()
        .map_err(|e| format!("invalid probability {:?}: {}", text, e))
}

/// Approximate a probability as a percentage for display.
///
/// # Examples
///
/// ```rust
/// use combat_odds::numeric::{percent, ratio};
///
/// assert_eq!(percent(&ratio(1, 4)), 25.0);
/// ```
pub fn percent(p: &Probability) -> f64 {
    to_f64(p) * 100.0
}

/// Serde adapter storing a probability as its `"n/d"` string form.
///
/// Use with `#[serde(with = "crate::numeric::serde_probability")]`.
pub mod serde_probability {
    use super::{parse_probability, Probability};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(p: &Probability, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(p)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Probability, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_probability(&s).map_err(D::Error::custom)
    }
}
