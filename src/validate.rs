//! Sanity checks run on the raw data before an optimal tree is built.

use tracing::debug;

use crate::error::InvalidInput;

/// How far the probabilities may stray from summing to exactly 1.
pub const PROBABILITY_TOLERANCE: f64 = 0.0001;

/// Checks that there is one value and one key probability for every key, and
/// one miss probability for every gap around the keys (so one more than the
/// number of keys).
///
/// # Examples
///
/// ```
/// use optbst::validate::check_lengths;
///
/// assert!(check_lengths(&["a", "b"], &["1", "2"], &[0.5, 0.5], &[0.0, 0.0, 0.0]).is_ok());
/// assert!(check_lengths(&["a", "b"], &["1"], &[0.5, 0.5], &[0.0, 0.0, 0.0]).is_err());
/// ```
pub fn check_lengths<K, V>(
    keys: &[K],
    values: &[V],
    key_probs: &[f64],
    miss_probs: &[f64],
) -> Result<(), InvalidInput> {
    let n = keys.len();
    if values.len() != n || key_probs.len() != n || miss_probs.len() != n + 1 {
        let err = InvalidInput::LengthMismatch {
            keys: n,
            values: values.len(),
            key_probs: key_probs.len(),
            miss_probs: miss_probs.len(),
        };
        debug!(%err, "rejected optimal tree input");
        return Err(err);
    }

    Ok(())
}

/// Checks that the key and miss probabilities together total 1, within
/// [`PROBABILITY_TOLERANCE`].
///
/// The probabilities are added smallest first to keep round-off error down.
///
/// # Examples
///
/// ```
/// use optbst::validate::check_probs;
///
/// assert!(check_probs(&[0.5], &[0.25, 0.25]).is_ok());
/// assert!(check_probs(&[0.25], &[0.125, 0.125]).is_err());
/// ```
pub fn check_probs(key_probs: &[f64], miss_probs: &[f64]) -> Result<(), InvalidInput> {
    let mut all_probs: Vec<f64> = key_probs.iter().chain(miss_probs).copied().collect();
    all_probs.sort_by(f64::total_cmp);
    let total: f64 = all_probs.iter().sum();

    if total.is_nan() || (1.0 - total).abs() > PROBABILITY_TOLERANCE {
        let err = InvalidInput::ProbabilityTotal { total };
        debug!(%err, "rejected optimal tree input");
        return Err(err);
    }

    Ok(())
}
