//! Differential privacy via the Laplace mechanism

use crate::domain::{AegisError, NumericData, Result};
use rand::Rng;

/// Global sensitivity assumed for every released statistic
pub const SENSITIVITY: f64 = 1.0;

/// Largest |u| drawn; keeps `ln(1 - 2|u|)` finite
const MAX_ABS_U: f64 = 0.5 - f64::EPSILON;

/// Add Laplace(0, sensitivity/epsilon) noise to `sample` using the thread RNG
///
/// # Errors
///
/// [`AegisError::InvalidParameter`] if `epsilon` is not a finite value > 0.
///
/// # Examples
///
/// ```
/// use aegis::anonymization::privacy::apply_differential_privacy;
/// use aegis::domain::NumericData;
///
/// let noisy = apply_differential_privacy(&NumericData::new("visits", 42.0), 0.5).unwrap();
/// assert_eq!(noisy.label, "visits");
/// assert!(apply_differential_privacy(&NumericData::new("visits", 42.0), 0.0).is_err());
/// ```
pub fn apply_differential_privacy(sample: &NumericData, epsilon: f64) -> Result<NumericData> {
    apply_differential_privacy_with_rng(sample, epsilon, &mut rand::thread_rng())
}

/// Same as [`apply_differential_privacy`] with a caller-supplied RNG
pub fn apply_differential_privacy_with_rng<R: Rng + ?Sized>(
    sample: &NumericData,
    epsilon: f64,
    rng: &mut R,
) -> Result<NumericData> {
    let noise = laplace_noise(rng, SENSITIVITY, epsilon)?;
    Ok(NumericData {
        label: sample.label.clone(),
        value: sample.value + noise,
    })
}

/// Draw one Laplace sample by inverse transform
///
/// `u ~ U(-0.5, 0.5)`, `noise = -(sensitivity/epsilon) * sign(u) * ln(1 - 2|u|)`.
pub fn laplace_noise<R: Rng + ?Sized>(rng: &mut R, sensitivity: f64, epsilon: f64) -> Result<f64> {
    validate_epsilon(epsilon)?;

    let u: f64 = rng.gen_range(-0.5..0.5);
    let u = u.clamp(-MAX_ABS_U, MAX_ABS_U);
    let scale = sensitivity / epsilon;

    Ok(-scale * u.signum() * (1.0 - 2.0 * u.abs()).ln())
}

pub(crate) fn validate_epsilon(epsilon: f64) -> Result<()> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(AegisError::InvalidParameter(format!(
            "epsilon must be a finite value > 0, got {epsilon}"
        )))
    }
}
