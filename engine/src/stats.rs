//! Rolling-window statistics over a spread series.

use crate::error::DomainError;

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mu;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;

    Some(variance.sqrt())
}

/// Number of population standard deviations the last observation lies from
/// the window mean.
///
/// A constant series, or one whose deviation is within the summation rounding
/// of the mean (which grows with the length), counts as zero variance.
pub fn zscore(values: &[f64]) -> Result<f64, DomainError> {
    let len = values.len();
    if len < 2 {
        return Err(DomainError::TooShort { len });
    }

    let last = values[len - 1];
    let mu = mean(values).ok_or(DomainError::TooShort { len })?;
    let sigma = population_std_dev(values).ok_or(DomainError::TooShort { len })?;

    if !sigma.is_finite() || !mu.is_finite() {
        return Err(DomainError::NonFinite);
    }
    let constant = values.iter().all(|&v| v == values[0]);
    if constant || sigma == 0.0 || sigma <= len as f64 * f64::EPSILON * mu.abs() {
        return Err(DomainError::ZeroVariance);
    }

    let z = (last - mu) / sigma;
    if !z.is_finite() {
        return Err(DomainError::NonFinite);
    }

    Ok(z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_of_known_series() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), Some(5.0));
        assert_eq!(population_std_dev(&v), Some(2.0));
    }

    #[test]
    fn empty_series_has_no_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std_dev(&[]), None);
    }

    #[test]
    fn zscore_of_rising_tail_is_population_based() {
        // mean 1.022, population sigma ~0.041183
        let z = zscore(&[1.0, 1.02, 0.98, 1.01, 1.10]).unwrap();
        assert!((z - 1.894).abs() < 1e-3, "z = {z}");
    }

    #[test]
    fn zscore_of_falling_tail_is_negative() {
        let z = zscore(&[1.0, 1.02, 0.98, 1.01, 0.90]).unwrap();
        assert!(z < 0.0);
    }

    #[test]
    fn constant_series_is_zero_variance() {
        assert_eq!(zscore(&[2.0, 2.0, 2.0]), Err(DomainError::ZeroVariance));
    }

    #[test]
    fn constant_series_with_rounding_noise_is_zero_variance() {
        assert_eq!(zscore(&[0.1, 0.1, 0.1]), Err(DomainError::ZeroVariance));
    }

    #[test]
    fn long_constant_series_is_zero_variance() {
        // summation rounding leaves a tiny non-zero sigma on these
        assert_eq!(zscore(&[0.01; 23]), Err(DomainError::ZeroVariance));
        assert_eq!(zscore(&[0.03; 10]), Err(DomainError::ZeroVariance));
        assert_eq!(zscore(&[0.07; 50]), Err(DomainError::ZeroVariance));
    }

    #[test]
    fn short_series_is_rejected() {
        assert_eq!(zscore(&[]), Err(DomainError::TooShort { len: 0 }));
        assert_eq!(zscore(&[1.5]), Err(DomainError::TooShort { len: 1 }));
    }

    #[test]
    fn two_points_are_enough() {
        // mean 1.5, sigma 0.5 -> last sits exactly one sigma above
        assert_eq!(zscore(&[1.0, 2.0]), Ok(1.0));
    }

    #[test]
    fn infinite_input_is_non_finite() {
        assert_eq!(zscore(&[1.0, f64::INFINITY]), Err(DomainError::NonFinite));
    }
}
