//! Robust aggregation of repeated benchmark samples

use crate::error::{AppError, Result};

/// Reduce a set of samples to a single outlier-resistant point estimate.
///
/// Sorts the samples, discards exactly the single smallest and single largest
/// value, and returns the arithmetic mean of the remainder. Load-generator runs
/// tend to produce one cold-start outlier at each extreme, so this trims one
/// value from each end no matter how many samples there are.
///
/// Requires at least 3 samples; fewer is a configuration error (the repetition
/// count was set too low).
pub fn robust_average(samples: &[f64]) -> Result<f64> {
    if samples.len() < 3 {
        return Err(AppError::insufficient_samples(format!(
            "need at least 3 samples to trim both extremes, got {}",
            samples.len()
        )));
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let trimmed = &sorted[1..sorted.len() - 1];
    Ok(trimmed.iter().sum::<f64>() / trimmed.len() as f64)
}
