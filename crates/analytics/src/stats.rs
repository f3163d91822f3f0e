//! Series statistics used by the engine. Pure functions, slice in, value out.

/// Floor applied to zero denominators (gross loss, standard deviation).
pub const DENOMINATOR_FLOOR: f64 = 1e-9;

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`), `0.0` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Replaces a zero (or non-finite) denominator with `DENOMINATOR_FLOOR`.
pub fn floored(denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        DENOMINATOR_FLOOR
    } else {
        denominator
    }
}

/// Running cumulative sum in input order.
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// Distance of each equity value below its running peak (always `<= 0`).
pub fn drawdown_series(equity: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    equity
        .iter()
        .map(|&e| {
            peak = peak.max(e);
            e - peak
        })
        .collect()
}

/// Length of the longest run of consecutive `true` values.
pub fn longest_streak<I>(flags: I) -> usize
where
    I: IntoIterator<Item = bool>,
{
    let mut best = 0;
    let mut current = 0;
    for flag in flags {
        if flag {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_dev() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v) - 5.0).abs() < 1e-12);
        assert!((population_std_dev(&v) - 2.0).abs() < 1e-12);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(population_std_dev(&[]), 0.0);
    }

    #[test]
    fn drawdown_tracks_running_peak() {
        let equity = cumulative_sum(&[10.0, -5.0, 20.0, -5.0, -5.0]);
        assert_eq!(equity, vec![10.0, 5.0, 25.0, 20.0, 15.0]);
        assert_eq!(drawdown_series(&equity), vec![0.0, -5.0, 0.0, -5.0, -10.0]);
    }

    #[test]
    fn drawdown_from_negative_start() {
        // The first point is its own peak even when below zero.
        assert_eq!(drawdown_series(&[-3.0, -4.0]), vec![0.0, -1.0]);
    }

    #[test]
    fn streaks() {
        assert_eq!(longest_streak([true, true, false, true, true, true, false]), 3);
        assert_eq!(longest_streak(Vec::<bool>::new()), 0);
        assert_eq!(longest_streak([false, false]), 0);
    }

    #[test]
    fn floor_only_applies_to_zero() {
        assert_eq!(floored(0.0), DENOMINATOR_FLOOR);
        assert_eq!(floored(2.5), 2.5);
    }
}
