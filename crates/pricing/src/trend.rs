//! Trend Analyzer
//!
//! Least-squares trend over a price series indexed `0..n`, plus a
//! goodness-of-fit score and a volatility estimate. Degenerate inputs
//! return safe defaults rather than errors.

use bazaar_core::{Price, TrendDirection};

/// Goodness-of-fit reported when a series is too short or flat to judge
pub const MIN_TREND_CONFIDENCE: f64 = 0.1;

/// Ordinary least-squares slope of `prices` against `x = 0..n`
///
/// Returns 0 for fewer than two points or a zero denominator.
pub fn slope(prices: &[Price]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }

    let n = prices.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, price) in prices.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += price;
        sum_xy += x * price;
        sum_xx += x * x;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }

    numerator / denominator
}

/// R²-style fit of the trend line, clamped to `[0.1, 1.0]`
///
/// The intercept is approximated as `mean - slope * n / 2`.
pub fn confidence(prices: &[Price]) -> f64 {
    if prices.len() < 3 {
        return MIN_TREND_CONFIDENCE;
    }

    let n = prices.len() as f64;
    let mean = prices.iter().sum::<f64>() / n;

    let ss_tot: f64 = prices.iter().map(|p| (p - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return MIN_TREND_CONFIDENCE;
    }

    let slope = slope(prices);
    let intercept = mean - slope * n / 2.0;
    let ss_res: f64 = prices
        .iter()
        .enumerate()
        .map(|(i, p)| (p - (intercept + slope * i as f64)).powi(2))
        .sum();

    let r_squared = 1.0 - ss_res / ss_tot;
    if r_squared.is_nan() {
        return MIN_TREND_CONFIDENCE;
    }
    r_squared.clamp(MIN_TREND_CONFIDENCE, 1.0)
}

pub fn classify(slope: f64, threshold: f64) -> TrendDirection {
    TrendDirection::from_slope(slope, threshold)
}

/// Population variance of the last `window` prices, 0 with fewer points
pub fn volatility(prices: &[Price], window: usize) -> f64 {
    if window == 0 || prices.len() < window {
        return 0.0;
    }

    let recent = &prices[prices.len() - window..];
    let n = recent.len() as f64;
    let mean = recent.iter().sum::<f64>() / n;
    recent.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_slope_of_line() {
        assert_relative_eq!(slope(&[1.0, 2.0, 3.0, 4.0, 5.0]), 1.0);
        assert_relative_eq!(slope(&[10.0, 8.0, 6.0]), -2.0);
    }

    #[test]
    fn test_slope_degenerate_inputs() {
        assert_eq!(slope(&[]), 0.0);
        assert_eq!(slope(&[42.0]), 0.0);
        assert_eq!(slope(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_confidence_floor_for_short_or_flat_series() {
        assert_eq!(confidence(&[1.0, 2.0]), MIN_TREND_CONFIDENCE);
        assert_eq!(confidence(&[3.0, 3.0, 3.0, 3.0]), MIN_TREND_CONFIDENCE);
    }

    #[test]
    fn test_confidence_is_bounded() {
        let series = [
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec![5.0, 1.0, 9.0, 2.0, 8.0],
            vec![100.0, 101.0, 99.5, 102.0, 98.0, 103.0, 97.0],
        ];
        for prices in &series {
            let c = confidence(prices);
            assert!((MIN_TREND_CONFIDENCE..=1.0).contains(&c), "{c} out of range");
        }
    }

    #[test]
    fn test_noisy_series_scores_below_clean_one() {
        let clean = [10.0, 10.5, 11.0, 11.5, 12.0, 12.5];
        let noisy = [10.0, 13.0, 9.0, 14.0, 8.0, 12.5];
        assert!(confidence(&noisy) <= confidence(&clean));
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify(slope(&[1.0, 2.0, 3.0]), 0.01), TrendDirection::Rising);
        assert_eq!(classify(slope(&[3.0, 2.0, 1.0]), 0.01), TrendDirection::Falling);
        assert_eq!(classify(slope(&[7.0, 7.0, 7.0]), 0.01), TrendDirection::Stable);
    }

    #[test]
    fn test_volatility_uses_recent_window() {
        assert_eq!(volatility(&[1.0, 2.0, 3.0], 5), 0.0);
        // last five: 2, 4, 4, 4, 6 -> mean 4, variance 8/5
        assert_relative_eq!(volatility(&[100.0, 2.0, 4.0, 4.0, 4.0, 6.0], 5), 1.6);
        assert_eq!(volatility(&[5.0; 8], 5), 0.0);
    }
}
