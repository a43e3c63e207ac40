//! Technical indicators used by the built-in momentum strategy.

/// Simple moving average over a price series.
///
/// Returns one value per input element; the first `period - 1` slots are
/// 0.0 since the window is not yet full there. A rolling sum keeps the
/// cost linear in the series length.
///
/// # Example
///
/// ```rust
/// use papertrader_core::indicators::sma;
///
/// let closes = vec![100.0, 102.0, 104.0, 103.0, 106.0];
/// let averages = sma(&closes, 5);
///
/// // Only the last slot has a full window: (100+102+104+103+106)/5
/// assert!((averages[4] - 103.0).abs() < 1e-9);
/// assert_eq!(averages[3], 0.0);
/// ```
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    let n = data.len();
    let mut result = vec![0.0; n];

    if period == 0 || period > n {
        return result;
    }

    let mut sum: f64 = data[..period].iter().sum();
    result[period - 1] = sum / period as f64;

    for i in period..n {
        sum += data[i] - data[i - period];
        result[i] = sum / period as f64;
    }

    result
}
