use crate::model::{AnalysisError, PricePoint};

/// Arithmetic mean of the last `window` prices (ordered oldest first).
pub fn moving_average(prices: &[f64], window: usize) -> Result<f64, AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::Configuration("window must be positive".into()));
    }
    if prices.len() < window {
        return Err(AnalysisError::InsufficientData {
            required: window,
            available: prices.len(),
        });
    }
    let tail = &prices[prices.len() - window..];
    Ok(tail.iter().sum::<f64>() / window as f64)
}

/// Percent change between the last two points; 0.0 when it cannot be computed.
pub fn price_change(points: &[PricePoint]) -> f64 {
    let [.., prev, last] = points else {
        return 0.0;
    };
    if prev.price == 0.0 {
        return 0.0;
    }
    (last.price - prev.price) / prev.price * 100.0
}

/// Sample standard deviation of the last `window` prices.
///
/// Unlike [`moving_average`], too few points yield 0.0 instead of an error.
pub fn volatility(points: &[PricePoint], window: usize) -> Result<f64, AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::Configuration("window must be positive".into()));
    }
    if points.len() < window || window < 2 {
        return Ok(0.0);
    }
    let tail = &points[points.len() - window..];
    let n = window as f64;
    let mean = tail.iter().map(|p| p.price).sum::<f64>() / n;
    let variance = tail.iter().map(|p| (p.price - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Ok(variance.sqrt())
}
