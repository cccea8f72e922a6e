/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() { return 0.0; }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// `num / den`, or 0.0 when `den` is zero.
pub fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderStats {
    pub min: f64,
    /// Element at index `n / 2` of the ascending sort (upper median for even `n`).
    pub median: f64,
    pub max: f64,
}

impl OrderStats {
    pub const ZERO: OrderStats = OrderStats { min: 0.0, median: 0.0, max: 0.0 };

    pub fn of(xs: &[f64]) -> Option<Self> {
        if xs.is_empty() { return None; }
        let mut sorted = xs.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Some(Self {
            min: sorted[0],
            median: sorted[sorted.len() / 2],
            max: sorted[sorted.len() - 1],
        })
    }

    /// Like [`OrderStats::of`] but all-zero for an empty slice.
    pub fn or_zero(xs: &[f64]) -> Self {
        Self::of(xs).unwrap_or(Self::ZERO)
    }
}
