//! Missing-value policies

/// Substituted for an absent age or account age
pub const MISSING_NUMERIC_SENTINEL: f64 = -1.0;

/// Numeric imputation for customer attributes
#[inline]
pub fn impute_numeric(value: Option<f64>) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(MISSING_NUMERIC_SENTINEL)
}

/// How an undefined distance is filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceFill {
    /// Mean distance observed over the training data.
    ///
    /// Distance is only undefined when a coordinate is missing, and such a row
    /// is refused at that coordinate column, so this fill never reaches a
    /// scored row. It keeps the assembled row inspectable.
    Historical(f64),
    /// Mean of the request's own distance column. With a single row this is
    /// the value itself, so an undefined distance stays undefined.
    RowMean,
}

impl DistanceFill {
    pub fn fill(&self, distance: Option<f64>) -> Option<f64> {
        let distance = distance.filter(|d| !d.is_nan());
        match self {
            DistanceFill::Historical(mean) => distance.or(Some(*mean)),
            DistanceFill::RowMean => distance.or_else(|| column_mean(&[distance])),
        }
    }
}

/// Mean over the defined values, `None` when there are none
pub fn column_mean(values: &[Option<f64>]) -> Option<f64> {
    let defined: Vec<f64> = values.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
    if defined.is_empty() {
        return None;
    }
    Some(defined.iter().sum::<f64>() / defined.len() as f64)
}
