//! Linear min/max contrast stretch over valid samples

/// Whether a sample carries data: finite and not the nodata value
pub fn is_valid(value: f64, nodata: Option<f64>) -> bool {
    // A NaN nodata marker is already covered by the finiteness check
    value.is_finite() && nodata.is_none_or(|nd| nd.is_nan() || (value - nd).abs() > 0.0)
}

/// Value range mapped onto the colormap's `[0, 1]` domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stretch {
    /// Smallest valid sample
    pub min: f64,
    /// Largest valid sample
    pub max: f64,
}

impl Stretch {
    /// Span the valid samples; `None` when no sample is valid
    pub fn from_samples<'a, I>(samples: I, nodata: Option<f64>) -> Option<Self>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        samples
            .into_iter()
            .copied()
            .filter(|&v| is_valid(v, nodata))
            .fold(None, |range: Option<Self>, v| {
                Some(range.map_or(Self { min: v, max: v }, |r| Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }))
            })
    }

    /// Map `value` into `[0, 1]`, clamping outliers
    ///
    /// A constant band (`min == max`) maps every value to 0.
    pub const fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}
