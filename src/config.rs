use crate::error::{StripError, StripResult};

/// Parameters controlling a single conversion request.
///
/// Owned for the lifetime of one request and validated before the
/// pipeline runs; nothing here is shared between requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionParameters {
    /// Median filter window radius (rounded to the nearest integer);
    /// 0 disables denoising.
    pub denoise_strength: f32,
    /// Standard deviation of the Gaussian smoothing applied before
    /// gradient computation.
    pub edge_sigma: f32,
    /// Edge intensity cutoff in [0, 1]; cells strictly above it become
    /// vector content.
    pub threshold: f32,
}

impl Default for ConversionParameters {
    fn default() -> Self {
        Self {
            denoise_strength: 1.0,
            edge_sigma: 1.0,
            threshold: 0.2,
        }
    }
}

impl ConversionParameters {
    /// Check every parameter against its declared range.
    pub fn validate(&self) -> StripResult<()> {
        if !self.denoise_strength.is_finite() || self.denoise_strength < 0.0 {
            return Err(StripError::Parameter {
                name: "denoise_strength",
                value: self.denoise_strength,
                expected: "a finite value >= 0",
            });
        }
        if !self.edge_sigma.is_finite() || self.edge_sigma <= 0.0 {
            return Err(StripError::Parameter {
                name: "edge_sigma",
                value: self.edge_sigma,
                expected: "a finite value > 0",
            });
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(StripError::Parameter {
                name: "threshold",
                value: self.threshold,
                expected: "a value in [0, 1]",
            });
        }
        Ok(())
    }
}
