use crate::error::QuakeStyleError;
use quakemap_scales::linear::LinearScale;

pub const DEFAULT_RADIUS_FACTOR: f64 = 4.0;

/// Maps magnitude to marker radius as `magnitude * factor`.
///
/// There is no clamping: negative magnitudes produce negative radii and `NaN` stays `NaN`.
#[derive(Debug, Clone)]
pub struct RadiusScaler {
    scale: LinearScale,
}

impl RadiusScaler {
    pub fn try_new(factor: f64) -> Result<Self, QuakeStyleError> {
        if !factor.is_finite() {
            return Err(QuakeStyleError::InvalidRadiusFactor(factor));
        }
        Ok(Self {
            scale: LinearScale::proportional(factor),
        })
    }

    pub fn factor(&self) -> f64 {
        self.scale.range().1
    }

    pub fn radius(&self, magnitude: f64) -> f64 {
        self.scale.scale(magnitude)
    }
}

impl Default for RadiusScaler {
    fn default() -> Self {
        Self {
            scale: LinearScale::proportional(DEFAULT_RADIUS_FACTOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_default_radius() {
        let scaler = RadiusScaler::default();
        assert_approx_eq!(f64, scaler.radius(5.0), 20.0);
        assert_approx_eq!(f64, scaler.radius(0.0), 0.0);
        assert_approx_eq!(f64, scaler.radius(-1.0), -4.0);
        assert!(scaler.radius(f64::NAN).is_nan());
    }

    #[test]
    fn test_custom_factor() -> Result<(), QuakeStyleError> {
        let scaler = RadiusScaler::try_new(2.5)?;
        assert_approx_eq!(f64, scaler.factor(), 2.5);
        assert_approx_eq!(f64, scaler.radius(4.0), 10.0);
        assert_eq!(
            RadiusScaler::try_new(f64::INFINITY).unwrap_err(),
            QuakeStyleError::InvalidRadiusFactor(f64::INFINITY)
        );
        Ok(())
    }
}
