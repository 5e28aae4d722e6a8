use crate::error::QuakeScaleError;
use std::fmt::Debug;

/// A threshold scale maps continuous values to discrete values based on explicit threshold boundaries.
///
/// A value is assigned to the first segment whose upper threshold it is strictly less than,
/// so a value equal to a threshold belongs to the segment above it. Values below the first
/// threshold (including negative infinity) map to the first range entry and values at or above
/// the last threshold map to the last one. `NaN` compares false against every threshold and maps
/// to `default`.
#[derive(Debug, Clone)]
pub struct ThresholdScale<R>
where
    R: Clone + Debug + Sync + 'static,
{
    thresholds: Vec<f64>,
    range: Vec<R>,
    default: R,
}

impl<R> ThresholdScale<R>
where
    R: Clone + Debug + Sync + 'static,
{
    pub fn try_new(
        range: Vec<R>,
        thresholds: Vec<f64>,
        default: R,
    ) -> Result<Self, QuakeScaleError> {
        if range.is_empty() {
            return Err(QuakeScaleError::EmptyRange);
        }

        if !thresholds.iter().all(|t| t.is_finite()) {
            return Err(QuakeScaleError::NonFiniteThreshold(thresholds));
        }

        if !thresholds.windows(2).all(|w| w[0] < w[1]) {
            return Err(QuakeScaleError::ThresholdsNotAscending(thresholds));
        }

        if range.len() != thresholds.len() + 1 {
            return Err(QuakeScaleError::ThresholdDomainMismatch {
                domain_len: thresholds.len(),
                range_len: range.len(),
            });
        }
        Ok(Self {
            thresholds,
            range,
            default,
        })
    }

    /// Returns a reference to the threshold values
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Returns a reference to the output range
    pub fn range(&self) -> &[R] {
        &self.range
    }

    /// Returns the default value
    pub fn default(&self) -> &R {
        &self.default
    }

    /// Index of the range entry `x` maps to, or `None` for `NaN`
    pub fn bucket(&self, x: f64) -> Option<usize> {
        if x.is_nan() {
            None
        } else {
            Some(self.thresholds.partition_point(|t| *t <= x))
        }
    }

    pub fn scale(&self, x: f64) -> R {
        match self.bucket(x) {
            Some(idx) => self.range[idx].clone(),
            None => self.default.clone(),
        }
    }

    /// The `[lower, upper)` extent of input values mapping to the range entry at `index`.
    ///
    /// `None` marks an unbounded side. Returns `None` when `index` is out of range.
    pub fn invert_extent(&self, index: usize) -> Option<(Option<f64>, Option<f64>)> {
        if index >= self.range.len() {
            return None;
        }
        let lower = index
            .checked_sub(1)
            .and_then(|i| self.thresholds.get(i))
            .copied();
        let upper = self.thresholds.get(index).copied();
        Some((lower, upper))
    }
}
