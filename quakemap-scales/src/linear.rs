/// A linear scale that maps numeric input values from a domain to a range.
///
/// Values outside the domain extrapolate along the same line and non-finite inputs pass
/// through the arithmetic unchanged (`NaN` in, `NaN` out).
#[derive(Clone, Debug)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// A scale computing `x * factor`
    pub fn proportional(factor: f64) -> Self {
        Self {
            domain_start: 0.0,
            domain_end: 1.0,
            range_start: 0.0,
            range_end: factor,
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn scale(&self, x: f64) -> f64 {
        let t = (x - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + t * (self.range_end - self.range_start)
    }
}
