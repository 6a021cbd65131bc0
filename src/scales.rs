//! Linear and logarithmic domain↔pixel scale transforms.

/// Floor applied to non-positive values entering a log scale.
pub const LOG_FLOOR: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleKind {
    Linear,
    Log,
}

#[derive(Clone, Debug)]
pub struct ChartScale {
    kind: ScaleKind,
    d_min: f64,
    d_max: f64,
    r_min: f32,
    r_max: f32,
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        let (d_min, d_max) = widen_degenerate(domain);
        Self {
            kind: ScaleKind::Linear,
            d_min,
            d_max,
            r_min: range.0,
            r_max: range.1,
        }
    }

    /// Log scale over a strictly positive domain; non-positive bounds are
    /// floored to [`LOG_FLOOR`].
    pub fn new_log(domain: (f64, f64), range: (f32, f32)) -> Self {
        let (d_min, d_max) = widen_degenerate((domain.0.max(LOG_FLOOR), domain.1.max(LOG_FLOOR)));
        Self {
            kind: ScaleKind::Log,
            d_min,
            d_max,
            r_min: range.0,
            r_max: range.1,
        }
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.d_min, self.d_max)
    }

    pub fn range(&self) -> (f32, f32) {
        (self.r_min, self.r_max)
    }

    fn normalized(&self, value: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => (value - self.d_min) / (self.d_max - self.d_min),
            ScaleKind::Log => {
                let lo = self.d_min.ln();
                let hi = self.d_max.ln();
                (value.max(LOG_FLOOR).ln() - lo) / (hi - lo)
            }
        }
    }

    pub fn map(&self, value: f64) -> f32 {
        let t = self.normalized(value);
        let res = self.r_min as f64 + t * (self.r_max - self.r_min) as f64;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res as f32
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        let span = (self.r_max - self.r_min) as f64;
        if span == 0.0 {
            return self.d_min;
        }
        let t = (pixel - self.r_min) as f64 / span;
        match self.kind {
            ScaleKind::Linear => self.d_min + t * (self.d_max - self.d_min),
            ScaleKind::Log => {
                let lo = self.d_min.ln();
                let hi = self.d_max.ln();
                (lo + t * (hi - lo)).exp()
            }
        }
    }

    pub fn update_domain(&mut self, min: f64, max: f64) {
        let (min, max) = match self.kind {
            ScaleKind::Linear => (min, max),
            ScaleKind::Log => (min.max(LOG_FLOOR), max.max(LOG_FLOOR)),
        };
        let (d_min, d_max) = widen_degenerate((min, max));
        self.d_min = d_min;
        self.d_max = d_max;
    }

    pub fn update_range(&mut self, min: f32, max: f32) {
        self.r_min = min;
        self.r_max = max;
    }

    /// Returns (m, c) such that pixel = value * m + c.
    /// Only exact for linear scales; log scales fall back to identity.
    pub fn linear_coeffs(&self) -> (f32, f32) {
        match self.kind {
            ScaleKind::Linear => {
                let m = (self.r_max - self.r_min) as f64 / (self.d_max - self.d_min);
                let c = self.r_min as f64 - m * self.d_min;
                (m as f32, c as f32)
            }
            ScaleKind::Log => (1.0, 0.0),
        }
    }
}

fn widen_degenerate((mut d_min, mut d_max): (f64, f64)) -> (f64, f64) {
    if (d_max - d_min).abs() < f64::EPSILON {
        d_min -= 0.5;
        d_max += 0.5;
    }
    (d_min, d_max)
}
