use super::AngleFilter;

/// Exponential smoothing of neck and torso angles
pub struct ExponentialFilter {
    alpha: f64,
    last: Option<(f64, f64)>,
}

impl ExponentialFilter {
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self { alpha, last: None }
    }
}

impl AngleFilter for ExponentialFilter {
    fn apply(&mut self, neck: f64, torso: f64) -> (f64, f64) {
        let filtered = match self.last {
            Some((last_neck, last_torso)) => (
                self.alpha * neck + (1.0 - self.alpha) * last_neck,
                self.alpha * torso + (1.0 - self.alpha) * last_torso,
            ),
            None => (neck, torso),
        };

        self.last = Some(filtered);
        filtered
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}
