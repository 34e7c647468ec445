//! Optional smoothing of per-frame angles before classification.
//!
//! Landmark jitter makes single-frame angles noisy. A filter trades a few
//! frames of lag for steadier classification. The default is [`NoFilter`],
//! which leaves every frame's reading untouched.

/// Moving average filter for simple smoothing
pub mod moving_average;

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::{
    constants::{DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MOVING_AVERAGE_WINDOW},
    Error, Result,
};

/// Trait for all angle filters
pub trait AngleFilter: Send + Sync {
    /// Apply filter to a `(neck, torso)` reading
    fn apply(&mut self, neck: f64, torso: f64) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl AngleFilter for NoFilter {
    fn apply(&mut self, neck: f64, torso: f64) -> (f64, f64) {
        (neck, torso)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create an angle filter from a spec string
///
/// Accepted forms: `none`, `moving_average[:WINDOW]`, `exponential[:ALPHA]`.
///
/// # Errors
///
/// Returns an error for unknown names or out-of-range parameters
pub fn create_filter(spec: &str) -> Result<Box<dyn AngleFilter>> {
    let spec = spec.trim().to_lowercase();
    let (name, param) = match spec.split_once(':') {
        Some((name, param)) => (name, Some(param)),
        None => (spec.as_str(), None),
    };

    match name {
        "none" | "nofilter" => {
            if param.is_some() {
                return Err(Error::FilterError("Filter 'none' takes no parameter".to_string()));
            }
            Ok(Box::new(NoFilter))
        }
        "moving_average" | "movingaverage" => {
            let window = match param {
                Some(p) => p
                    .parse::<usize>()
                    .map_err(|_| Error::FilterError(format!("Invalid moving average window: {p}")))?,
                None => DEFAULT_MOVING_AVERAGE_WINDOW,
            };
            if window == 0 {
                return Err(Error::FilterError("Window size must be greater than 0".to_string()));
            }
            Ok(Box::new(moving_average::MovingAverageFilter::new(window)))
        }
        "exponential" => {
            let alpha = match param {
                Some(p) => p
                    .parse::<f64>()
                    .map_err(|_| Error::FilterError(format!("Invalid exponential alpha: {p}")))?,
                None => DEFAULT_EXPONENTIAL_ALPHA,
            };
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")));
            }
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {spec}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter() {
        let mut filter = NoFilter;
        let (neck, torso) = filter.apply(10.0, 20.0);
        assert_eq!(neck, 10.0);
        assert_eq!(torso, 20.0);
    }

    #[test]
    fn test_create_filter() {
        assert_eq!(create_filter("none").unwrap().name(), "NoFilter");
        assert_eq!(create_filter("moving_average").unwrap().name(), "MovingAverageFilter");
        assert_eq!(create_filter("Exponential:0.3").unwrap().name(), "ExponentialFilter");
        assert!(create_filter("kalman").is_err());
    }

    #[test]
    fn test_create_filter_validation() {
        assert!(create_filter("moving_average:0").is_err());
        assert!(create_filter("moving_average:abc").is_err());
        assert!(create_filter("exponential:0").is_err());
        assert!(create_filter("exponential:1.5").is_err());
        assert!(create_filter("none:3").is_err());

        assert!(create_filter("moving_average:3").is_ok());
        assert!(create_filter("exponential:1").is_ok());
    }
}
