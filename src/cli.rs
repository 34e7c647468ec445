//! Command line surface of the `posture-tracker` binary.
//!
//! Input is a JSON-lines stream with one frame per line: either `null` (no
//! person detected) or an array of 33 BlazePose landmarks, each `[x, y]`,
//! `[x, y, visibility]` or `{"x": .., "y": .., "visibility": ..}`.

use crate::{config::Config, landmarks::Landmark, landmarks::PoseLandmarks, Error, Result};
use clap::Parser;
use std::io::BufRead;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Sitting posture tracker over pose landmark streams", long_about = None)]
pub struct Args {
    /// JSON-lines landmark stream, `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    pub config: Option<String>,

    /// Frames per second of the input
    #[arg(long)]
    pub fps: Option<f64>,

    /// Neck inclination limit in degrees
    #[arg(long)]
    pub neck_limit: Option<f64>,

    /// Torso inclination limit in degrees
    #[arg(long)]
    pub torso_limit: Option<f64>,

    /// Seconds of bad posture before alerting
    #[arg(long)]
    pub bad_limit: Option<f64>,

    /// Seconds of good posture before alerting
    #[arg(long)]
    pub good_limit: Option<f64>,

    /// Keep counting after an alert instead of starting a fresh window
    #[arg(long)]
    pub no_reset_on_alert: bool,

    /// Derive the posture label from the last N frames only
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Angle smoothing filter (none, moving_average[:N], exponential[:ALPHA])
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Overlay command line values on a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(fps) = self.fps {
            config.timing.frame_rate = fps;
        }
        if let Some(limit) = self.neck_limit {
            config.thresholds.neck_limit_deg = limit;
        }
        if let Some(limit) = self.torso_limit {
            config.thresholds.torso_limit_deg = limit;
        }
        if let Some(limit) = self.bad_limit {
            config.timing.bad_time_limit_secs = limit;
        }
        if let Some(limit) = self.good_limit {
            config.timing.good_time_limit_secs = limit;
        }
        if self.no_reset_on_alert {
            config.alerts.reset_counters_on_alert = false;
        }
        if let Some(window) = self.window {
            config.classification.majority_window = window;
        }
        if let Some(filter) = &self.filter {
            config.classification.filter.clone_from(filter);
        }
    }
}

/// Parse one stream line; `Ok(None)` is a frame without a person
///
/// # Errors
///
/// Returns an error if the line is not `null` or a landmark array of at least 33 points
pub fn parse_frame_line(line: &str, line_number: usize) -> Result<Option<PoseLandmarks>> {
    let landmarks: Option<Vec<Landmark>> =
        serde_json::from_str(line).map_err(|source| Error::MalformedFrame {
            line: line_number,
            source,
        })?;

    landmarks
        .map(|l| {
            PoseLandmarks::from_blazepose(&l).map_err(|e| Error::InvalidInput(format!("Line {line_number}: {e}")))
        })
        .transpose()
}

/// Read every frame from a stream; blank lines are ignored
///
/// # Errors
///
/// Returns an error on I/O failure or the first malformed line
pub fn read_frames<R: BufRead>(reader: R) -> Result<Vec<Option<PoseLandmarks>>> {
    let mut frames = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        frames.push(parse_frame_line(&line, index + 1)?);
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_json() -> String {
        let points: Vec<String> = (0..33).map(|i| format!("[{}, 0.5]", f64::from(i) / 100.0)).collect();
        format!("[{}]", points.join(","))
    }

    #[test]
    fn test_parse_null_frame() {
        assert!(parse_frame_line("null", 1).unwrap().is_none());
    }

    #[test]
    fn test_parse_landmark_frame() {
        let landmarks = parse_frame_line(&frame_json(), 1).unwrap().unwrap();
        assert_eq!(landmarks.left_shoulder.x, 0.11);
    }

    #[test]
    fn test_parse_errors_carry_line_number() {
        let err = parse_frame_line("{oops", 7).unwrap_err();
        assert!(matches!(err, Error::MalformedFrame { line: 7, .. }));
        assert!(err.to_string().starts_with("Line 7: malformed landmark frame"));

        let err = parse_frame_line("[[0.1, 0.2]]", 3).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("Line 3"));
    }

    #[test]
    fn test_read_frames_skips_blank_lines() {
        let input = format!("null\n\n{}\nnull\n", frame_json());
        let frames = read_frames(input.as_bytes()).unwrap();
        assert_eq!(frames.len(), 3);
        assert!(frames[1].is_some());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "posture-tracker",
            "--fps",
            "10",
            "--neck-limit",
            "25",
            "--no-reset-on-alert",
            "--window",
            "30",
            "--filter",
            "exponential:0.4",
        ])
        .unwrap();

        let mut config = Config::default();
        args.apply_to(&mut config);
        assert_eq!(config.timing.frame_rate, 10.0);
        assert_eq!(config.thresholds.neck_limit_deg, 25.0);
        assert!(!config.alerts.reset_counters_on_alert);
        assert_eq!(config.classification.majority_window, 30);
        assert_eq!(config.classification.filter, "exponential:0.4");
        assert_eq!(config.thresholds.torso_limit_deg, 10.0);
    }
}
