//! Data-driven motion and timing constants
//!
//! Defaults are the shipped values. A tuning file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tuning load errors
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Per-reel motion constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelTuning {
    /// Slots visible inside the display window
    pub visible_symbols: usize,
    /// Buffer slots beyond the window for a seamless loop
    pub extra_symbols: usize,
    /// Full spin speed (pixels per frame)
    pub spin_speed: f32,
    /// Per-update speed multiplier while stopping
    pub slowdown_rate: f32,
    /// Speed below which the reel snaps to the grid
    pub stop_threshold: f32,
}

impl Default for ReelTuning {
    fn default() -> Self {
        Self {
            visible_symbols: 6,
            extra_symbols: 2,
            spin_speed: 50.0,
            slowdown_rate: 0.95,
            stop_threshold: 0.5,
        }
    }
}

impl ReelTuning {
    pub fn total_symbols(&self) -> usize {
        self.visible_symbols + self.extra_symbols
    }
}

/// Spin orchestration delays (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinTiming {
    /// Delay between successive reel starts
    pub reel_start_interval_ms: f64,
    /// All reels at full speed after the last start
    pub hold_ms: f64,
    /// Delay between successive reel stop signals
    pub reel_stop_interval_ms: f64,
    /// Wait after the last stop signal before resolving
    pub settle_ms: f64,
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self {
            reel_start_interval_ms: 200.0,
            hold_ms: 500.0,
            reel_stop_interval_ms: 400.0,
            settle_ms: 300.0,
        }
    }
}

/// Complete machine tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub reels: ReelTuning,
    pub timing: SpinTiming,
    /// Flat chance that a spin is a win
    pub win_probability: f64,
    /// Length of the one-shot win clip
    pub win_clip_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reels: ReelTuning::default(),
            timing: SpinTiming::default(),
            win_probability: 0.30,
            win_clip_ms: 1500.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| TuningError::Invalid(format!("{}: {}", path.display(), e)))
            .and_then(|json| Self::from_json(&json));

        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({})", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let r = &self.reels;
        if r.visible_symbols < 2 {
            return Err(TuningError::Invalid(format!(
                "visible_symbols must be at least 2, got {}",
                r.visible_symbols
            )));
        }
        if r.spin_speed.is_nan() || r.spin_speed <= 0.0 {
            return Err(TuningError::Invalid(format!("spin_speed must be positive, got {}", r.spin_speed)));
        }
        if !(0.0..1.0).contains(&r.slowdown_rate) || r.slowdown_rate == 0.0 {
            return Err(TuningError::Invalid(format!(
                "slowdown_rate must be in (0, 1), got {}",
                r.slowdown_rate
            )));
        }
        if r.stop_threshold.is_nan() || r.stop_threshold <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "stop_threshold must be positive, got {}",
                r.stop_threshold
            )));
        }

        let t = &self.timing;
        let delays = [t.reel_start_interval_ms, t.hold_ms, t.reel_stop_interval_ms, t.settle_ms];
        if delays.iter().any(|d| d.is_nan() || *d < 0.0) {
            return Err(TuningError::Invalid("spin delays must be non-negative".to_string()));
        }

        if !(0.0..=1.0).contains(&self.win_probability) {
            return Err(TuningError::Invalid(format!(
                "win_probability must be in [0, 1], got {}",
                self.win_probability
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().reels.total_symbols(), 8);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "timing": { "hold_ms": 900 }, "win_probability": 0.5 }"#).unwrap();
        assert_eq!(tuning.timing.hold_ms, 900.0);
        assert_eq!(tuning.timing.reel_start_interval_ms, 200.0);
        assert_eq!(tuning.win_probability, 0.5);
        assert_eq!(tuning.reels, ReelTuning::default());
    }

    #[test]
    fn test_rejects_non_decaying_slowdown() {
        let err = Tuning::from_json(r#"{ "reels": { "slowdown_rate": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_single_visible_symbol() {
        let err = Tuning::from_json(r#"{ "reels": { "visible_symbols": 1 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ nope").unwrap_err();
        assert!(matches!(err, TuningError::Json(_)));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let tuning = Tuning::load(Path::new("/nonexistent/reel-spin/tuning.json"));
        assert_eq!(tuning, Tuning::default());
    }
}
