use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{Beats, Result, RhythmError};

/// Longest measure a configuration may ask for, in whole beats.
pub const MAX_CAPACITY_BEATS: u32 = 64;
/// Slowest beat a configuration may ask for.
pub const MAX_BEAT_DURATION_MS: u64 = 60_000;

/// Top-level configuration structure for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Whole beats per measure.
    pub capacity_beats: u32,
    /// Fixes the deck order across runs when set.
    pub seed: Option<u64>,
    pub playback: PlaybackConfig,
    pub geometry: PizzaGeometry,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            capacity_beats: 4,
            seed: None,
            playback: PlaybackConfig::default(),
            geometry: PizzaGeometry::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    pub fn capacity(&self) -> Beats {
        Beats::whole(self.capacity_beats)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CAPACITY_BEATS).contains(&self.capacity_beats) {
            return Err(RhythmError::InvalidConfig(format!(
                "capacity_beats must lie in 1..={MAX_CAPACITY_BEATS}, got {}",
                self.capacity_beats
            )));
        }
        self.playback.validate()?;
        self.geometry.validate()
    }
}

/// Timing and level of the tones the audio layer is asked to play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub beat_duration_ms: u64,
    /// Tone length per beat during full playback.
    pub tone_seconds_per_beat: f32,
    /// Delay between the tones of a fragment when it is placed.
    pub feedback_stagger_ms: u64,
    pub feedback_tone_ms: u64,
    /// Gap trimmed off the end of each slice highlight.
    pub highlight_gap_ms: u64,
    /// Idle time after the last entry before playback counts as finished.
    pub tail_ms: u64,
    pub gain: f32,
    pub release_gain: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            beat_duration_ms: 400,
            tone_seconds_per_beat: 0.35,
            feedback_stagger_ms: 80,
            feedback_tone_ms: 300,
            highlight_gap_ms: 50,
            tail_ms: 200,
            gain: 0.25,
            release_gain: 0.01,
        }
    }
}

impl PlaybackConfig {
    pub fn beat_duration(&self) -> Duration {
        Duration::from_millis(self.beat_duration_ms)
    }

    pub fn feedback_stagger(&self) -> Duration {
        Duration::from_millis(self.feedback_stagger_ms)
    }

    pub fn feedback_tone(&self) -> Duration {
        Duration::from_millis(self.feedback_tone_ms)
    }

    pub fn highlight_gap(&self) -> Duration {
        Duration::from_millis(self.highlight_gap_ms)
    }

    pub fn tail(&self) -> Duration {
        Duration::from_millis(self.tail_ms)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_BEAT_DURATION_MS).contains(&self.beat_duration_ms) {
            return Err(RhythmError::InvalidConfig(format!(
                "playback.beat_duration_ms must lie in 1..={MAX_BEAT_DURATION_MS}"
            )));
        }
        if !(self.tone_seconds_per_beat.is_finite() && self.tone_seconds_per_beat > 0.0) {
            return Err(RhythmError::InvalidConfig(
                "playback.tone_seconds_per_beat must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.gain) || !(0.0..=1.0).contains(&self.release_gain) {
            return Err(RhythmError::InvalidConfig(
                "playback gains must lie in 0..=1".into(),
            ));
        }
        Ok(())
    }
}

/// Dimensions of the pizza drawing, in SVG user units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PizzaGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
}

impl Default for PizzaGeometry {
    fn default() -> Self {
        Self {
            center_x: 150.0,
            center_y: 150.0,
            outer_radius: 135.0,
            inner_radius: 30.0,
        }
    }
}

impl PizzaGeometry {
    fn validate(&self) -> Result<()> {
        if !(self.inner_radius >= 0.0 && self.outer_radius > self.inner_radius) {
            return Err(RhythmError::InvalidConfig(format!(
                "geometry radii must satisfy 0 <= inner ({}) < outer ({})",
                self.inner_radius, self.outer_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_four_four_measure() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity(), Beats::whole(4));
        assert_eq!(config.playback.beat_duration(), Duration::from_millis(400));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "seed": 11, "playback": { "beat_duration_ms": 500 } }"#)
                .unwrap();

        assert_eq!(config.seed, Some(11));
        assert_eq!(config.capacity_beats, 4);
        assert_eq!(config.playback.beat_duration_ms, 500);
        assert_eq!(config.playback.feedback_stagger_ms, 80);
        assert_eq!(config.geometry, PizzaGeometry::default());
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = GameConfig::from_json_str(r#"{ "capacity_beats": 0 }"#).unwrap_err();
        assert!(matches!(err, RhythmError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_capacity_beyond_limit() {
        let err = GameConfig::from_json_str(r#"{ "capacity_beats": 1073741824 }"#).unwrap_err();
        assert!(matches!(err, RhythmError::InvalidConfig(_)));

        let err = GameConfig::from_json_str(r#"{ "capacity_beats": 65 }"#).unwrap_err();
        assert!(err.to_string().contains("capacity_beats"));

        let config = GameConfig::from_json_str(r#"{ "capacity_beats": 64 }"#).unwrap();
        assert_eq!(config.capacity(), Beats::whole(64));
    }

    #[test]
    fn rejects_unbounded_beat_duration() {
        let err = GameConfig::from_json_str(r#"{ "playback": { "beat_duration_ms": 60001 } }"#)
            .unwrap_err();
        assert!(matches!(err, RhythmError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_inverted_radii() {
        let err = GameConfig::from_json_str(
            r#"{ "geometry": { "outer_radius": 20.0, "inner_radius": 30.0 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("geometry radii"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = GameConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, RhythmError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RhythmError::Io(_)));
    }
}
