//! Tone cues handed to the audio layer.
//!
//! Nothing here synthesises sound. Each cue describes one oscillator: when to
//! start it relative to the triggering event, which frequency, and how its
//! gain decays.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{NoteFragment, PlaybackConfig, ScheduledEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Triangle,
}

/// A single tone to emit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneCue {
    pub delay: Duration,
    pub frequency: f32,
    pub length: Duration,
    pub waveform: Waveform,
    /// Starting gain, ramped exponentially down to `release_gain`.
    pub gain: f32,
    pub release_gain: f32,
}

impl ToneCue {
    fn new(config: &PlaybackConfig, delay: Duration, frequency: f32, length: Duration) -> Self {
        Self {
            delay,
            frequency,
            length,
            waveform: Waveform::Triangle,
            gain: config.gain,
            release_gain: config.release_gain,
        }
    }
}

/// Short arpeggio confirming that `fragment` was placed. Rests stay silent.
pub fn placement_cues(fragment: &NoteFragment, config: &PlaybackConfig) -> Vec<ToneCue> {
    let stagger = config.feedback_stagger();
    fragment
        .tones()
        .iter()
        .zip(0u32..)
        .map(|(&frequency, step)| {
            ToneCue::new(config, stagger * step, frequency, config.feedback_tone())
        })
        .collect()
}

/// Chord sounded for a schedule entry, all tones starting at the entry offset.
pub fn playback_cues(entry: &ScheduledEntry, config: &PlaybackConfig) -> Vec<ToneCue> {
    if entry.silent {
        return Vec::new();
    }
    let millis =
        entry.placed.duration().as_f64() * f64::from(config.tone_seconds_per_beat) * 1000.0;
    let length = Duration::from_millis(millis.round() as u64);
    entry
        .tones()
        .iter()
        .map(|&frequency| ToneCue::new(config, entry.offset, frequency, length))
        .collect()
}

/// How long the slice of `entry` stays highlighted during playback.
pub fn highlight_length(entry: &ScheduledEntry, config: &PlaybackConfig) -> Duration {
    entry.length.saturating_sub(config.highlight_gap())
}
