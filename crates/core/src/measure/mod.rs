//! The measure being filled and the rules that gate every new fragment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Beats, CatalogShuffler, NoteFragment, PlaybackSchedule};

/// Length of a 4/4 measure.
pub const DEFAULT_CAPACITY: Beats = Beats::whole(4);

/// A fragment accepted into the measure, pinned to its beat interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedFragment {
    pub fragment: NoteFragment,
    pub start: Beats,
    pub end: Beats,
}

impl PlacedFragment {
    pub fn duration(&self) -> Beats {
        self.fragment.duration()
    }
}

/// Why a fragment was turned away. Both cases are routine game outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("the measure is already full")]
    AlreadyFull,
    #[error("fragment does not fit; {remaining} beats remaining")]
    Overflow { remaining: Beats },
}

/// Where the measure is in its two-state lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureStatus {
    Accepting(Beats),
    Full,
}

/// Sole owner and mutator of the measure state.
///
/// Placed fragments always tile `[0, accumulated)` in insertion order and
/// `accumulated` never exceeds the capacity.
#[derive(Debug, Clone)]
pub struct MeasureBuilder {
    capacity: Beats,
    accumulated: Beats,
    placed: Vec<PlacedFragment>,
}

impl MeasureBuilder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A measure of an arbitrary length. A zero capacity starts out full.
    pub fn with_capacity(capacity: Beats) -> Self {
        Self {
            capacity,
            accumulated: Beats::ZERO,
            placed: Vec::new(),
        }
    }

    pub fn capacity(&self) -> Beats {
        self.capacity
    }

    pub fn accumulated(&self) -> Beats {
        self.accumulated
    }

    pub fn remaining(&self) -> Beats {
        self.capacity.saturating_sub(self.accumulated)
    }

    pub fn placed(&self) -> &[PlacedFragment] {
        &self.placed
    }

    pub fn is_complete(&self) -> bool {
        self.accumulated == self.capacity
    }

    pub fn status(&self) -> MeasureStatus {
        if self.is_complete() {
            MeasureStatus::Full
        } else {
            MeasureStatus::Accepting(self.accumulated)
        }
    }

    /// Whether `fragment` would currently be accepted.
    pub fn fits(&self, fragment: &NoteFragment) -> bool {
        !self.is_complete() && fragment.duration() <= self.remaining()
    }

    /// Accepts `fragment` at the end of the measure or explains why not.
    ///
    /// A rejection leaves the measure untouched.
    pub fn try_add(&mut self, fragment: NoteFragment) -> Result<PlacedFragment, RejectReason> {
        if self.is_complete() {
            tracing::debug!(fragment = %fragment, "rejected: measure already full");
            return Err(RejectReason::AlreadyFull);
        }

        let remaining = self.remaining();
        if fragment.duration() > remaining {
            tracing::debug!(
                fragment = %fragment,
                duration = %fragment.duration(),
                %remaining,
                "rejected: fragment overflows measure"
            );
            return Err(RejectReason::Overflow { remaining });
        }

        let placed = PlacedFragment {
            fragment,
            start: self.accumulated,
            end: self.accumulated + fragment.duration(),
        };
        self.placed.push(placed);
        self.accumulated = placed.end;

        tracing::debug!(
            fragment = %fragment,
            start = %placed.start,
            end = %placed.end,
            complete = self.is_complete(),
            "fragment placed"
        );
        Ok(placed)
    }

    /// Empties the measure and asks `shuffler` to deal a fresh catalog order.
    pub fn reset<S: CatalogShuffler + ?Sized>(&mut self, shuffler: &mut S) {
        self.placed.clear();
        self.accumulated = Beats::ZERO;
        shuffler.reshuffle();
        tracing::info!(capacity = %self.capacity, "measure reset");
    }

    /// Playback order and offsets for the fragments placed so far.
    pub fn build_playback_schedule(&self, beat_duration: Duration) -> PlaybackSchedule {
        PlaybackSchedule::from_placed(&self.placed, beat_duration)
    }
}

impl Default for MeasureBuilder {
    fn default() -> Self {
        Self::new()
    }
}
