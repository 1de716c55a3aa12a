use std::time::Duration;

use crate::{beats::QUARTERS_PER_BEAT, Beats, PlacedFragment};

/// Wall-clock length of `beats` at the given beat duration.
pub fn beats_to_duration(beats: Beats, beat_duration: Duration) -> Duration {
    beat_duration * beats.quarters() / QUARTERS_PER_BEAT
}

/// One fragment of the measure positioned in playback time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEntry {
    /// Position of the fragment (and its slice) in placement order.
    pub index: usize,
    pub placed: PlacedFragment,
    pub offset: Duration,
    pub length: Duration,
    /// Rests advance the timeline without sounding.
    pub silent: bool,
}

impl ScheduledEntry {
    pub fn end(&self) -> Duration {
        self.offset + self.length
    }

    pub fn tones(&self) -> &'static [f32] {
        self.placed.fragment.tones()
    }
}

/// Ordered playback plan derived from a measure's placed fragments.
///
/// The plan is plain data; executing it with timers is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSchedule {
    entries: Vec<ScheduledEntry>,
}

impl PlaybackSchedule {
    pub fn from_placed(placed: &[PlacedFragment], beat_duration: Duration) -> Self {
        let mut offset = Duration::ZERO;
        let entries = placed
            .iter()
            .enumerate()
            .map(|(index, placed)| {
                let length = beats_to_duration(placed.duration(), beat_duration);
                let entry = ScheduledEntry {
                    index,
                    placed: *placed,
                    offset,
                    length,
                    silent: placed.fragment.is_rest(),
                };
                offset += length;
                entry
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduledEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEntry> + '_ {
        self.entries.iter()
    }

    /// Entries that produce sound.
    pub fn audible(&self) -> impl Iterator<Item = &ScheduledEntry> + '_ {
        self.entries.iter().filter(|entry| !entry.silent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_duration(&self) -> Duration {
        self.entries
            .last()
            .map(ScheduledEntry::end)
            .unwrap_or(Duration::ZERO)
    }
}

impl<'a> IntoIterator for &'a PlaybackSchedule {
    type Item = &'a ScheduledEntry;
    type IntoIter = std::slice::Iter<'a, ScheduledEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Elapsed playback time, advanced by whoever drives the schedule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackClock {
    pub elapsed: Duration,
}

impl PlaybackClock {
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed += delta;
    }
}

/// Cursor over a [`PlaybackSchedule`] that releases entries as a clock passes them.
#[derive(Debug, Default)]
pub struct Scheduler {
    schedule: PlaybackSchedule,
    next_entry: usize,
}

impl Scheduler {
    pub fn new(schedule: PlaybackSchedule) -> Self {
        Self {
            schedule,
            next_entry: 0,
        }
    }

    pub fn schedule(&self) -> &PlaybackSchedule {
        &self.schedule
    }

    /// Rewinds to the first entry.
    pub fn restart(&mut self) {
        self.next_entry = 0;
    }

    /// Returns every entry whose offset the clock has reached since the last tick.
    pub fn tick(&mut self, clock: &PlaybackClock) -> &[ScheduledEntry] {
        let start = self.next_entry;
        let entries = self.schedule.entries();
        while let Some(entry) = entries.get(self.next_entry) {
            if entry.offset > clock.elapsed {
                break;
            }
            self.next_entry += 1;
        }
        &entries[start..self.next_entry]
    }

    pub fn is_finished(&self) -> bool {
        self.next_entry >= self.schedule.len()
    }
}
