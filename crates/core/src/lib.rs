//! Core library for the Rhythm Pizza game.
//!
//! Players fill a fixed-length measure with note and rest fragments. The
//! [`MeasureBuilder`] is the only component that mutates game state: it
//! accepts or rejects each fragment using exact quarter-beat arithmetic and
//! keeps the placed fragments tiled end to end. Everything else (slice
//! angles, SVG geometry, tone cues, playback schedules, feedback text) is a
//! view derived from that state. [`GameSession`] bundles the measure with the
//! shuffled [`Deck`] and a [`GameConfig`] for front ends.

pub mod audio;
pub mod beats;
pub mod catalog;
pub mod config;
pub mod deck;
pub mod error;
pub mod feedback;
pub mod measure;
pub mod render;
pub mod session;
pub mod slice;
pub mod timeline;

pub use audio::{highlight_length, placement_cues, playback_cues, ToneCue, Waveform};
pub use beats::Beats;
pub use catalog::{NoteFragment, NoteValue, CATALOG};
pub use config::{GameConfig, PizzaGeometry, PlaybackConfig};
pub use deck::{CatalogShuffler, Deck};
pub use error::{Result, RhythmError};
pub use feedback::{Feedback, FeedbackKind};
pub use measure::{MeasureBuilder, MeasureStatus, PlacedFragment, RejectReason, DEFAULT_CAPACITY};
pub use render::PizzaRenderer;
pub use session::{GameSession, Placement, Selection};
pub use slice::{compute_angular_span, AngularSpan, Point, SliceGeometry, SliceLabel};
pub use timeline::{PlaybackClock, PlaybackSchedule, ScheduledEntry, Scheduler};
