use crate::Beats;

/// Result alias that carries the custom [`RhythmError`] type.
pub type Result<T> = std::result::Result<T, RhythmError>;

/// Common error type for the core crate.
///
/// Routine rejections from the measure (a full pizza, a slice that does not
/// fit) are not errors; they are reported through
/// [`RejectReason`](crate::RejectReason). This type covers contract
/// violations and the failures of the surrounding plumbing.
#[derive(Debug, thiserror::Error)]
pub enum RhythmError {
    /// Free-form message for failures that do not warrant their own variant.
    #[error("{0}")]
    Message(String),
    /// A fragment id that is not part of the catalog.
    #[error("unknown fragment `{0}`")]
    UnknownFragment(String),
    /// A beat value that cannot be represented in quarter-beat units.
    #[error("{0} is not a non-negative multiple of a quarter beat")]
    InvalidBeats(f64),
    /// Configuration rejected by [`GameConfig::validate`](crate::GameConfig::validate).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Playback was requested before the measure was filled.
    #[error("measure holds {accumulated} of {capacity} beats; fill it before playing")]
    NotComplete { accumulated: Beats, capacity: Beats },
    /// A deck position outside the offered cards.
    #[error("no card at position {position}; the deck holds {len} cards")]
    NoSuchCard { position: usize, len: usize },
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl RhythmError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for RhythmError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for RhythmError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_complete_mentions_both_counts() {
        let err = RhythmError::NotComplete {
            accumulated: Beats::from_quarters(6),
            capacity: Beats::whole(4),
        };

        assert_eq!(
            err.to_string(),
            "measure holds 1.5 of 4 beats; fill it before playing"
        );
    }

    #[test]
    fn string_conversions_wrap_messages() {
        let err: RhythmError = "boom".into();
        assert!(matches!(err, RhythmError::Message(ref m) if m == "boom"));
    }
}
