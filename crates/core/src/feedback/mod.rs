//! Player-facing messages for each game outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Beats, NoteFragment, RejectReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    fn new(kind: FeedbackKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn rejected(fragment: &NoteFragment, reason: &RejectReason) -> Self {
        match reason {
            RejectReason::AlreadyFull => {
                Self::new(FeedbackKind::Warning, "The pizza is already complete!")
            }
            RejectReason::Overflow { remaining } => Self::new(
                FeedbackKind::Error,
                format!(
                    "{} beats is too big! Space left: {remaining} beats",
                    fragment.duration()
                ),
            ),
        }
    }

    pub fn completed(capacity: Beats) -> Self {
        Self::new(
            FeedbackKind::Success,
            format!("A perfect {capacity}/4 pizza!"),
        )
    }

    pub fn not_complete(capacity: Beats) -> Self {
        Self::new(
            FeedbackKind::Warning,
            format!("Fill all {capacity} beats first!"),
        )
    }

    pub fn reshuffled() -> Self {
        Self::new(FeedbackKind::Success, "New order, fresh pizza!")
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Goal line shown above the pizza.
pub fn mission_text(capacity: Beats, complete: bool) -> String {
    if complete {
        "Complete! Press play to hear it.".to_string()
    } else {
        format!("Fill a {capacity}/4 measure!")
    }
}
