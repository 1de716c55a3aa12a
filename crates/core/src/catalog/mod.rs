//! Static catalog of the note and rest fragments a player can choose from.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Beats, RhythmError};

/// Rhythmic value shared by a note and its matching rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteValue {
    Whole,
    DottedHalf,
    Half,
    DottedQuarter,
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteValue {
    /// All values, longest first.
    pub const ALL: [NoteValue; 7] = [
        NoteValue::Whole,
        NoteValue::DottedHalf,
        NoteValue::Half,
        NoteValue::DottedQuarter,
        NoteValue::Quarter,
        NoteValue::Eighth,
        NoteValue::Sixteenth,
    ];

    pub const fn duration(self) -> Beats {
        match self {
            NoteValue::Whole => Beats::whole(4),
            NoteValue::DottedHalf => Beats::whole(3),
            NoteValue::Half => Beats::whole(2),
            NoteValue::DottedQuarter => Beats::from_quarters(6),
            NoteValue::Quarter => Beats::whole(1),
            NoteValue::Eighth => Beats::from_quarters(2),
            NoteValue::Sixteenth => Beats::from_quarters(1),
        }
    }

    /// Frequencies (Hz) sounded when a note of this value is placed or played.
    pub const fn tones(self) -> &'static [f32] {
        match self {
            NoteValue::Whole => &[262.0, 330.0, 392.0],
            NoteValue::DottedHalf => &[294.0, 370.0, 440.0],
            NoteValue::Half => &[330.0, 392.0],
            NoteValue::DottedQuarter => &[349.0, 440.0],
            NoteValue::Quarter => &[392.0],
            NoteValue::Eighth => &[440.0],
            NoteValue::Sixteenth => &[494.0],
        }
    }

    const fn name(self) -> &'static str {
        match self {
            NoteValue::Whole => "whole",
            NoteValue::DottedHalf => "dotted half",
            NoteValue::Half => "half",
            NoteValue::DottedQuarter => "dotted quarter",
            NoteValue::Quarter => "quarter",
            NoteValue::Eighth => "eighth",
            NoteValue::Sixteenth => "sixteenth",
        }
    }
}

/// A note or rest from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NoteFragment {
    value: NoteValue,
    rest: bool,
}

/// The fourteen fragments offered by the game: seven notes, then their rests.
pub const CATALOG: [NoteFragment; 14] = [
    NoteFragment::note(NoteValue::Whole),
    NoteFragment::note(NoteValue::DottedHalf),
    NoteFragment::note(NoteValue::Half),
    NoteFragment::note(NoteValue::DottedQuarter),
    NoteFragment::note(NoteValue::Quarter),
    NoteFragment::note(NoteValue::Eighth),
    NoteFragment::note(NoteValue::Sixteenth),
    NoteFragment::rest(NoteValue::Whole),
    NoteFragment::rest(NoteValue::DottedHalf),
    NoteFragment::rest(NoteValue::Half),
    NoteFragment::rest(NoteValue::DottedQuarter),
    NoteFragment::rest(NoteValue::Quarter),
    NoteFragment::rest(NoteValue::Eighth),
    NoteFragment::rest(NoteValue::Sixteenth),
];

impl NoteFragment {
    pub const fn note(value: NoteValue) -> Self {
        Self { value, rest: false }
    }

    pub const fn rest(value: NoteValue) -> Self {
        Self { value, rest: true }
    }

    pub const fn value(&self) -> NoteValue {
        self.value
    }

    pub const fn is_rest(&self) -> bool {
        self.rest
    }

    pub const fn duration(&self) -> Beats {
        self.value.duration()
    }

    /// Tones to sound for this fragment; empty for rests.
    pub const fn tones(&self) -> &'static [f32] {
        if self.rest {
            &[]
        } else {
            self.value.tones()
        }
    }

    /// Stable identifier such as `quarter` or `dotted-half-rest`.
    pub const fn id(&self) -> &'static str {
        match (self.value, self.rest) {
            (NoteValue::Whole, false) => "whole",
            (NoteValue::DottedHalf, false) => "dotted-half",
            (NoteValue::Half, false) => "half",
            (NoteValue::DottedQuarter, false) => "dotted-quarter",
            (NoteValue::Quarter, false) => "quarter",
            (NoteValue::Eighth, false) => "eighth",
            (NoteValue::Sixteenth, false) => "sixteenth",
            (NoteValue::Whole, true) => "whole-rest",
            (NoteValue::DottedHalf, true) => "dotted-half-rest",
            (NoteValue::Half, true) => "half-rest",
            (NoteValue::DottedQuarter, true) => "dotted-quarter-rest",
            (NoteValue::Quarter, true) => "quarter-rest",
            (NoteValue::Eighth, true) => "eighth-rest",
            (NoteValue::Sixteenth, true) => "sixteenth-rest",
        }
    }

    pub fn display_name(&self) -> String {
        let kind = if self.rest { "rest" } else { "note" };
        format!("{} {kind}", self.value.name())
    }

    /// Unicode music symbol drawn on the card and the slice.
    pub const fn symbol(&self) -> &'static str {
        match (self.value, self.rest) {
            (NoteValue::Whole, false) => "\u{1D15D}",
            (NoteValue::DottedHalf, false) => "\u{1D15E}.",
            (NoteValue::Half, false) => "\u{1D15E}",
            (NoteValue::DottedQuarter, false) => "\u{2669}.",
            (NoteValue::Quarter, false) => "\u{2669}",
            (NoteValue::Eighth, false) => "\u{266A}",
            (NoteValue::Sixteenth, false) => "\u{1D161}",
            (NoteValue::Whole, true) => "\u{1D13B}",
            (NoteValue::DottedHalf, true) => "\u{1D13C}.",
            (NoteValue::Half, true) => "\u{1D13C}",
            (NoteValue::DottedQuarter, true) => "\u{1D13D}.",
            (NoteValue::Quarter, true) => "\u{1D13D}",
            (NoteValue::Eighth, true) => "\u{1D13E}",
            (NoteValue::Sixteenth, true) => "\u{1D13F}",
        }
    }
}

impl fmt::Display for NoteFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for NoteFragment {
    type Err = RhythmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        CATALOG
            .iter()
            .copied()
            .find(|fragment| fragment.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| RhythmError::UnknownFragment(id.to_string()))
    }
}

impl From<NoteFragment> for String {
    fn from(value: NoteFragment) -> Self {
        value.id().to_string()
    }
}

impl TryFrom<String> for NoteFragment {
    type Error = RhythmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_ids_are_unique_and_parse_back() {
        let ids: HashSet<_> = CATALOG.iter().map(NoteFragment::id).collect();
        assert_eq!(ids.len(), CATALOG.len());

        for fragment in CATALOG {
            assert_eq!(fragment.id().parse::<NoteFragment>().unwrap(), fragment);
        }
    }

    #[test]
    fn rests_share_durations_with_their_notes_but_stay_silent() {
        for value in NoteValue::ALL {
            let note = NoteFragment::note(value);
            let rest = NoteFragment::rest(value);
            assert_eq!(note.duration(), rest.duration());
            assert!(!note.tones().is_empty());
            assert!(rest.tones().is_empty());
        }
    }

    #[test]
    fn durations_match_catalog_values() {
        let beats: Vec<f64> = NoteValue::ALL
            .iter()
            .map(|value| value.duration().as_f64())
            .collect();
        assert_eq!(beats, vec![4.0, 3.0, 2.0, 1.5, 1.0, 0.5, 0.25]);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let err = "triplet".parse::<NoteFragment>().unwrap_err();
        assert!(matches!(err, RhythmError::UnknownFragment(ref id) if id == "triplet"));
    }

    #[test]
    fn serialises_as_id() {
        let fragment = NoteFragment::rest(NoteValue::DottedQuarter);
        let json = serde_json::to_string(&fragment).unwrap();
        assert_eq!(json, "\"dotted-quarter-rest\"");
        assert_eq!(serde_json::from_str::<NoteFragment>(&json).unwrap(), fragment);
    }

    #[test]
    fn display_names_describe_kind() {
        assert_eq!(
            NoteFragment::rest(NoteValue::DottedHalf).display_name(),
            "dotted half rest"
        );
        assert_eq!(NoteFragment::note(NoteValue::Eighth).display_name(), "eighth note");
    }
}
