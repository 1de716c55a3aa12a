use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

use crate::RhythmError;

/// Number of [`Beats`] units in one beat.
pub const QUARTERS_PER_BEAT: u32 = 4;

/// Exact musical duration counted in quarter beats (one sixteenth note).
///
/// Every fragment in the catalog is a whole multiple of a quarter beat, so
/// sums and comparisons stay exact and a measure filled with sixteenths
/// completes on exactly the same beat as one filled with a whole note.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "f64", try_from = "f64")]
pub struct Beats(u32);

impl Beats {
    pub const ZERO: Beats = Beats(0);

    /// Duration of `quarters` sixteenth notes.
    pub const fn from_quarters(quarters: u32) -> Self {
        Self(quarters)
    }

    /// Duration of `beats` whole beats.
    pub const fn whole(beats: u32) -> Self {
        Self(beats * QUARTERS_PER_BEAT)
    }

    pub const fn quarters(self) -> u32 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(QUARTERS_PER_BEAT)
    }

    pub fn checked_sub(self, rhs: Beats) -> Option<Beats> {
        self.0.checked_sub(rhs.0).map(Beats)
    }

    pub fn saturating_sub(self, rhs: Beats) -> Beats {
        Beats(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Beats {
    type Output = Beats;

    fn add(self, rhs: Beats) -> Beats {
        Beats(self.0 + rhs.0)
    }
}

impl AddAssign for Beats {
    fn add_assign(&mut self, rhs: Beats) {
        self.0 += rhs.0;
    }
}

impl Sum for Beats {
    fn sum<I: Iterator<Item = Beats>>(iter: I) -> Beats {
        iter.fold(Beats::ZERO, Add::add)
    }
}

impl From<Beats> for f64 {
    fn from(value: Beats) -> Self {
        value.as_f64()
    }
}

impl TryFrom<f64> for Beats {
    type Error = RhythmError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let scaled = value * f64::from(QUARTERS_PER_BEAT);
        if !scaled.is_finite() || scaled < 0.0 || scaled.fract() != 0.0 || scaled > f64::from(u32::MAX)
        {
            return Err(RhythmError::InvalidBeats(value));
        }
        Ok(Beats(scaled as u32))
    }
}

impl fmt::Display for Beats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / QUARTERS_PER_BEAT;
        match self.0 % QUARTERS_PER_BEAT {
            0 => write!(f, "{whole}"),
            1 => write!(f, "{whole}.25"),
            2 => write!(f, "{whole}.5"),
            _ => write!(f, "{whole}.75"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_like_decimal_beats() {
        assert_eq!(Beats::whole(4).to_string(), "4");
        assert_eq!(Beats::from_quarters(6).to_string(), "1.5");
        assert_eq!(Beats::from_quarters(1).to_string(), "0.25");
        assert_eq!(Beats::from_quarters(3).to_string(), "0.75");
    }

    #[test]
    fn eight_eighths_sum_to_exactly_four_beats() {
        let total: Beats = std::iter::repeat(Beats::from_quarters(2)).take(8).sum();
        assert_eq!(total, Beats::whole(4));
    }

    #[test]
    fn converts_from_quarter_multiples_only() {
        assert_eq!(Beats::try_from(1.5).unwrap(), Beats::from_quarters(6));
        assert_eq!(Beats::try_from(0.0).unwrap(), Beats::ZERO);
        assert!(Beats::try_from(0.3).is_err());
        assert!(Beats::try_from(-1.0).is_err());
        assert!(Beats::try_from(f64::NAN).is_err());
    }

    #[test]
    fn serialises_as_decimal_number() {
        let json = serde_json::to_string(&Beats::from_quarters(2)).unwrap();
        assert_eq!(json, "0.5");

        let parsed: Beats = serde_json::from_str("2.75").unwrap();
        assert_eq!(parsed, Beats::from_quarters(11));
        assert!(serde_json::from_str::<Beats>("0.1").is_err());
    }

    #[test]
    fn subtraction_never_underflows() {
        let one = Beats::whole(1);
        let three = Beats::whole(3);
        assert_eq!(three.checked_sub(one), Some(Beats::whole(2)));
        assert_eq!(one.checked_sub(three), None);
        assert_eq!(one.saturating_sub(three), Beats::ZERO);
    }
}
