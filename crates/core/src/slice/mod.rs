//! Mapping of beat intervals onto slices of the pizza.
//!
//! Angles are in degrees, measured clockwise from 12 o'clock, so the first
//! fragment of a measure always starts at the top of the pizza.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{Beats, PizzaGeometry, PlacedFragment};

/// Spans narrower than this carry no symbol label.
const LABEL_MIN_SWEEP_DEG: f64 = 30.0;
const LABEL_MAX_FONT_SIZE: f64 = 20.0;

pub const NOTE_FILL: &str = "url(#sliceGradient)";
pub const REST_FILL: &str = "#b0bec5";

/// Angular interval `[start_deg, end_deg)` covered by a slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularSpan {
    pub start_deg: f64,
    pub end_deg: f64,
}

impl AngularSpan {
    pub fn sweep(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

/// Angular interval of the beat interval `[start, end)` in a measure of
/// `capacity` beats. Adjacent intervals produce adjacent spans with
/// bit-identical shared edges.
pub fn compute_angular_span(start: Beats, end: Beats, capacity: Beats) -> AngularSpan {
    AngularSpan {
        start_deg: beat_to_degrees(start, capacity),
        end_deg: beat_to_degrees(end, capacity),
    }
}

pub fn span_of(placed: &PlacedFragment, capacity: Beats) -> AngularSpan {
    compute_angular_span(placed.start, placed.end, capacity)
}

fn beat_to_degrees(beat: Beats, capacity: Beats) -> f64 {
    if capacity.is_zero() {
        return 0.0;
    }
    f64::from(beat.quarters()) * 360.0 / f64::from(capacity.quarters())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn on_circle(geometry: &PizzaGeometry, radius: f64, angle_deg: f64) -> Self {
        let rad = (angle_deg - 90.0) * PI / 180.0;
        Self {
            x: geometry.center_x + radius * rad.cos(),
            y: geometry.center_y + radius * rad.sin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceLabel {
    pub position: Point,
    pub font_size: f64,
    pub symbol: &'static str,
}

/// Drawable annular sector for one placed fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceGeometry {
    pub placed: PlacedFragment,
    pub span: AngularSpan,
    pub center: Point,
    pub outer_start: Point,
    pub outer_end: Point,
    pub inner_end: Point,
    pub inner_start: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub large_arc: bool,
    pub fill: &'static str,
    pub label: Option<SliceLabel>,
}

impl SliceGeometry {
    pub fn new(placed: PlacedFragment, capacity: Beats, geometry: &PizzaGeometry) -> Self {
        let span = span_of(&placed, capacity);
        let outer = geometry.outer_radius;
        let inner = geometry.inner_radius;

        let label = (span.sweep() > LABEL_MIN_SWEEP_DEG).then(|| SliceLabel {
            position: Point::on_circle(geometry, (outer + inner) / 2.0, span.mid_deg()),
            font_size: LABEL_MAX_FONT_SIZE.min(span.sweep() / 5.0),
            symbol: placed.fragment.symbol(),
        });

        Self {
            placed,
            span,
            center: Point {
                x: geometry.center_x,
                y: geometry.center_y,
            },
            outer_start: Point::on_circle(geometry, outer, span.start_deg),
            outer_end: Point::on_circle(geometry, outer, span.end_deg),
            inner_end: Point::on_circle(geometry, inner, span.end_deg),
            inner_start: Point::on_circle(geometry, inner, span.start_deg),
            outer_radius: outer,
            inner_radius: inner,
            large_arc: span.sweep() > 180.0,
            fill: if placed.fragment.is_rest() {
                REST_FILL
            } else {
                NOTE_FILL
            },
            label,
        }
    }

    /// SVG path data tracing the outer arc clockwise and the inner arc back.
    ///
    /// A full 360° sweep collapses both arcs to a point, so it is drawn as two
    /// half arcs per ring.
    pub fn svg_path(&self) -> String {
        let large = u8::from(self.large_arc);
        let (ro, ri) = (self.outer_radius, self.inner_radius);
        let (o1, o2, i2, i1) = (
            self.outer_start,
            self.outer_end,
            self.inner_end,
            self.inner_start,
        );

        if self.span.sweep() >= 360.0 {
            let opposite = |p: Point| Point {
                x: 2.0 * self.center.x - p.x,
                y: 2.0 * self.center.y - p.y,
            };
            let (o_mid, i_mid) = (opposite(o1), opposite(i1));
            return format!(
                "M {:.2} {:.2} A {ro:.2} {ro:.2} 0 1 1 {:.2} {:.2} A {ro:.2} {ro:.2} 0 1 1 {:.2} {:.2} \
                 L {:.2} {:.2} A {ri:.2} {ri:.2} 0 1 0 {:.2} {:.2} A {ri:.2} {ri:.2} 0 1 0 {:.2} {:.2} Z",
                o1.x, o1.y, o_mid.x, o_mid.y, o2.x, o2.y, i2.x, i2.y, i_mid.x, i_mid.y, i1.x, i1.y,
            );
        }

        format!(
            "M {:.2} {:.2} A {ro:.2} {ro:.2} 0 {large} 1 {:.2} {:.2} \
             L {:.2} {:.2} A {ri:.2} {ri:.2} 0 {large} 0 {:.2} {:.2} Z",
            o1.x, o1.y, o2.x, o2.y, i2.x, i2.y, i1.x, i1.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MeasureBuilder, NoteFragment, NoteValue};

    fn placed(value: NoteValue, start: u32) -> PlacedFragment {
        let fragment = NoteFragment::note(value);
        PlacedFragment {
            fragment,
            start: Beats::from_quarters(start),
            end: Beats::from_quarters(start) + fragment.duration(),
        }
    }

    #[test]
    fn second_beat_covers_the_second_quadrant() {
        let span = compute_angular_span(Beats::whole(1), Beats::whole(2), Beats::whole(4));
        assert_eq!(span, AngularSpan { start_deg: 90.0, end_deg: 180.0 });
    }

    #[test]
    fn spans_tile_the_filled_part_of_the_circle() {
        let mut measure = MeasureBuilder::new();
        for value in [
            NoteValue::Sixteenth,
            NoteValue::DottedQuarter,
            NoteValue::Eighth,
            NoteValue::Quarter,
        ] {
            measure.try_add(NoteFragment::note(value)).unwrap();
        }

        let spans: Vec<_> = measure
            .placed()
            .iter()
            .map(|p| span_of(p, measure.capacity()))
            .collect();
        assert_eq!(spans[0].start_deg, 0.0);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end_deg, pair[1].start_deg);
            assert!(pair[0].sweep() > 0.0);
        }
        let expected_end = measure.accumulated().as_f64() * 90.0;
        assert_eq!(spans.last().unwrap().end_deg, expected_end);
    }

    #[test]
    fn quarter_slice_points_start_at_twelve_o_clock() {
        let geometry = PizzaGeometry::default();
        let slice = SliceGeometry::new(placed(NoteValue::Quarter, 0), Beats::whole(4), &geometry);

        assert!((slice.outer_start.x - 150.0).abs() < 1e-9);
        assert!((slice.outer_start.y - 15.0).abs() < 1e-9);
        assert!((slice.outer_end.x - 285.0).abs() < 1e-9);
        assert!((slice.outer_end.y - 150.0).abs() < 1e-9);
        assert!(!slice.large_arc);
        assert_eq!(slice.fill, NOTE_FILL);
    }

    #[test]
    fn narrow_slices_have_no_label() {
        let geometry = PizzaGeometry::default();
        let sixteenth =
            SliceGeometry::new(placed(NoteValue::Sixteenth, 0), Beats::whole(4), &geometry);
        assert!(sixteenth.label.is_none());

        let eighth = SliceGeometry::new(placed(NoteValue::Eighth, 0), Beats::whole(4), &geometry);
        let label = eighth.label.expect("45 degree slice is labelled");
        assert_eq!(label.font_size, 9.0);

        let half = SliceGeometry::new(placed(NoteValue::Half, 0), Beats::whole(4), &geometry);
        assert_eq!(half.label.unwrap().font_size, 20.0);
    }

    #[test]
    fn wide_slices_use_the_large_arc_flag() {
        let geometry = PizzaGeometry::default();
        let slice =
            SliceGeometry::new(placed(NoteValue::DottedHalf, 0), Beats::whole(4), &geometry);
        assert!(slice.large_arc);
        assert!(slice.svg_path().contains(" 0 1 1 "));
    }

    #[test]
    fn rest_slices_are_grey() {
        let geometry = PizzaGeometry::default();
        let fragment = NoteFragment::rest(NoteValue::Half);
        let slice = SliceGeometry::new(
            PlacedFragment {
                fragment,
                start: Beats::ZERO,
                end: fragment.duration(),
            },
            Beats::whole(4),
            &geometry,
        );
        assert_eq!(slice.fill, REST_FILL);
    }

    #[test]
    fn path_starts_on_outer_ring_and_closes() {
        let geometry = PizzaGeometry::default();
        let slice = SliceGeometry::new(placed(NoteValue::Quarter, 4), Beats::whole(4), &geometry);
        let path = slice.svg_path();
        assert!(path.starts_with("M 285.00 150.00 A 135.00 135.00 0 0 1 150.00 285.00"));
        assert!(path.ends_with('Z'));
    }

    #[test]
    fn full_circle_is_drawn_as_two_half_arcs() {
        let geometry = PizzaGeometry::default();
        let slice = SliceGeometry::new(placed(NoteValue::Whole, 0), Beats::whole(4), &geometry);
        let path = slice.svg_path();
        assert!(path.contains("150.00 285.00"));
        assert_eq!(path.matches(" A ").count(), 4);
    }
}
