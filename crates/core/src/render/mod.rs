use std::fmt::Write as _;

use crate::{Beats, PizzaGeometry, PlacedFragment, SliceGeometry};

/// Builds a standalone SVG drawing of the pizza for a set of placed fragments.
#[derive(Debug, Clone)]
pub struct PizzaRenderer {
    geometry: PizzaGeometry,
    capacity: Beats,
}

impl PizzaRenderer {
    pub fn new(geometry: PizzaGeometry, capacity: Beats) -> Self {
        Self { geometry, capacity }
    }

    pub fn slices(&self, placed: &[PlacedFragment]) -> Vec<SliceGeometry> {
        placed
            .iter()
            .map(|placed| SliceGeometry::new(*placed, self.capacity, &self.geometry))
            .collect()
    }

    /// Complete SVG document; `highlight` brightens the slice at that index.
    pub fn draw(&self, placed: &[PlacedFragment], highlight: Option<usize>) -> String {
        let g = &self.geometry;
        let size = 2.0 * g.center_x.max(g.center_y);
        let mut svg = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}">"#
        );
        let _ = writeln!(
            svg,
            r##"  <defs><radialGradient id="sliceGradient"><stop offset="0%" stop-color="#ffd54f"/><stop offset="100%" stop-color="#ff8a50"/></radialGradient></defs>"##
        );
        let _ = writeln!(
            svg,
            r##"  <circle cx="{}" cy="{}" r="{}" fill="#f5deb3" stroke="#d7a86e" stroke-width="4"/>"##,
            g.center_x, g.center_y, g.outer_radius
        );
        let _ = writeln!(svg, r#"  <g id="pizzaSlices">"#);

        for (index, slice) in self.slices(placed).iter().enumerate() {
            let style = if highlight == Some(index) {
                r#" style="filter: brightness(1.4)""#
            } else {
                ""
            };
            let _ = writeln!(
                svg,
                r#"    <path d="{}" fill="{}" stroke="rgba(255,255,255,0.5)" stroke-width="2" data-note="{}"{style}/>"#,
                slice.svg_path(),
                slice.fill,
                slice.placed.fragment.id(),
            );
            if let Some(label) = &slice.label {
                let _ = writeln!(
                    svg,
                    r#"    <text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="{:.1}" fill="white">{}</text>"#,
                    label.position.x,
                    label.position.y + 5.0,
                    label.font_size,
                    label.symbol,
                );
            }
        }

        let _ = writeln!(svg, "  </g>");
        svg.push_str("</svg>\n");
        svg
    }
}
