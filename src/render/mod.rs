//! SVG rendering: county map, optional state outlines, legend and tooltip.

pub mod legend;
pub mod map;
pub mod path;
pub mod svg;
pub mod tooltip;

use crate::domain::Region;
use crate::join::Joined;
use crate::scale::ColorScale;

use path::PathGenerator;
use svg::{Element, SvgWriter};

pub const WIDTH: u32 = 850;
pub const HEIGHT: u32 = 550;
/// Extra room added to the view box on each axis.
pub const VIEWBOX_PADDING: u32 = 100;

/// Two-decimal percentage label, as used for `data-education` and ticks.
///
/// Exact halfway values (odd multiples of 1/8) round away from zero.
pub fn format_percent(v: f64) -> String {
    if (v * 8.0).fract() == 0.0 && (v * 4.0).fract() != 0.0 {
        return format!("{:.2}", (v * 100.0).round() / 100.0);
    }
    format!("{v:.2}")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub state_outlines: bool,
}

/// Render the complete standalone SVG document.
pub fn render_document(
    joined: &Joined<'_>,
    states: &[Region],
    scale: &ColorScale,
    options: RenderOptions,
) -> String {
    let paths = PathGenerator::default();
    let mut w = SvgWriter::new();

    w.open(
        Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("id", "chloropleth-map")
            .attr("width", WIDTH)
            .attr("height", HEIGHT)
            .attr(
                "viewBox",
                format!("0 0 {} {}", WIDTH + VIEWBOX_PADDING, HEIGHT + VIEWBOX_PADDING),
            ),
    );

    map::write_counties(&mut w, &joined.regions, scale, &paths);
    if options.state_outlines {
        map::write_states(&mut w, states, &paths);
    }
    legend::write_legend(&mut w, scale);
    tooltip::write_tooltip(&mut w);
    tooltip::write_script(&mut w);

    w.finish()
}
