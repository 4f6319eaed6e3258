//! Legend swatches and bottom axis.
//!
//! The axis mirrors a conventional bottom axis: a domain path with outer
//! ticks, then one tick group per threshold with a line and a label below it.

use crate::render::format_percent;
use crate::render::svg::{Element, SvgWriter, num};
use crate::scale::{ColorScale, LinearScale};

pub const LEGEND_X: f64 = 650.0;
pub const LEGEND_Y: f64 = 30.0;
pub const LEGEND_WIDTH: f64 = 200.0;

const TICK_SIZE: f64 = 10.0;
const TICK_PADDING: f64 = 3.0;
/// Half-pixel shift so one-pixel strokes land on pixel centers.
const CRISP_OFFSET: f64 = 0.5;

pub fn write_legend(w: &mut SvgWriter, scale: &ColorScale) {
    let n = scale.buckets.len().max(1) as f64;
    let swatch = LEGEND_WIDTH / n;
    let x = LinearScale::new([scale.min_percent, scale.max_percent], [0.0, LEGEND_WIDTH]);

    w.open(
        Element::new("g")
            .attr("id", "legend")
            .attr("transform", format!("translate({},{})", num(LEGEND_X), num(LEGEND_Y))),
    );

    w.open(Element::new("g"));
    for bucket in &scale.buckets {
        w.leaf(
            Element::new("rect")
                .attr("x", num(x.map(bucket.step_value)))
                .attr("y", 0)
                .attr("width", num(swatch))
                .attr("height", num(swatch))
                .attr("fill", &bucket.color)
                .attr("data-color", &bucket.color),
        );
    }
    w.close();

    w.open(
        Element::new("g")
            .attr("transform", format!("translate(0,{})", num(swatch)))
            .attr("fill", "none")
            .attr("font-size", 10)
            .attr("font-family", "sans-serif")
            .attr("text-anchor", "middle"),
    );

    let [r0, r1] = x.range;
    w.leaf(
        Element::new("path")
            .attr("class", "domain")
            .attr("stroke", "currentColor")
            .attr(
                "d",
                format!(
                    "M{},{}V{}H{}V{}",
                    num(r0 + CRISP_OFFSET),
                    num(TICK_SIZE),
                    num(CRISP_OFFSET),
                    num(r1 + CRISP_OFFSET),
                    num(TICK_SIZE)
                ),
            ),
    );

    for t in scale.thresholds() {
        w.open(
            Element::new("g")
                .attr("class", "tick")
                .attr("opacity", 1)
                .attr("transform", format!("translate({},0)", num(x.map(t) + CRISP_OFFSET))),
        );
        w.leaf(Element::new("line").attr("stroke", "currentColor").attr("y2", num(TICK_SIZE)));
        w.text(
            Element::new("text")
                .attr("fill", "currentColor")
                .attr("y", num(TICK_SIZE + TICK_PADDING))
                .attr("dy", "0.71em"),
            &format_percent(t),
        );
        w.close();
    }

    w.close();
    w.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Palette;

    #[test]
    fn swatches_and_ticks_sit_on_thresholds() {
        let scale = ColorScale::from_values(&Palette::default(), [10.0, 50.0, 90.0]).unwrap();
        let mut w = SvgWriter::new();
        write_legend(&mut w, &scale);
        let out = w.finish();

        assert!(out.contains("<g id=\"legend\" transform=\"translate(650,30)\">"));
        // 74 maps to (74 - 10) / 80 * 200 = 160.
        assert!(out.contains("<rect x=\"160\" y=\"0\" width=\"40\" height=\"40\" fill=\"#ffbaba\" data-color=\"#ffbaba\"/>"));
        assert!(out.contains("<rect x=\"0\" y=\"0\" width=\"40\" height=\"40\" fill=\"#a70000\""));
        assert!(out.contains("d=\"M0.5,10V0.5H200.5V10\""));
        assert!(out.contains("transform=\"translate(160.5,0)\""));
        assert_eq!(out.matches("class=\"tick\"").count(), 5);
        for label in ["74.00", "58.00", "42.00", "26.00", "10.00"] {
            assert!(out.contains(&format!(">{label}</text>")), "missing tick {label}");
        }
    }
}
