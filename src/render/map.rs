//! County and state layers.

use crate::domain::{Region, UNMATCHED_FILL};
use crate::join::JoinedRegion;
use crate::render::format_percent;
use crate::render::path::PathGenerator;
use crate::render::svg::{Element, SvgWriter};
use crate::scale::ColorScale;

/// One `<path class="county">` per joined region, in topology order.
///
/// Matched regions carry `data-fips`, `data-education` and `data-name` from
/// their record; unmatched ones are marked `data-unmatched` instead.
pub fn write_counties(w: &mut SvgWriter, regions: &[JoinedRegion<'_>], scale: &ColorScale, paths: &PathGenerator) {
    w.open(Element::new("g").attr("id", "counties"));

    for joined in regions {
        let Some(d) = joined.region.geometry.as_ref().and_then(|g| paths.path(g)) else {
            continue;
        };

        let el = match joined.record {
            Some(rec) => Element::new("path")
                .attr("class", "county")
                .attr("d", d)
                .attr("fill", scale.resolve(rec.bachelors_or_higher))
                .attr("data-fips", rec.fips)
                .attr("data-education", format_percent(rec.bachelors_or_higher))
                .attr("data-name", &rec.area_name)
                .attr("data-state", &rec.state),
            None => Element::new("path")
                .attr("class", "county unmatched")
                .attr("d", d)
                .attr("fill", UNMATCHED_FILL)
                .attr_opt("data-fips", joined.region.id)
                .attr("data-unmatched", "true"),
        };
        w.leaf(el);
    }

    w.close();
}

/// State outlines drawn above the counties; never filled.
pub fn write_states(w: &mut SvgWriter, states: &[Region], paths: &PathGenerator) {
    w.open(
        Element::new("g")
            .attr("id", "states")
            .attr("fill", "none")
            .attr("stroke", "#ffffff")
            .attr("stroke-linejoin", "round")
            .attr("pointer-events", "none"),
    );

    for state in states {
        if let Some(d) = state.geometry.as_ref().and_then(|g| paths.path(g)) {
            w.leaf(
                Element::new("path")
                    .attr("class", "state")
                    .attr("d", d)
                    .attr_opt("data-fips", state.id),
            );
        }
    }

    w.close();
}
