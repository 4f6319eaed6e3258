//! Shared pipeline logic used by every subcommand.
//!
//! load -> color scale -> join index -> join
//!
//! Loading produces an owned `MapData`; the later stages borrow from it, so
//! callers hold the data and pass it to `prepare`.

use tracing::info;

use crate::data::Loader;
use crate::domain::{MapData, RenderConfig};
use crate::error::AppError;
use crate::join::{JoinIndex, Joined, join_regions};
use crate::render::{self, RenderOptions};
use crate::scale::ColorScale;

/// Everything the renderers need, derived from one `MapData`.
#[derive(Debug, Clone)]
pub struct Prepared<'a> {
    pub data: &'a MapData,
    pub scale: ColorScale,
    pub joined: Joined<'a>,
}

/// Fetch both datasets (sequentially).
pub fn load(config: &RenderConfig) -> Result<MapData, AppError> {
    Loader::new(config)?.fetch_map_data(config)
}

/// Build the color scale and join regions to records.
///
/// With `UnmatchedPolicy::Fail` this returns the join error before any
/// rendering takes place.
pub fn prepare<'a>(config: &RenderConfig, data: &'a MapData) -> Result<Prepared<'a>, AppError> {
    let scale = ColorScale::build(&config.palette, &data.education)?;
    info!(
        min = scale.min_percent,
        max = scale.max_percent,
        step = scale.step,
        "color scale built"
    );

    let index = JoinIndex::build(&data.education)?;
    let joined = join_regions(&data.counties, &data.education, &index, config.unmatched)?;
    info!(
        indexed = index.len(),
        rendered = joined.regions.len(),
        matched = joined.matched_count(),
        unmatched = joined.unmatched_regions.len(),
        "regions joined"
    );

    Ok(Prepared { data, scale, joined })
}

impl Prepared<'_> {
    pub fn render(&self, config: &RenderConfig) -> String {
        render::render_document(
            &self.joined,
            &self.data.states,
            &self.scale,
            RenderOptions {
                state_outlines: config.state_outlines,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttainmentRecord, Geometry, Region, RegionId, UnmatchedPolicy};

    fn data() -> MapData {
        let ring = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        MapData {
            counties: vec![
                Region { id: Some(RegionId(1)), geometry: Some(Geometry::Polygon(vec![ring.clone()])) },
                Region { id: Some(RegionId(2)), geometry: Some(Geometry::Polygon(vec![ring.clone()])) },
            ],
            states: vec![Region { id: Some(RegionId(1)), geometry: Some(Geometry::Polygon(vec![ring])) }],
            education: vec![
                AttainmentRecord {
                    fips: RegionId(1),
                    state: "AL".to_string(),
                    area_name: "One".to_string(),
                    bachelors_or_higher: 12.0,
                },
                AttainmentRecord {
                    fips: RegionId(2),
                    state: "AL".to_string(),
                    area_name: "Two".to_string(),
                    bachelors_or_higher: 40.0,
                },
            ],
        }
    }

    #[test]
    fn prepare_and_render_with_state_outlines() {
        let data = data();
        let config = RenderConfig {
            state_outlines: true,
            ..RenderConfig::default()
        };
        let prepared = prepare(&config, &data).unwrap();
        assert_eq!(prepared.joined.matched_count(), 2);

        let svg = prepared.render(&config);
        assert!(svg.contains("<g id=\"states\""));
        assert!(svg.contains("class=\"state\""));
    }

    #[test]
    fn fail_policy_stops_before_render() {
        let mut data = data();
        data.counties.push(Region { id: Some(RegionId(3)), geometry: None });
        let config = RenderConfig {
            unmatched: UnmatchedPolicy::Fail,
            ..RenderConfig::default()
        };
        let err = prepare(&config, &data).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_JOIN);
    }

    #[test]
    fn empty_education_is_rejected_up_front() {
        let mut data = data();
        data.education.clear();
        let err = prepare(&RenderConfig::default(), &data).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
