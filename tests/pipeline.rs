use std::path::PathBuf;

use edu_choropleth::app::pipeline;
use edu_choropleth::domain::{RenderConfig, Source, UnmatchedPolicy};
use edu_choropleth::error::EXIT_JOIN;

fn fixture(name: &str) -> Source {
    Source::File(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name))
}

fn config(unmatched: UnmatchedPolicy) -> RenderConfig {
    RenderConfig {
        county_source: fixture("counties.json"),
        education_source: fixture("education.json"),
        unmatched,
        ..RenderConfig::default()
    }
}

#[test]
fn renders_fixture_map_end_to_end() {
    let config = config(UnmatchedPolicy::Flag);
    let data = pipeline::load(&config).unwrap();
    assert_eq!(data.counties.len(), 4);
    assert_eq!(data.states.len(), 2);

    let prepared = pipeline::prepare(&config, &data).unwrap();
    assert_eq!(prepared.scale.thresholds(), vec![74.0, 58.0, 42.0, 26.0, 10.0]);
    assert_eq!(prepared.joined.orphan_records, 1);

    let svg = prepared.render(&config);
    assert!(svg.contains(
        "<path class=\"county\" d=\"M10,0L10,10L0,10L0,0Z\" fill=\"#a70000\" data-fips=\"1001\" data-education=\"10.00\""
    ));
    assert!(svg.contains(
        "<path class=\"county\" d=\"M10,0L20,0L20,10L10,10Z\" fill=\"#ff5252\" data-fips=\"1003\" data-education=\"50.00\""
    ));
    assert!(svg.contains("fill=\"#ffbaba\" data-fips=\"1005\" data-education=\"90.00\""));
    assert!(svg.contains(
        "<path class=\"county unmatched\" d=\"M40,40L45,40L45,45L40,45Z\" fill=\"#cccccc\" data-fips=\"2013\" data-unmatched=\"true\"/>"
    ));
    assert!(svg.contains("<g id=\"legend\" transform=\"translate(650,30)\">"));
    assert!(svg.contains("id=\"tooltip\""));
    assert!(!svg.contains("id=\"states\""));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let config = config(UnmatchedPolicy::Flag);
    let first = {
        let data = pipeline::load(&config).unwrap();
        pipeline::prepare(&config, &data).unwrap().render(&config)
    };
    let second = {
        let data = pipeline::load(&config).unwrap();
        pipeline::prepare(&config, &data).unwrap().render(&config)
    };
    assert_eq!(first, second);
}

#[test]
fn skip_and_fail_policies() {
    let skip = config(UnmatchedPolicy::Skip);
    let data = pipeline::load(&skip).unwrap();
    let prepared = pipeline::prepare(&skip, &data).unwrap();
    let svg = prepared.render(&skip);
    assert_eq!(svg.matches("class=\"county").count(), 3);
    assert!(!svg.contains("data-fips=\"2013\""));

    let fail = config(UnmatchedPolicy::Fail);
    let err = pipeline::prepare(&fail, &data).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_JOIN);
    assert!(err.message().contains("2013"));
}
