//! Shared domain types.
//!
//! Everything here is immutable once the loader has produced it. The pipeline
//! threads these values through each stage by reference instead of keeping
//! them in process-wide state.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// Boundary topology published for the county choropleth exercise.
pub const DEFAULT_COUNTY_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/counties.json";

/// Per-county educational attainment records.
pub const DEFAULT_EDUCATION_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/for_user_education.json";

/// Default swatches, lightest first. The first swatch is paired with the
/// highest threshold.
pub const DEFAULT_COLORS: [&str; 5] = ["#ffbaba", "#ff7b7b", "#ff5252", "#ff0000", "#a70000"];

/// Fill used for regions that have no attainment record.
pub const UNMATCHED_FILL: &str = "#cccccc";

/// County FIPS code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RegionId(pub u32);

impl RegionId {
    /// Parse a topology id, accepting JSON numbers and numeric strings.
    ///
    /// `"01001"` and `1001` name the same county.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()).map(Self),
            serde_json::Value::String(s) => s.trim().parse::<u32>().ok().map(Self),
            _ => None,
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RegionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        RegionId::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid FIPS code: {value}")))
    }
}

/// Cartesian position (already projected upstream).
pub type Position = [f64; 2];

/// Decoded boundary geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    /// Rings are closed: the last position repeats the first.
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    GeometryCollection(Vec<Geometry>),
}

/// One boundary shape produced by topology conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: Option<RegionId>,
    /// `None` for null geometries; such regions draw nothing.
    pub geometry: Option<Geometry>,
}

/// One row of the education dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttainmentRecord {
    pub fips: RegionId,
    #[serde(default)]
    pub state: String,
    pub area_name: String,
    /// Percentage of adults with a bachelor's degree or higher.
    #[serde(rename = "bachelorsOrHigher")]
    pub bachelors_or_higher: f64,
}

/// One swatch of the color scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBucket {
    pub color: String,
    /// Lower bound (inclusive) of the bucket.
    pub step_value: f64,
}

/// Ordered color swatches; the bucket count is the palette length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Vec<String>);

impl Palette {
    pub fn new(colors: Vec<String>) -> Self {
        Self(colors)
    }

    /// Parse a comma separated list such as `#fee,#fcc,#f00`.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn colors(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_COLORS.iter().map(|c| c.to_string()).collect())
    }
}

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` locations are fetched; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed.strip_prefix("file://").unwrap_or(trimmed)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What to do with a region that has no attainment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum UnmatchedPolicy {
    /// Render it with a neutral fill and mark it `data-unmatched`.
    #[default]
    Flag,
    /// Leave it out of the map.
    Skip,
    /// Abort before rendering.
    Fail,
}

/// Resolved settings for a single run.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub county_source: Source,
    pub education_source: Source,
    pub palette: Palette,
    pub unmatched: UnmatchedPolicy,
    pub timeout: Option<Duration>,
    /// Draw state outlines above the counties.
    pub state_outlines: bool,
    /// SVG destination; `None` writes to stdout.
    pub output: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            county_source: Source::Url(DEFAULT_COUNTY_URL.to_string()),
            education_source: Source::Url(DEFAULT_EDUCATION_URL.to_string()),
            palette: Palette::default(),
            unmatched: UnmatchedPolicy::default(),
            timeout: None,
            state_outlines: false,
            output: None,
            export_csv: None,
        }
    }
}

/// Immutable pipeline state after both fetches resolved.
#[derive(Debug, Clone)]
pub struct MapData {
    pub counties: Vec<Region>,
    pub states: Vec<Region>,
    pub education: Vec<AttainmentRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_id_accepts_numbers_and_padded_strings() {
        assert_eq!(RegionId::from_json(&serde_json::json!(1001)), Some(RegionId(1001)));
        assert_eq!(RegionId::from_json(&serde_json::json!("01001")), Some(RegionId(1001)));
        assert_eq!(RegionId::from_json(&serde_json::json!("x")), None);
        assert_eq!(RegionId::from_json(&serde_json::json!(-4)), None);
    }

    #[test]
    fn record_deserializes_upstream_field_names() {
        let raw = r#"{"fips":1001,"state":"AL","area_name":"Autauga County","bachelorsOrHigher":21.9}"#;
        let rec: AttainmentRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(rec.fips, RegionId(1001));
        assert_eq!(rec.area_name, "Autauga County");
        assert!((rec.bachelors_or_higher - 21.9).abs() < 1e-12);
    }

    #[test]
    fn palette_parse_trims_and_drops_empty_entries() {
        let p = Palette::parse(" #fff, ,#000 ,");
        assert_eq!(p.colors(), &["#fff".to_string(), "#000".to_string()]);
        assert_eq!(Palette::default().len(), 5);
    }

    #[test]
    fn source_parse_distinguishes_urls_and_paths() {
        assert_eq!(
            Source::parse("https://example.com/a.json"),
            Source::Url("https://example.com/a.json".to_string())
        );
        assert_eq!(Source::parse("file:///tmp/a.json"), Source::File(PathBuf::from("/tmp/a.json")));
        assert_eq!(Source::parse("data/a.json"), Source::File(PathBuf::from("data/a.json")));
    }
}
