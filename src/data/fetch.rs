//! Remote (or local) dataset loading.
//!
//! The two resources are fetched one after the other: the education
//! request is only issued once the topology has arrived and decoded.

use reqwest::blocking::Client;
use tracing::{debug, error, info};

use crate::data::education::parse_records;
use crate::data::topology::Topology;
use crate::domain::{MapData, Region, RenderConfig, Source};
use crate::error::AppError;

const COUNTIES_OBJECT: &str = "counties";
const STATES_OBJECT: &str = "states";

pub struct Loader {
    client: Client,
}

impl Loader {
    pub fn new(config: &RenderConfig) -> Result<Self, AppError> {
        // `None` clears the blocking client's built-in 30s limit.
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::fetch(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Fetch both datasets and convert the topology into regions.
    pub fn fetch_map_data(&self, config: &RenderConfig) -> Result<MapData, AppError> {
        let (counties, states) = self
            .fetch_topology(&config.county_source)
            .inspect_err(|e| error!(source = %config.county_source, "topology load failed: {e}"))?;

        let education = self
            .read_source(&config.education_source)
            .and_then(|body| parse_records(&body))
            .inspect_err(|e| error!(source = %config.education_source, "education load failed: {e}"))?;

        info!(
            counties = counties.len(),
            states = states.len(),
            records = education.len(),
            "datasets loaded"
        );

        Ok(MapData {
            counties,
            states,
            education,
        })
    }

    fn fetch_topology(&self, source: &Source) -> Result<(Vec<Region>, Vec<Region>), AppError> {
        let body = self.read_source(source)?;
        let topology = Topology::from_json(&body)?;
        let counties = topology.regions(COUNTIES_OBJECT)?;
        let states = topology.regions(STATES_OBJECT)?;
        Ok((counties, states))
    }

    fn read_source(&self, source: &Source) -> Result<String, AppError> {
        debug!(%source, "reading dataset");
        match source {
            Source::File(path) => std::fs::read_to_string(path)
                .map_err(|e| AppError::fetch(format!("Failed to read '{}': {e}", path.display()))),
            Source::Url(url) => {
                let resp = self
                    .client
                    .get(url)
                    .send()
                    .map_err(|e| AppError::fetch(format!("Request to {url} failed: {e}")))?;

                if !resp.status().is_success() {
                    return Err(AppError::fetch(format!(
                        "Request to {url} failed with status {}.",
                        resp.status()
                    )));
                }

                resp.text()
                    .map_err(|e| AppError::fetch(format!("Failed to read response from {url}: {e}")))
            }
        }
    }
}
