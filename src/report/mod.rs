//! Terminal run summary.
//!
//! Formatting lives here so the pipeline stays presentation-free and output
//! changes stay localized.

use crate::domain::RenderConfig;
use crate::join::Joined;
use crate::render::format_percent;
use crate::scale::ColorScale;

/// Number of rendered counties per bucket, in bucket order.
pub fn bucket_counts(joined: &Joined<'_>, scale: &ColorScale) -> Vec<usize> {
    let mut counts = vec![0usize; scale.buckets.len()];
    for rec in joined.regions.iter().filter_map(|r| r.record) {
        if let Some(i) = scale.bucket_index(rec.bachelors_or_higher) {
            counts[i] += 1;
        }
    }
    counts
}

/// Format the run summary (sources, join stats, bucket table).
pub fn format_run_summary(
    config: &RenderConfig,
    records: usize,
    joined: &Joined<'_>,
    scale: &ColorScale,
) -> String {
    let mut out = String::new();

    out.push_str("=== choro - county educational attainment ===\n");
    out.push_str(&format!("Counties:  {}\n", config.county_source));
    out.push_str(&format!("Education: {}\n", config.education_source));
    out.push_str(&format!(
        "Records: n={} | range=[{}, {}]% | step={:.4}\n",
        records,
        format_percent(scale.min_percent),
        format_percent(scale.max_percent),
        scale.step
    ));
    out.push_str(&format!(
        "Regions: rendered={} matched={} unmatched={} ({:?}) | records without region={}\n",
        joined.regions.len(),
        joined.matched_count(),
        joined.unmatched_regions.len(),
        config.unmatched,
        joined.orphan_records
    ));

    out.push_str("\nBuckets:\n");
    out.push_str(&format!("{:<10} {:>10} {:>9}\n", "color", ">= pct", "counties"));
    out.push_str(&format!("{:-<10} {:-<10} {:-<9}\n", "", "", ""));
    let counts = bucket_counts(joined, scale);
    for (bucket, count) in scale.buckets.iter().zip(counts) {
        out.push_str(&format!(
            "{:<10} {:>10} {:>9}\n",
            truncate(&bucket.color, 10),
            format_percent(bucket.step_value),
            count
        ));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('~');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttainmentRecord, Palette, Region, RegionId, UnmatchedPolicy};
    use crate::join::{JoinIndex, join_regions};

    #[test]
    fn summary_reports_bucket_counts_and_join_stats() {
        let records: Vec<AttainmentRecord> = [(1, 10.0), (2, 50.0), (3, 90.0), (7, 20.0)]
            .into_iter()
            .map(|(fips, pct)| AttainmentRecord {
                fips: RegionId(fips),
                state: "AL".to_string(),
                area_name: format!("County {fips}"),
                bachelors_or_higher: pct,
            })
            .collect();
        let regions: Vec<Region> = [1, 2, 3, 4]
            .into_iter()
            .map(|id| Region { id: Some(RegionId(id)), geometry: None })
            .collect();

        let index = JoinIndex::build(&records).unwrap();
        let joined = join_regions(&regions, &records, &index, UnmatchedPolicy::Flag).unwrap();
        let scale = ColorScale::build(&Palette::default(), &records).unwrap();

        assert_eq!(bucket_counts(&joined, &scale), vec![1, 0, 1, 0, 1]);

        let txt = format_run_summary(&RenderConfig::default(), records.len(), &joined, &scale);
        assert!(txt.contains("Records: n=4 | range=[10.00, 90.00]% | step=16.0000"));
        assert!(txt.contains("rendered=4 matched=3 unmatched=1 (Flag) | records without region=1"));
        assert!(txt.contains("#ffbaba         74.00         1"));
    }

    #[test]
    fn truncate_marks_cut_strings() {
        assert_eq!(truncate("rgb(1,2,3)x", 10), "rgb(1,2,3~");
        assert_eq!(truncate("#fff", 10), "#fff");
    }
}
