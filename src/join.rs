//! Region/record join by FIPS code.
//!
//! The index is built once after loading; every later lookup (fill, metadata
//! attributes, tooltip) goes through the same `JoinedRegion::record`.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::domain::{AttainmentRecord, Region, RegionId, UnmatchedPolicy};
use crate::error::{AppError, EXIT_JOIN};

/// FIPS → record lookup table.
#[derive(Debug, Clone)]
pub struct JoinIndex<'a> {
    by_fips: HashMap<RegionId, &'a AttainmentRecord>,
}

impl<'a> JoinIndex<'a> {
    /// Duplicate FIPS codes are rejected.
    pub fn build(records: &'a [AttainmentRecord]) -> Result<Self, AppError> {
        let mut by_fips = HashMap::with_capacity(records.len());
        for rec in records {
            if by_fips.insert(rec.fips, rec).is_some() {
                return Err(AppError::input(format!(
                    "Duplicate education record for FIPS {}.",
                    rec.fips
                )));
            }
        }
        Ok(Self { by_fips })
    }

    pub fn lookup(&self, region: &Region) -> Option<&'a AttainmentRecord> {
        region.id.and_then(|id| self.by_fips.get(&id).copied())
    }

    pub fn len(&self) -> usize {
        self.by_fips.len()
    }
}

/// A region paired with its record, if any.
#[derive(Debug, Clone)]
pub struct JoinedRegion<'a> {
    pub region: &'a Region,
    pub record: Option<&'a AttainmentRecord>,
}

/// Join output in topology order.
#[derive(Debug, Clone)]
pub struct Joined<'a> {
    /// Regions to render (skipped regions are absent).
    pub regions: Vec<JoinedRegion<'a>>,
    /// Regions without a record; `None` means the region had no usable id.
    pub unmatched_regions: Vec<Option<RegionId>>,
    /// Records whose FIPS code matched no region.
    pub orphan_records: usize,
}

impl Joined<'_> {
    pub fn matched_count(&self) -> usize {
        self.regions.iter().filter(|r| r.record.is_some()).count()
    }
}

/// Pair every region with its record according to `policy`.
pub fn join_regions<'a>(
    regions: &'a [Region],
    records: &'a [AttainmentRecord],
    index: &JoinIndex<'a>,
    policy: UnmatchedPolicy,
) -> Result<Joined<'a>, AppError> {
    let mut joined = Vec::with_capacity(regions.len());
    let mut unmatched = Vec::new();
    let mut seen: HashSet<RegionId> = HashSet::with_capacity(regions.len());

    for region in regions {
        let record = index.lookup(region);
        match record {
            Some(rec) => {
                seen.insert(rec.fips);
                joined.push(JoinedRegion { region, record });
            }
            None => {
                unmatched.push(region.id);
                if policy == UnmatchedPolicy::Flag {
                    joined.push(JoinedRegion { region, record: None });
                }
            }
        }
    }

    if !unmatched.is_empty() {
        if policy == UnmatchedPolicy::Fail {
            return Err(AppError::new(
                EXIT_JOIN,
                format!(
                    "{} region(s) have no education record: {}",
                    unmatched.len(),
                    format_ids(&unmatched, 10)
                ),
            ));
        }
        warn!(
            count = unmatched.len(),
            policy = ?policy,
            "regions without education records"
        );
    }

    let orphan_records = records.iter().filter(|r| !seen.contains(&r.fips)).count();

    Ok(Joined {
        regions: joined,
        unmatched_regions: unmatched,
        orphan_records,
    })
}

fn format_ids(ids: &[Option<RegionId>], limit: usize) -> String {
    let mut parts: Vec<String> = ids
        .iter()
        .take(limit)
        .map(|id| id.map(|i| i.to_string()).unwrap_or_else(|| "<no id>".to_string()))
        .collect();
    if ids.len() > limit {
        parts.push(format!("... (+{})", ids.len() - limit));
    }
    parts.join(", ")
}
