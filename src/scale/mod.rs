//! Color scale construction and lookup.
//!
//! The attainment range `[min, max]` is split into `palette.len()` equal-width
//! bands. Bucket `i` starts at `max - step * (i + 1)`, so buckets are stored
//! with descending thresholds and the first palette entry pairs with the
//! highest band.

use crate::domain::{AttainmentRecord, ColorBucket, Palette};
use crate::error::AppError;

/// Derived color scale for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    pub min_percent: f64,
    pub max_percent: f64,
    pub step: f64,
    /// Descending by `step_value`.
    pub buckets: Vec<ColorBucket>,
}

impl ColorScale {
    /// Build thresholds from the observed distribution.
    pub fn build(palette: &Palette, records: &[AttainmentRecord]) -> Result<Self, AppError> {
        Self::from_values(palette, records.iter().map(|r| r.bachelors_or_higher))
    }

    pub fn from_values(palette: &Palette, values: impl IntoIterator<Item = f64>) -> Result<Self, AppError> {
        if palette.is_empty() {
            return Err(AppError::input("Palette must contain at least one color."));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut n = 0usize;
        for v in values {
            if !v.is_finite() {
                return Err(AppError::input("Attainment values must be finite."));
            }
            min = min.min(v);
            max = max.max(v);
            n += 1;
        }

        if n == 0 {
            return Err(AppError::input("Cannot build a color scale from zero records."));
        }
        if max <= min {
            return Err(AppError::input(format!(
                "Degenerate attainment distribution: every value is {min}."
            )));
        }

        let step = (max - min) / palette.len() as f64;
        if !step.is_finite() || step <= 0.0 {
            return Err(AppError::input(format!(
                "Attainment range [{min}, {max}] cannot be split into {} bands.",
                palette.len()
            )));
        }
        let buckets = palette
            .colors()
            .iter()
            .enumerate()
            .map(|(i, color)| ColorBucket {
                color: color.clone(),
                step_value: max - step * (i as f64 + 1.0),
            })
            .collect();

        Ok(Self {
            min_percent: min,
            max_percent: max,
            step,
            buckets,
        })
    }

    /// Color for one attainment value.
    ///
    /// The first bucket whose threshold is `<= value` wins; anything below the
    /// last threshold takes the last bucket's color.
    pub fn resolve(&self, value: f64) -> &str {
        self.bucket_index(value)
            .and_then(|i| self.buckets.get(i))
            .map(|b| b.color.as_str())
            .unwrap_or_default()
    }

    /// Index of the bucket `value` falls into.
    pub fn bucket_index(&self, value: f64) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        self.buckets
            .iter()
            .position(|b| value >= b.step_value)
            .or(Some(self.buckets.len() - 1))
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.buckets.iter().map(|b| b.step_value).collect()
    }
}

/// Linear map from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, v: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }
}
