//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - boundary shapes produced by topology conversion (`Region`, `Geometry`)
//! - statistical records (`AttainmentRecord`)
//! - color scale pieces (`Palette`, `ColorBucket`)
//! - run configuration (`RenderConfig`, `Source`, `UnmatchedPolicy`)

pub mod types;

pub use types::*;
