//! `edu-choropleth` library crate.
//!
//! The binary (`choro`) is a thin wrapper around this library so that:
//!
//! - the load/scale/join/render stages are testable without spawning processes
//! - the renderer can be reused on pre-loaded data

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod join;
pub mod render;
pub mod report;
pub mod scale;
