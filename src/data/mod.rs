//! Dataset loading: HTTP/file fetches, topology conversion, record decoding.

pub mod education;
pub mod fetch;
pub mod topology;

pub use fetch::Loader;
pub use topology::Topology;
