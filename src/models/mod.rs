//! Defines the data structures and models used throughout the crate.
//!
//! This includes the GeoJSON structures returned by the Photon API and the
//! typed filters and options used to build requests.

mod photon;

pub use photon::*;
