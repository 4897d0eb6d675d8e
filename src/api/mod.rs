//! Provides the client for the Photon geocoding API.
//!
//! Includes:
//! - `photon`: the `PhotonClient` issuing forward and reverse searches.
//! - `params`: the shared query-parameter builder.
//! - `response`: status validation and body parsing.

mod params;
mod photon;
mod response;


pub use params::*;
pub use photon::*;
pub use response::*;
