//! Client library for the [Photon](https://photon.komoot.io) geocoding API.
//!
//! `PhotonClient` issues forward (text) and reverse (coordinate) searches and
//! returns the matching GeoJSON features.
//!
//! ```no_run
//! use photon_client::api::PhotonClient;
//! use photon_client::models::{ForwardSearch, Language};
//!
//! # async fn run() -> photon_client::error::Result<()> {
//! let client = PhotonClient::default();
//! let options = ForwardSearch {
//!     limit: Some(5),
//!     language: Some(Language::De),
//!     ..Default::default()
//! };
//! for feature in client.forward_search("berlin", &options).await? {
//!     println!("{}", feature.label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod models;

pub use api::{PhotonClient, DEFAULT_BASE_URL};
pub use error::{AppError, Result};
