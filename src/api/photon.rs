//! Provides a client for interacting with the Photon geocoding API.
//!
//! This module defines the `PhotonClient` struct and its methods for forward
//! (text) and reverse (coordinate) searches.

use crate::api::{build_query_params, handle_response, QueryParams};
use crate::error::{AppError, Result};
use crate::models::{Feature, ForwardSearch, ReverseSearch};
use reqwest::{Client, Url};
use tracing::{debug, error, info};

/// Public hosted Photon instance.
pub const DEFAULT_BASE_URL: &str = "https://photon.komoot.io";

const FORWARD_PATH: &str = "/api";
const REVERSE_PATH: &str = "/reverse";

/// An asynchronous client for the Photon API.
///
/// Cheap to clone; the only state is the base URL and the HTTP client.
#[derive(Debug, Clone)]
pub struct PhotonClient {
    client: Client,
    base_url: String,
}

impl Default for PhotonClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PhotonClient {
    /// Creates a new `PhotonClient` for the given base URL.
    ///
    /// A single trailing slash is removed. No request is made here.
    pub fn new(base_url: &str) -> Self {
        Self::with_http_client(base_url, Client::new())
    }

    /// Creates a new `PhotonClient` using a preconfigured `reqwest::Client`,
    /// e.g. one with a request timeout.
    pub fn with_http_client(base_url: &str, client: Client) -> Self {
        let base_url = base_url.strip_suffix('/').unwrap_or(base_url).to_string();
        Self { client, base_url }
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Searches for places matching `text`.
    ///
    /// Corresponds to the `/api` endpoint.
    pub async fn forward_search(&self, text: &str, options: &ForwardSearch) -> Result<Vec<Feature>> {
        info!("Forward search for '{}'", text);

        let mut params: QueryParams = vec![("q", text.to_string())];
        if let Some(bbox) = &options.bounding_box {
            params.push(("bbox", bbox.to_string()));
        }
        let params = build_query_params(
            params,
            options.limit,
            options.latitude,
            options.longitude,
            options.language,
            options.layer,
        );

        self.get_features(FORWARD_PATH, &params, options.secure).await
    }

    /// Looks up places near the given coordinates.
    ///
    /// Corresponds to the `/reverse` endpoint. An empty result is not an error.
    pub async fn reverse_search(
        &self,
        latitude: f64,
        longitude: f64,
        options: &ReverseSearch,
    ) -> Result<Vec<Feature>> {
        info!("Reverse search at {}, {}", latitude, longitude);

        let params: QueryParams = match options.radius {
            Some(radius) => vec![("radius", radius.to_string())],
            None => Vec::new(),
        };
        let params = build_query_params(
            params,
            options.limit,
            Some(latitude),
            Some(longitude),
            options.language,
            options.layer,
        );

        self.get_features(REVERSE_PATH, &params, options.secure).await
    }

    /// Builds the full request URL for `path` under the base URL.
    ///
    /// `secure` selects the `https` or `http` scheme regardless of the scheme
    /// of the base URL.
    pub fn request_url(&self, path: &str, params: &[(&str, String)], secure: bool) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;

        let scheme = if secure { "https" } else { "http" };
        url.set_scheme(scheme).map_err(|()| {
            AppError::InvalidScheme(format!("cannot use {} for {}", scheme, self.base_url))
        })?;

        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    async fn get_features(&self, path: &str, params: &[(&str, String)], secure: bool) -> Result<Vec<Feature>> {
        let url = self.request_url(path, params, secure)?;
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            error!("Error requesting {}: {}", url, e);
            AppError::Http(e.into())
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!("Error reading response body from {}: {}", url, e);
            AppError::Http(e.into())
        })?;

        let features = handle_response(status, &body).map_err(|e| {
            error!("Request to {} failed with status {}: {}", url, status, e);
            e
        })?;

        debug!("Received {} features from {}", features.len(), path);
        Ok(features)
    }
}
