//! Query-parameter construction shared by forward and reverse search.

use crate::models::{Language, Layer};

/// Ordered `(key, value)` pairs appended to the request URL.
pub type QueryParams = Vec<(&'static str, String)>;

/// Extends `params` with every optional value that is present.
///
/// `lat` and `lon` are only added as a pair. The language code is sent
/// lower-cased and the layer by its name.
pub fn build_query_params(
    mut params: QueryParams,
    limit: Option<u32>,
    lat: Option<f64>,
    lon: Option<f64>,
    lang: Option<Language>,
    layer: Option<Layer>,
) -> QueryParams {
    if let Some(limit) = limit {
        params.push(("limit", limit.to_string()));
    }

    if let (Some(lat), Some(lon)) = (lat, lon) {
        params.push(("lat", lat.to_string()));
        params.push(("lon", lon.to_string()));
    }

    if let Some(lang) = lang {
        params.push(("lang", lang.code().to_lowercase()));
    }

    if let Some(layer) = layer {
        params.push(("layer", layer.to_string()));
    }

    params
}
