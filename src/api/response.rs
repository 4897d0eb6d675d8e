//! Turns a raw Photon HTTP response into features or an `AppError`.

use crate::error::{AppError, Result};
use crate::models::{ErrorBody, Feature, FeatureCollection};

/// Parses `body` according to `status`.
///
/// Status 200 yields the `features` array in server order. Any other status
/// becomes `AppError::Api` carrying the body's `message` (empty when absent).
/// A body that is not JSON at all surfaces as `AppError::JsonParse` on both paths.
pub fn handle_response(status: u16, body: &str) -> Result<Vec<Feature>> {
    if status == 200 {
        let collection: FeatureCollection = serde_json::from_str(body)?;
        return Ok(collection.features);
    }

    let error_body: ErrorBody = serde_json::from_str(body)?;
    Err(AppError::Api {
        status,
        message: error_body.message.unwrap_or_default(),
    })
}
