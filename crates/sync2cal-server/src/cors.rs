//! Cross-origin policy.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::error::{ServerError, ServerResult};

/// Builds a CORS layer allowing exactly `origins`, with credentials.
///
/// Methods and headers are mirrored from the preflight request; a wildcard
/// is not valid together with credentials.
pub fn cors_layer(origins: &[String]) -> ServerResult<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| ServerError::config(format!("invalid CORS origin: {:?}", origin)))
        })
        .collect::<ServerResult<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
