use axum::http::{HeaderName, HeaderValue, Method, header};
use core_config::cors::CorsConfig;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Header carrying the requested API version
pub const API_VERSION_HEADER: &str = "x-api-version";

/// Creates the CORS layer for the configured origins.
///
/// The policy allows:
/// - the configured origins only
/// - GET, POST, PUT, DELETE, OPTIONS
/// - Content-Type, Accept and `X-API-Version` request headers
/// - 1 hour preflight cache
///
/// # Errors
/// Fails when an origin is not a valid header value.
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(API_VERSION_HEADER),
        ])
        .expose_headers([HeaderName::from_static("api-supported-versions")])
        .max_age(Duration::from_secs(3600)))
}
