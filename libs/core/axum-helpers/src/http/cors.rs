use axum::http::{HeaderValue, Method, header};
use core_config::cors::CorsConfig;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Builds the CORS layer for the configured origin policy.
///
/// An explicit origin list allows credentials; the wildcard policy does not,
/// since browsers reject credentialed wildcard responses.
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    match config {
        CorsConfig::AnyOrigin => Ok(layer.allow_origin(Any)),
        CorsConfig::Origins(origins) => {
            let values = origins
                .iter()
                .map(|o| o.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
                    )
                })?;

            Ok(layer
                .allow_origin(AllowOrigin::list(values))
                .allow_credentials(true))
        }
    }
}
