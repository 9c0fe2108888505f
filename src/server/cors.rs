use crate::config::CorsConfig;
use axum::http::{HeaderValue, request::Parts};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Credentials are allowed, so methods and headers mirror the preflight
/// request instead of using a literal `*`.
pub fn layer(config: &CorsConfig) -> CorsLayer {
    let patterns = config.allowed_origins.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|origin| origin_allowed(&patterns, origin))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// A pattern ending in `*` matches any origin with that prefix.
pub fn origin_allowed(patterns: &[String], origin: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => origin.starts_with(prefix),
            None => pattern == origin,
        })
}
