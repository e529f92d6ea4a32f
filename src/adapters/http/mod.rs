//! HTTP adapters - REST API and static front end.
//!
//! [`build_router`] assembles the relay endpoints, optional docs, the SPA
//! fallback, and the CORS and trace layers from configuration.

pub mod docs;
pub mod relay;

pub use docs::docs_router;
pub use relay::{relay_router, RelayAppState};

use ::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, CorsPolicy, FeatureFlags};

/// Creates the application router.
pub fn build_router(state: RelayAppState, config: &AppConfig) -> Router {
    let mut router = relay_router(&config.features).with_state(state);

    if config.features.enable_docs {
        router = router.merge(docs_router(&config.features));
    }

    // Any other path is the front end; unknown paths get index.html so the
    // client-side router can handle them.
    let spa = ServeDir::new(&config.server.static_dir)
        .fallback(ServeFile::new(config.server.index_file()));
    router = router.fallback_service(spa);

    if let Some(cors) = build_cors_layer(&config.features) {
        router = router.layer(cors);
    }

    router.layer(TraceLayer::new_for_http())
}

/// Build the CORS layer for the configured policy.
///
/// Returns `None` when CORS is disabled.
fn build_cors_layer(features: &FeatureFlags) -> Option<CorsLayer> {
    match features.cors {
        CorsPolicy::Permissive => Some(CorsLayer::permissive()),
        CorsPolicy::Restricted => {
            let origins: Vec<HeaderValue> = features
                .cors_origins_list()
                .iter()
                .filter_map(|origin| {
                    origin.parse::<HeaderValue>().ok().or_else(|| {
                        tracing::warn!("CORS: Invalid origin in config: {}", origin);
                        None
                    })
                })
                .collect();

            tracing::info!("CORS: Allowing {} origin(s)", origins.len());
            Some(
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
            )
        }
        CorsPolicy::Disabled => None,
    }
}
