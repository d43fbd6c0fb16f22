//! Axum router assembly.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use osmlinks_app::ports::PreferenceStore;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the directory page at `/`, preference updates at `/prefs` and the
/// JSON API under `/api`. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<P>(state: AppState<P>) -> Router
where
    P: PreferenceStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(crate::page::index::<P>))
        .route("/prefs", post(crate::page::update_prefs::<P>))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
