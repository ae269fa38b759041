//! Route definitions for fault resolution.

use axum::routing::post;
use axum::Router;

use crate::handlers::faults;
use crate::state::AppState;

/// Fault routes mounted at `/faults`.
///
/// ```text
/// POST /{id}/resolve -> resolve_fault
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/resolve", post(faults::resolve_fault))
}
