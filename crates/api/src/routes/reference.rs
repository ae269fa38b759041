//! Route definitions for reference data lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::reference;
use crate::state::AppState;

/// Reference lookup routes, merged directly into `/api/v1`.
///
/// ```text
/// GET /conditions -> list_conditions
/// GET /categories -> list_categories
/// GET /locations  -> list_locations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/conditions", get(reference::list_conditions))
        .route("/categories", get(reference::list_categories))
        .route("/locations", get(reference::list_locations))
}
