//! Route definitions for the asset lifecycle.
//!
//! All routes are mounted under `/assets`.

use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// GET    /       -> list_assets
/// POST   /       -> create_asset
/// GET    /{id}   -> get_asset (detail + movement/fault history)
/// PUT    /{id}   -> update_asset (lifecycle transition)
/// DELETE /{id}   -> delete_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
}
