//! Route definitions for lot intake and lot-scoped operations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::lots;
use crate::state::AppState;

/// Lot routes mounted at `/lots`.
///
/// ```text
/// GET    /             -> list_lots (declared vs actual counts)
/// POST   /             -> create_lot (batch expander)
/// GET    /{id}         -> get_lot (detail + linked assets)
/// DELETE /{id}         -> delete_lot (cascades to assets + history)
/// POST   /{id}/faults  -> report_lot_fault (best-effort fan-out)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lots::list_lots).post(lots::create_lot))
        .route("/{id}", get(lots::get_lot).delete(lots::delete_lot))
        .route("/{id}/faults", post(lots::report_lot_fault))
}
