pub mod assets;
pub mod faults;
pub mod health;
pub mod lots;
pub mod reference;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assets                      list, register
/// /assets/{id}                 get detail, update (lifecycle edit), delete
/// /lots                        list, batch intake
/// /lots/{id}                   get detail, delete (cascades)
/// /lots/{id}/faults            lot-wide fault report
/// /faults/{id}/resolve         resolve a fault
/// /conditions                  condition enumeration
/// /categories                  known categories
/// /locations                   known locations
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Asset lifecycle: CRUD plus the transition engine behind PUT.
        .nest("/assets", assets::router())
        // Lot intake, listing, and lot-scoped bulk operations.
        .nest("/lots", lots::router())
        // Fault resolution.
        .nest("/faults", faults::router())
        // Reference data lookups for UI dropdowns.
        .merge(reference::router())
}
