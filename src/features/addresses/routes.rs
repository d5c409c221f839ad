use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::addresses::{handlers, services::AddressService};

/// Create routes for the addresses feature
///
/// The collection route answers with and without a trailing slash.
pub fn routes(service: Arc<AddressService>) -> Router {
    Router::new()
        .route(
            "/addresses",
            get(handlers::list_addresses).post(handlers::create_address),
        )
        .route(
            "/addresses/",
            get(handlers::list_addresses).post(handlers::create_address),
        )
        .route(
            "/addresses/{id}",
            get(handlers::get_address)
                .put(handlers::update_address)
                .delete(handlers::delete_address),
        )
        .route("/address/near", get(handlers::find_nearby_addresses))
        .with_state(service)
}
