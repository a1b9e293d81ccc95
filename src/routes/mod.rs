pub mod cities;
pub mod health;
pub mod neighborhoods;
pub mod properties;
pub mod sitemap;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/sitemap.xml", get(sitemap::sitemap))
        // Catalog relays
        .route("/api/cities", get(cities::list_cities))
        .route("/api/neighborhoods", get(neighborhoods::list_neighborhoods))
        .route("/api/properties", get(properties::list_properties))
        .route("/api/properties/", get(properties::missing_property_id))
        .route("/api/properties/:id", get(properties::get_property))
}
