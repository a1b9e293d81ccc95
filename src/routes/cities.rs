use axum::{extract::State, http::HeaderMap};
use std::sync::Arc;

use crate::api::{QueryString, Relay};
use crate::app::AppState;
use crate::domain::query::{procedures, CitiesQuery};
use crate::error::{ApiError, ApiResult, Resource};
use crate::middleware::request_id;
use crate::services::rpc;

/// GET /api/cities
///
/// Cities that currently have listings, for the location selectors.
pub async fn list_cities(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: QueryString,
) -> ApiResult<Relay> {
    let query = CitiesQuery::parse(&query);

    tracing::debug!(
        request_id = request_id(&headers),
        page = ?query.page,
        items_page = ?query.items_page,
        search = ?query.search,
        "Listing cities"
    );

    let data = rpc::invoke(state.rpc.as_ref(), procedures::CITIES, &query.args())
        .await
        .map_err(|e| ApiError::from(e).for_resource(Resource::Cities))?;

    Ok(Relay(data))
}
