use axum::{extract::State, http::HeaderMap};
use std::sync::Arc;

use crate::api::{QueryString, Relay};
use crate::app::AppState;
use crate::domain::query::{procedures, NeighborhoodsQuery};
use crate::error::{ApiError, ApiResult, Resource};
use crate::middleware::request_id;
use crate::services::rpc;

/// GET /api/neighborhoods
///
/// Neighborhoods with listings, optionally narrowed to one city.
pub async fn list_neighborhoods(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: QueryString,
) -> ApiResult<Relay> {
    let query = NeighborhoodsQuery::parse(&query);

    tracing::debug!(
        request_id = request_id(&headers),
        city_id = ?query.city_id,
        page = ?query.page,
        "Listing neighborhoods"
    );

    let data = rpc::invoke(state.rpc.as_ref(), procedures::NEIGHBORHOODS, &query.args())
        .await
        .map_err(|e| ApiError::from(e).for_resource(Resource::Neighborhoods))?;

    Ok(Relay(data))
}
