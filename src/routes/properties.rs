//! Listing routes
//!
//! Both endpoints are relays: the procedure output is returned untouched and
//! only failures are reshaped into the storefront's envelope.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{HeaderMap, Uri},
};
use std::sync::Arc;

use crate::api::{NoStore, QueryString, Relay};
use crate::app::AppState;
use crate::domain::query::{procedures, InvalidParameter, PropertiesQuery, PropertyDetailArgs};
use crate::error::{ApiError, ApiResult, Resource};
use crate::middleware::request_id;
use crate::services::rpc;

/// GET /api/properties
///
/// Search with filters, ordering and pagination.
pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: QueryString,
) -> ApiResult<Relay> {
    let query = PropertiesQuery::parse(&query)
        .map_err(|e| ApiError::from(e).for_resource(Resource::Properties))?;

    tracing::debug!(
        request_id = request_id(&headers),
        property_type = ?query.property_type,
        city_id = ?query.city_id,
        negotiation = ?query.negotiation,
        order = ?query.order,
        page = ?query.page,
        "Listing properties"
    );

    let data = rpc::invoke(state.rpc.as_ref(), procedures::PROPERTIES, &query.args())
        .await
        .map_err(|e| ApiError::from(e).for_resource(Resource::Properties))?;

    Ok(Relay(data))
}

/// GET /api/properties/:id
///
/// Single listing. Responses are never cacheable so an edit made in the
/// back office shows up on the next visit.
pub async fn get_property(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<NoStore> {
    // Ids that do not decode to UTF-8 still get the envelope
    let Path(id) = id.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Undecodable property id");
        let raw = uri.path().rsplit('/').next().unwrap_or_default();
        ApiError::from(InvalidParameter {
            name: "id",
            value: raw.to_string(),
        })
        .for_resource(Resource::PropertyDetail)
    })?;

    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::MissingId.for_resource(Resource::PropertyDetail));
    }

    tracing::debug!(request_id = request_id(&headers), property_id = %id, "Getting property");

    let data = rpc::invoke(
        state.rpc.as_ref(),
        procedures::PROPERTY_DETAIL,
        &PropertyDetailArgs { p_id: id },
    )
    .await
    .map_err(|e| ApiError::from(e).for_resource(Resource::PropertyDetail))?;

    Ok(NoStore(data))
}

/// GET /api/properties/ (id segment missing)
pub async fn missing_property_id() -> ApiResult<NoStore> {
    Err(ApiError::MissingId.for_resource(Resource::PropertyDetail))
}
