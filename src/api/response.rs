//! Response envelopes and relay responders

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};

use super::pagination::Pagination;

/// `{status, message, data}` envelope used by the detail endpoint and by
/// every error body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// `{status, message, data, pagination}` envelope returned by list procedures.
///
/// Procedures aggregating zero rows answer `"data": null`, read as empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListEnvelope<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Procedure output relayed to the caller as-is, HTTP 200.
#[derive(Debug)]
pub struct Relay(pub serde_json::Value);

impl IntoResponse for Relay {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Relay that forbids any cache between the database and the shopper.
#[derive(Debug)]
pub struct NoStore(pub serde_json::Value);

pub const NO_STORE_DIRECTIVES: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

impl IntoResponse for NoStore {
    fn into_response(self) -> Response {
        let mut response = Relay(self.0).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(NO_STORE_DIRECTIVES),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CitiesResponse;

    #[test]
    fn null_or_missing_data_reads_as_empty_list() {
        let null: CitiesResponse = serde_json::from_str(
            r#"{"status":true,"message":"","data":null,"pagination":{"total_items":0,"total_pages":0,"current_page":1}}"#,
        )
        .unwrap();
        assert!(null.status);
        assert!(null.data.is_empty());

        let missing: CitiesResponse = serde_json::from_str(r#"{"status":false}"#).unwrap();
        assert!(missing.data.is_empty());
        assert_eq!(missing.pagination, Pagination::empty());

        let filled: CitiesResponse =
            serde_json::from_str(r#"{"status":true,"data":[{"id":"c1","name":"Cascavel"}]}"#)
                .unwrap();
        assert_eq!(filled.data[0].name, "Cascavel");
    }
}
