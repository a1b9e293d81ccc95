//! Typed client for the catalog API consumed by the storefront.
//!
//! Non-2xx responses are reported with the resource's message prefix and the
//! HTTP reason phrase; the error envelope itself is not inspected.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::api::QueryString;
use crate::domain::query::{CitiesQuery, NeighborhoodsQuery, PropertiesQuery};
use crate::domain::{CitiesResponse, NeighborhoodsResponse, PropertiesResponse, PropertyDetailResponse};
use crate::error::Resource;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{prefix}: {reason}")]
    Status {
        prefix: &'static str,
        status: u16,
        reason: String,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Catalog operations used by the listing and detail controllers.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn cities(&self, query: &CitiesQuery) -> Result<CitiesResponse, ClientError>;

    async fn neighborhoods(
        &self,
        query: &NeighborhoodsQuery,
    ) -> Result<NeighborhoodsResponse, ClientError>;

    async fn properties(&self, query: &PropertiesQuery) -> Result<PropertiesResponse, ClientError>;

    async fn property_detail(&self, id: &str) -> Result<PropertyDetailResponse, ClientError>;
}

#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self::with_client(http, Url::parse(base_url)?))
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// `/api/{resource}` with only the present parameters.
    pub fn list_url(&self, path: &str, query: &QueryString) -> Result<Url, ClientError> {
        let mut url = self.base_url.join(path)?;
        url.set_query(None);
        if !query.is_empty() {
            url.set_query(Some(&query.to_string()));
        }
        Ok(url)
    }

    /// Detail URL with a millisecond timestamp so no intermediary can answer
    /// from cache.
    pub fn detail_url(&self, id: &str, timestamp_millis: i64) -> Result<Url, ClientError> {
        let mut url = self.base_url.join("/api/properties/")?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(id);
        url.query_pairs_mut()
            .append_pair("t", &timestamp_millis.to_string());
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: Resource,
        no_store: bool,
    ) -> Result<T, ClientError> {
        debug!(url = %url, "Catalog request");

        let mut request = self
            .http
            .get(url)
            .header(header::CONTENT_TYPE, "application/json");
        if no_store {
            request = request.header(header::CACHE_CONTROL, "no-store");
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Status {
                prefix: resource.error_prefix(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    #[instrument(skip(self))]
    async fn cities(&self, query: &CitiesQuery) -> Result<CitiesResponse, ClientError> {
        let url = self.list_url("/api/cities", &query.to_query())?;
        self.fetch(url, Resource::Cities, false).await
    }

    #[instrument(skip(self))]
    async fn neighborhoods(
        &self,
        query: &NeighborhoodsQuery,
    ) -> Result<NeighborhoodsResponse, ClientError> {
        let url = self.list_url("/api/neighborhoods", &query.to_query())?;
        self.fetch(url, Resource::Neighborhoods, false).await
    }

    #[instrument(skip(self))]
    async fn properties(&self, query: &PropertiesQuery) -> Result<PropertiesResponse, ClientError> {
        let url = self.list_url("/api/properties", &query.to_query())?;
        self.fetch(url, Resource::Properties, false).await
    }

    #[instrument(skip(self))]
    async fn property_detail(&self, id: &str) -> Result<PropertyDetailResponse, ClientError> {
        let url = self.detail_url(id, Utc::now().timestamp_millis())?;
        self.fetch(url, Resource::PropertyDetail, true).await
    }
}
