//! Unified API error handling
//!
//! Every failure is rendered as the `{status: false, message, data}` envelope
//! the storefront already understands. The `data` member (and the pagination
//! block for property listings) depends on the resource being served, so an
//! [`ApiError`] is bound to a [`Resource`] before it becomes a response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::api::Pagination;
use crate::domain::query::InvalidParameter;
use crate::services::rpc::RpcError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The procedure ran and reported an error.
    #[error("{0}")]
    Procedure(String),

    #[error("ID do imóvel é obrigatório")]
    MissingId,

    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),

    /// Transport, decoding or any other local failure.
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RpcError> for ApiError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Procedure { message, .. } => Self::Procedure(message),
            other => Self::Internal(anyhow::Error::new(other)),
        }
    }
}

impl ApiError {
    pub fn for_resource(self, resource: Resource) -> ResourceError {
        ResourceError {
            resource,
            error: self,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingId | Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::Procedure(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Resource served by a handler; decides the error prefix and fallback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Cities,
    Neighborhoods,
    Properties,
    PropertyDetail,
}

impl Resource {
    pub fn error_prefix(&self) -> &'static str {
        match self {
            Self::Cities => "Erro ao buscar cidades",
            Self::Neighborhoods => "Erro ao buscar bairros",
            Self::Properties => "Erro ao buscar imóveis",
            Self::PropertyDetail => "Erro ao buscar imóvel",
        }
    }

    /// Error body with this resource's empty shape
    pub fn failure_body(&self, message: String) -> Value {
        match self {
            Self::Cities | Self::Neighborhoods => json!({
                "status": false,
                "message": message,
                "data": [],
            }),
            Self::Properties => json!({
                "status": false,
                "message": message,
                "data": [],
                "pagination": Pagination::empty(),
            }),
            Self::PropertyDetail => json!({
                "status": false,
                "message": message,
                "data": null,
            }),
        }
    }
}

pub const INTERNAL_ERROR_PREFIX: &str = "Erro interno do servidor";

#[derive(Debug)]
pub struct ResourceError {
    pub resource: Resource,
    pub error: ApiError,
}

impl ResourceError {
    pub fn message(&self) -> String {
        match &self.error {
            ApiError::Procedure(msg) => format!("{}: {}", self.resource.error_prefix(), msg),
            ApiError::Internal(e) => format!("{}: {}", INTERNAL_ERROR_PREFIX, e),
            ApiError::MissingId | ApiError::InvalidParameter(_) => self.error.to_string(),
        }
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        match &self.error {
            ApiError::Internal(e) => {
                tracing::error!(resource = ?self.resource, error = ?e, "Internal server error");
            }
            other => {
                tracing::warn!(resource = ?self.resource, error = %other, "API error");
            }
        }

        let status = self.error.status_code();
        let body = self.resource.failure_body(self.message());

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ResourceError>;
