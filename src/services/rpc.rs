//! Remote procedure client for the managed database.
//!
//! Procedures are exposed by PostgREST at `POST {base}/rest/v1/rpc/{name}` and
//! take a JSON object of named arguments. Filtering, sorting and pagination
//! all happen inside the procedure; this client only moves JSON around.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};

#[derive(Debug, Error)]
pub enum RpcError {
    /// The procedure ran (or PostgREST rejected the call) and reported an error.
    #[error("{message}")]
    Procedure {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("RPC transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to encode procedure arguments: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid procedure response: {0}")]
    Decode(String),
}

/// Client able to invoke a named procedure with a named-argument record.
#[async_trait]
pub trait RpcClient: Send + Sync {
    async fn call(&self, procedure: &str, args: Value) -> Result<Value, RpcError>;

    async fn health_check(&self) -> Result<(), RpcError>;
}

/// Serialize `args` and invoke `procedure`.
pub async fn invoke<A: Serialize + ?Sized>(
    client: &dyn RpcClient,
    procedure: &str,
    args: &A,
) -> Result<Value, RpcError> {
    let args = serde_json::to_value(args)?;
    client.call(procedure, args).await
}

/// Error body produced by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    code: Option<String>,
    #[allow(dead_code)]
    details: Option<String>,
    #[allow(dead_code)]
    hint: Option<String>,
}

/// Supabase / PostgREST implementation of [`RpcClient`].
#[derive(Clone)]
pub struct SupabaseRpc {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseRpc {
    pub fn new(base_url: &str, api_key: &str, timeout_seconds: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        tracing::info!(base_url = base_url, "Supabase RPC client initialized");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn endpoint(&self, procedure: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, procedure)
    }
}

#[async_trait]
impl RpcClient for SupabaseRpc {
    #[instrument(skip(self, args))]
    async fn call(&self, procedure: &str, args: Value) -> Result<Value, RpcError> {
        let url = self.endpoint(procedure);
        debug!(url = %url, "RPC request");

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&args)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "RPC request failed");
                RpcError::Transport(e)
            })?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            return serde_json::from_slice(&body).map_err(|e| {
                error!(error = %e, "Failed to parse RPC response");
                RpcError::Decode(e.to_string())
            });
        }

        let parsed = serde_json::from_slice::<PostgrestError>(&body).ok();
        let code = parsed.as_ref().and_then(|e| e.code.clone());
        let message = parsed
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("HTTP {}", status));

        error!(status = %status, code = ?code, message = %message, "RPC procedure error");

        Err(RpcError::Procedure {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn health_check(&self) -> Result<(), RpcError> {
        self.client
            .get(format!("{}/rest/v1/", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
