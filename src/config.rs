use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // Supabase RPC
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub rpc_timeout_seconds: u64,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Public site
    pub site_url: String,
    pub whatsapp_number: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // Supabase RPC
        let supabase_url = env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?;
        let supabase_anon_key =
            env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY must be set")?;
        let rpc_timeout_seconds = env::var("RPC_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(15);

        // CORS
        let cors_allow_origins = split_origins(
            &env::var("CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        );

        // Public site
        let site_url = env::var("SITE_URL")
            .unwrap_or_else(|_| "https://imobiliariakazavel.com.br".to_string())
            .trim_end_matches('/')
            .to_string();
        let whatsapp_number =
            env::var("WHATSAPP_NUMBER").unwrap_or_else(|_| "554599382315".to_string());

        Ok(Settings {
            env,
            server_addr,
            supabase_url,
            supabase_anon_key,
            rpc_timeout_seconds,
            cors_allow_origins,
            site_url,
            whatsapp_number,
        })
    }

    /// Settings suitable for tests and local tooling; never reads the environment.
    pub fn for_tests() -> Self {
        Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "anon".to_string(),
            rpc_timeout_seconds: 5,
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            site_url: "https://imobiliariakazavel.com.br".to_string(),
            whatsapp_number: "554599382315".to_string(),
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
