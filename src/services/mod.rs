//! Service layer modules for external integrations.

pub mod rpc;

pub use rpc::{RpcClient, RpcError, SupabaseRpc};
