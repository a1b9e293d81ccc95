//! HTTP-facing building blocks: envelopes, pagination and query strings.

pub mod pagination;
pub mod query_string;
pub mod response;

pub use pagination::Pagination;
pub use query_string::QueryString;
pub use response::{Envelope, ListEnvelope, NoStore, Relay};
