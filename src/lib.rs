//! Backend for the Kazavel real-estate storefront.
//!
//! The HTTP side relays catalog searches to database procedures; the
//! `listing` and `client` modules hold the storefront's filter, paging and
//! loading logic.

pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod listing;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
