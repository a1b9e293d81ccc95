//! Domain types and DTOs
//!
//! Shapes mirror the JSON produced by the database procedures; nothing here
//! is persisted or mutated by the application.

pub mod catalog;
pub mod locations;
pub mod properties;
pub mod property_detail;
pub mod query;

pub use catalog::*;
pub use locations::*;
pub use properties::*;
pub use property_detail::*;
