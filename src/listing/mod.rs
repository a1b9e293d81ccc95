//! Client-side catalog state: URL-driven listing, filter form, cascading
//! selectors, featured carousel and the detail loader.

pub mod detail;
pub mod featured;
pub mod filters;
pub mod options;
pub mod page;
pub mod ticket;
pub mod view;

pub use detail::{DetailLoader, DetailState};
pub use featured::{FeaturedProperties, FeaturedState};
pub use filters::{FilterDraft, FilterEdit, ListingFilters, NeighborhoodReload};
pub use options::{CityOptions, NeighborhoodOptions};
pub use page::{ListingPage, Phase, ITEMS_PER_PAGE};
pub use ticket::{RequestTracker, Ticket};
