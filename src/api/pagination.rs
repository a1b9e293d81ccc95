//! Pagination block attached to every list response

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl Pagination {
    /// Zeroed block used when a listing could not be produced
    pub fn empty() -> Self {
        Self {
            total_items: 0,
            total_pages: 0,
            current_page: 1,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty()
    }
}
