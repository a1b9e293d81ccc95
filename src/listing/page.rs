//! Listing page controller: URL → fetch → displayed results.

use crate::api::QueryString;
use crate::client::{CatalogApi, ClientError};
use crate::domain::query::{coerce, PropertiesQuery};
use crate::domain::{PropertiesResponse, Property, PropertyOrder};

use super::filters::{self, FilterDraft, ListingFilters, ORDER_KEY, PAGE_KEY};
use super::ticket::{RequestTracker, Ticket};

pub const ITEMS_PER_PAGE: i64 = 12;

const LOAD_FAILED: &str = "Erro ao carregar imóveis";

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    Failed(String),
    Ready,
}

/// A fetch issued by [`ListingPage::begin_fetch`]
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub ticket: Ticket,
    pub query: PropertiesQuery,
}

#[derive(Debug)]
pub struct ListingPage {
    query: QueryString,
    filters: ListingFilters,
    current_page: u32,
    total_pages: u32,
    total_items: u64,
    properties: Vec<Property>,
    phase: Phase,
    tracker: RequestTracker,
}

impl ListingPage {
    pub fn new(query: QueryString) -> Self {
        let mut page = Self {
            query: QueryString::default(),
            filters: ListingFilters::default(),
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            properties: Vec::new(),
            phase: Phase::Loading,
            tracker: RequestTracker::default(),
        };
        page.navigate(query);
        page
    }

    /// Re-read state from the URL after a navigation.
    pub fn navigate(&mut self, query: QueryString) {
        self.current_page = coerce::int(query.get(PAGE_KEY))
            .and_then(|p| u32::try_from(p).ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        self.filters = ListingFilters::from_query(&query);
        self.query = query;
    }

    pub fn query(&self) -> &QueryString {
        &self.query
    }

    pub fn filters(&self) -> &ListingFilters {
        &self.filters
    }

    pub fn order(&self) -> Option<PropertyOrder> {
        self.query.get(ORDER_KEY).and_then(|s| s.parse().ok())
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Fresh draft seeded with the committed filters.
    pub fn draft(&self) -> FilterDraft {
        FilterDraft::new(&self.filters)
    }

    /// Arguments for the next fetch; marks the page as loading.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.phase = Phase::Loading;

        let f = &self.filters;
        let query = PropertiesQuery {
            code: f.code.clone(),
            property_type: f.property_type,
            city_id: f.city_id.clone(),
            neighborhood_id: f.neighborhood_id.clone(),
            negotiation: f.negotiation,
            page: Some(i64::from(self.current_page)),
            items_page: Some(ITEMS_PER_PAGE),
            minimum_value: f.minimum_value,
            maximum_value: f.maximum_value,
            number_bedrooms: f.number_bedrooms,
            number_bathrooms: f.number_bathrooms,
            number_parking_spaces: f.number_parking_spaces,
            minimum_private_area: f.minimum_private_area,
            maximum_private_area: f.maximum_private_area,
            amenities: (!f.amenities.is_empty()).then(|| f.amenities.clone()),
            order: self.order(),
            only_featured: None,
        };

        FetchTicket {
            ticket: self.tracker.issue(),
            query,
        }
    }

    /// Apply a fetch result. Returns `false` when a newer fetch was issued in
    /// the meantime and the result was discarded.
    pub fn commit(
        &mut self,
        fetch: FetchTicket,
        result: Result<PropertiesResponse, ClientError>,
    ) -> bool {
        if !self.tracker.is_current(fetch.ticket) {
            tracing::debug!(ticket = ?fetch.ticket, "Discarding superseded listing response");
            return false;
        }

        match result {
            Ok(response) if response.status => {
                self.properties = response.data;
                self.total_pages = response.pagination.total_pages;
                self.total_items = response.pagination.total_items;
                self.phase = Phase::Ready;
            }
            Ok(response) => {
                let message = if response.message.is_empty() {
                    LOAD_FAILED.to_string()
                } else {
                    response.message
                };
                self.phase = Phase::Failed(message);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Listing fetch failed");
                self.properties.clear();
                self.phase = Phase::Failed(e.to_string());
            }
        }
        true
    }

    /// Fetch and commit the current URL state.
    pub async fn load(&mut self, api: &dyn CatalogApi) -> bool {
        let fetch = self.begin_fetch();
        let result = api.properties(&fetch.query).await;
        self.commit(fetch, result)
    }

    /// URL for `page`, or `None` when it is out of range.
    pub fn request_page(&self, page: i64) -> Option<QueryString> {
        filters::change_page(&self.query, page, self.total_pages)
    }

    pub fn apply_filters(&self, draft: &FilterDraft) -> QueryString {
        filters::apply(draft.filters(), &self.query)
    }

    pub fn clear_filters(&self) -> QueryString {
        filters::clear(&self.query)
    }

    pub fn sort_by(&self, order: Option<PropertyOrder>) -> QueryString {
        filters::set_order(&self.query, order)
    }

    /// Location to navigate to for `query`.
    pub fn href(query: &QueryString) -> String {
        if query.is_empty() {
            "/properties".to_string()
        } else {
            format!("/properties?{}", query)
        }
    }
}
