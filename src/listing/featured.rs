//! Featured listings carousel on the home page.

use crate::client::{CatalogApi, ClientError};
use crate::domain::query::PropertiesQuery;
use crate::domain::{PropertiesResponse, Property};

use super::ticket::{RequestTracker, Ticket};

/// Carousel size
pub const FEATURED_LIMIT: i64 = 12;

const LOAD_FAILED: &str = "Erro ao carregar imóveis em destaque";

#[derive(Debug, Clone, PartialEq)]
pub enum FeaturedState {
    Loading,
    Failed(String),
    Ready(Vec<Property>),
}

#[derive(Debug)]
pub struct FeaturedProperties {
    state: FeaturedState,
    tracker: RequestTracker,
}

impl Default for FeaturedProperties {
    fn default() -> Self {
        Self {
            state: FeaturedState::Loading,
            tracker: RequestTracker::default(),
        }
    }
}

impl FeaturedProperties {
    pub fn state(&self) -> &FeaturedState {
        &self.state
    }

    /// Listings to show; empty while loading or after a failure.
    pub fn properties(&self) -> &[Property] {
        match &self.state {
            FeaturedState::Ready(properties) => properties,
            _ => &[],
        }
    }

    /// The section is hidden once loading ends with nothing to show.
    pub fn is_hidden(&self) -> bool {
        !matches!(self.state, FeaturedState::Loading) && self.properties().is_empty()
    }

    pub fn begin_fetch(&mut self) -> (Ticket, PropertiesQuery) {
        self.state = FeaturedState::Loading;
        let query = PropertiesQuery {
            only_featured: Some(true),
            items_page: Some(FEATURED_LIMIT),
            ..Default::default()
        };
        (self.tracker.issue(), query)
    }

    pub fn commit(
        &mut self,
        ticket: Ticket,
        result: Result<PropertiesResponse, ClientError>,
    ) -> bool {
        if !self.tracker.is_current(ticket) {
            return false;
        }

        self.state = match result {
            Ok(response) if response.status => FeaturedState::Ready(response.data),
            Ok(response) if response.message.is_empty() => {
                FeaturedState::Failed(LOAD_FAILED.to_string())
            }
            Ok(response) => FeaturedState::Failed(response.message),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load featured properties");
                FeaturedState::Failed(e.to_string())
            }
        };
        true
    }

    pub async fn load(&mut self, api: &dyn CatalogApi) -> &FeaturedState {
        let (ticket, query) = self.begin_fetch();
        let result = api.properties(&query).await;
        self.commit(ticket, result);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ListEnvelope, Pagination};
    use crate::testing::{sample_property, FakeCatalog};

    #[tokio::test]
    async fn requests_only_featured_listings() {
        let api = FakeCatalog::default();
        let mut featured = FeaturedProperties::default();
        featured.load(&api).await;

        let requests = api.property_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].to_query().to_string(),
            "items_page=12&only_featured=true"
        );
        assert_eq!(featured.properties().len(), 1);
        assert!(!featured.is_hidden());
    }

    #[test]
    fn failure_hides_the_section() {
        let mut featured = FeaturedProperties::default();
        assert!(!featured.is_hidden());

        let (ticket, _) = featured.begin_fetch();
        let failed = ListEnvelope {
            status: false,
            message: String::new(),
            data: Vec::new(),
            pagination: Pagination::empty(),
        };
        featured.commit(ticket, Ok(failed));

        assert_eq!(featured.state(), &FeaturedState::Failed(LOAD_FAILED.into()));
        assert!(featured.is_hidden());
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut featured = FeaturedProperties::default();
        let (older, _) = featured.begin_fetch();
        let (newer, _) = featured.begin_fetch();
        let ready = |ids: &[&str]| ListEnvelope {
            status: true,
            message: String::new(),
            data: ids.iter().map(|id| sample_property(id)).collect(),
            pagination: Pagination::empty(),
        };

        assert!(featured.commit(newer, Ok(ready(&["b"]))));
        assert!(!featured.commit(older, Ok(ready(&["a1", "a2"]))));
        assert_eq!(featured.properties()[0].id, "b");
    }
}
