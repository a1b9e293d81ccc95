//! Option lists behind the city and neighborhood selectors.

use crate::client::{CatalogApi, ClientError};
use crate::domain::query::{CitiesQuery, NeighborhoodsQuery};
use crate::domain::{City, Neighborhood, NeighborhoodsResponse};

use super::filters::NeighborhoodReload;
use super::ticket::{RequestTracker, Ticket};

/// Selectors show every option on a single page
pub const OPTIONS_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default)]
pub struct CityOptions {
    cities: Vec<City>,
    loaded: bool,
}

impl CityOptions {
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load once; failures leave the list empty.
    pub async fn load(&mut self, api: &dyn CatalogApi) {
        let query = CitiesQuery {
            items_page: Some(OPTIONS_PAGE_SIZE),
            ..Default::default()
        };

        match api.cities(&query).await {
            Ok(response) if response.status => self.cities = response.data,
            Ok(response) => {
                tracing::warn!(message = %response.message, "City options unavailable")
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load city options"),
        }
        self.loaded = true;
    }
}

#[derive(Debug, Default)]
pub struct NeighborhoodOptions {
    city_id: Option<String>,
    neighborhoods: Vec<Neighborhood>,
    loading: bool,
    tracker: RequestTracker,
}

impl NeighborhoodOptions {
    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    pub fn city_id(&self) -> Option<&str> {
        self.city_id.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// React to a city edit. Returns the fetch to perform, if any; a city
    /// whose options are already loaded or loading is not fetched again.
    pub fn reload(&mut self, reload: NeighborhoodReload) -> Option<(Ticket, NeighborhoodsQuery)> {
        match reload {
            NeighborhoodReload::Clear => {
                self.tracker.invalidate();
                self.city_id = None;
                self.neighborhoods.clear();
                self.loading = false;
                None
            }
            NeighborhoodReload::Load(city_id) => {
                if self.city_id.as_deref() == Some(city_id.as_str()) {
                    return None;
                }
                self.city_id = Some(city_id.clone());
                self.loading = true;
                let query = NeighborhoodsQuery {
                    city_id: Some(city_id),
                    items_page: Some(OPTIONS_PAGE_SIZE),
                    ..Default::default()
                };
                Some((self.tracker.issue(), query))
            }
        }
    }

    pub fn commit(
        &mut self,
        ticket: Ticket,
        result: Result<NeighborhoodsResponse, ClientError>,
    ) -> bool {
        if !self.tracker.is_current(ticket) {
            return false;
        }

        self.loading = false;
        match result {
            Ok(response) if response.status => self.neighborhoods = response.data,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load neighborhood options");
                self.neighborhoods.clear();
            }
        }
        true
    }

    pub async fn load(&mut self, api: &dyn CatalogApi, reload: NeighborhoodReload) {
        if let Some((ticket, query)) = self.reload(reload) {
            let result = api.neighborhoods(&query).await;
            self.commit(ticket, result);
        }
    }
}
