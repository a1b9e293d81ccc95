//! Detail page loader.
//!
//! One property per visit. A failure is terminal: nothing is retried until
//! the shopper opens a property again.

use crate::client::{CatalogApi, ClientError};
use crate::domain::{PropertyDetail, PropertyDetailResponse};

use super::ticket::{RequestTracker, Ticket};

const NOT_FOUND: &str = "Imóvel não encontrado";
const MISSING_ID: &str = "ID do imóvel é obrigatório";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Failed(String),
    Loaded(Box<PropertyDetail>),
}

#[derive(Debug, Clone)]
pub struct DetailTicket {
    pub ticket: Ticket,
    pub property_id: String,
}

#[derive(Debug)]
pub struct DetailLoader {
    property_id: Option<String>,
    state: DetailState,
    tracker: RequestTracker,
}

impl Default for DetailLoader {
    fn default() -> Self {
        Self {
            property_id: None,
            state: DetailState::Loading,
            tracker: RequestTracker::default(),
        }
    }
}

impl DetailLoader {
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn property_id(&self) -> Option<&str> {
        self.property_id.as_deref()
    }

    /// Start showing `property_id`. Any response for a previous id is
    /// discarded from now on. Returns `None` for a blank id.
    pub fn open(&mut self, property_id: &str) -> Option<DetailTicket> {
        let property_id = property_id.trim();
        let ticket = self.tracker.issue();

        if property_id.is_empty() {
            self.property_id = None;
            self.state = DetailState::Failed(MISSING_ID.to_string());
            return None;
        }

        self.property_id = Some(property_id.to_string());
        self.state = DetailState::Loading;

        Some(DetailTicket {
            ticket,
            property_id: property_id.to_string(),
        })
    }

    pub fn commit(
        &mut self,
        ticket: DetailTicket,
        result: Result<PropertyDetailResponse, ClientError>,
    ) -> bool {
        if !self.tracker.is_current(ticket.ticket) {
            tracing::debug!(property_id = %ticket.property_id, "Discarding superseded detail response");
            return false;
        }

        self.state = match result {
            Ok(response) => match response.data {
                Some(detail) if response.status => DetailState::Loaded(Box::new(detail)),
                _ if response.message.is_empty() => DetailState::Failed(NOT_FOUND.to_string()),
                _ => DetailState::Failed(response.message),
            },
            Err(e) => {
                tracing::warn!(property_id = %ticket.property_id, error = %e, "Detail fetch failed");
                DetailState::Failed(e.to_string())
            }
        };
        true
    }

    /// Open `property_id` and load it.
    pub async fn load(&mut self, api: &dyn CatalogApi, property_id: &str) -> &DetailState {
        if let Some(ticket) = self.open(property_id) {
            let result = api.property_detail(&ticket.property_id).await;
            self.commit(ticket, result);
        }
        &self.state
    }
}
