//! Test doubles shared by the unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::api::{Envelope, ListEnvelope, Pagination};
use crate::client::{CatalogApi, ClientError};
use crate::domain::query::{CitiesQuery, NeighborhoodsQuery, PropertiesQuery};
use crate::domain::{
    CitiesResponse, City, Negotiation, Neighborhood, NeighborhoodsResponse, PropertiesResponse,
    Property, PropertyDetail, PropertyDetailResponse, PropertyType,
};
use crate::services::rpc::{RpcClient, RpcError};

#[derive(Debug, Clone)]
enum Script {
    Reply(Value),
    ProcedureError(String),
    Broken(String),
}

/// Records every call and answers with a scripted outcome.
pub struct FakeRpc {
    script: Script,
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeRpc {
    pub fn replying(value: Value) -> Self {
        Self::with(Script::Reply(value))
    }

    pub fn procedure_error(message: &str) -> Self {
        Self::with(Script::ProcedureError(message.to_string()))
    }

    /// Fails as if the response could not be decoded.
    pub fn broken(message: &str) -> Self {
        Self::with(Script::Broken(message.to_string()))
    }

    fn with(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl RpcClient for FakeRpc {
    async fn call(&self, procedure: &str, args: Value) -> Result<Value, RpcError> {
        self.calls.lock().push((procedure.to_string(), args));
        match &self.script {
            Script::Reply(value) => Ok(value.clone()),
            Script::ProcedureError(message) => Err(RpcError::Procedure {
                status: 400,
                code: None,
                message: message.clone(),
            }),
            Script::Broken(message) => Err(RpcError::Decode(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), RpcError> {
        match &self.script {
            Script::Broken(message) => Err(RpcError::Decode(message.clone())),
            _ => Ok(()),
        }
    }
}

pub fn sample_property(id: &str) -> Property {
    Property {
        id: id.to_string(),
        title: "Casa no Centro".to_string(),
        state: None,
        city: None,
        neighborhood: None,
        code: "CA-001".to_string(),
        images: Vec::new(),
        sale_value: Some(450000.0),
        lease_value: None,
        negotiations: vec![Negotiation::Sale],
        private_area: Some(120.0),
        number_bedrooms: Some(3),
        number_suites: None,
        number_parking_spaces: Some(1),
        number_bathrooms: Some(2),
    }
}

pub fn sample_detail(id: &str) -> PropertyDetail {
    PropertyDetail {
        id: id.to_string(),
        title: "Casa no Centro".to_string(),
        description: None,
        code: "CA-001".to_string(),
        property_type: PropertyType::House,
        state: None,
        city: None,
        neighborhood: None,
        street: None,
        address_number: None,
        address_complement: None,
        cep: None,
        sale_value: Some(450000.0),
        lease_value: None,
        condominium_value: None,
        iptu_value: None,
        value_fire_insurance: None,
        financing: None,
        negotiations: vec![Negotiation::Sale],
        amenities: Vec::new(),
        number_bedrooms: Some(3),
        number_suites: None,
        number_bathrooms: Some(2),
        number_parking_spaces: Some(1),
        number_rooms: None,
        total_area: None,
        private_area: Some(120.0),
        useful_area: None,
        images: Vec::new(),
        videos: Vec::new(),
    }
}

/// Catalog that always succeeds and records what was asked.
#[derive(Default)]
pub struct FakeCatalog {
    city_requests: Mutex<Vec<CitiesQuery>>,
    neighborhood_requests: Mutex<Vec<NeighborhoodsQuery>>,
    property_requests: Mutex<Vec<PropertiesQuery>>,
    detail_requests: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn city_requests(&self) -> Vec<CitiesQuery> {
        self.city_requests.lock().clone()
    }

    pub fn neighborhood_requests(&self) -> Vec<NeighborhoodsQuery> {
        self.neighborhood_requests.lock().clone()
    }

    pub fn property_requests(&self) -> Vec<PropertiesQuery> {
        self.property_requests.lock().clone()
    }

    pub fn detail_requests(&self) -> Vec<String> {
        self.detail_requests.lock().clone()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn cities(&self, query: &CitiesQuery) -> Result<CitiesResponse, ClientError> {
        self.city_requests.lock().push(query.clone());
        Ok(ListEnvelope {
            status: true,
            message: String::new(),
            data: vec![City {
                id: "c1".into(),
                name: "Cascavel".into(),
            }],
            pagination: Pagination::empty(),
        })
    }

    async fn neighborhoods(
        &self,
        query: &NeighborhoodsQuery,
    ) -> Result<NeighborhoodsResponse, ClientError> {
        self.neighborhood_requests.lock().push(query.clone());
        Ok(ListEnvelope {
            status: true,
            message: String::new(),
            data: vec![Neighborhood {
                id: "n1".into(),
                name: "Centro".into(),
            }],
            pagination: Pagination::empty(),
        })
    }

    async fn properties(&self, query: &PropertiesQuery) -> Result<PropertiesResponse, ClientError> {
        self.property_requests.lock().push(query.clone());
        Ok(ListEnvelope {
            status: true,
            message: String::new(),
            data: vec![sample_property("p1")],
            pagination: Pagination::empty(),
        })
    }

    async fn property_detail(&self, id: &str) -> Result<PropertyDetailResponse, ClientError> {
        self.detail_requests.lock().push(id.to_string());
        Ok(Envelope {
            status: true,
            message: String::new(),
            data: Some(sample_detail(id)),
        })
    }
}
