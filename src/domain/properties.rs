use serde::{Deserialize, Serialize};

use super::catalog::Negotiation;
use super::locations::{City, Neighborhood, State};
use crate::api::ListEnvelope;

/// Image attached to a listing; `order` is the display position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyImage {
    pub id: String,
    pub url: String,
    pub order: i32,
}

/// Listing as shown in search results and carousels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    pub title: String,
    pub state: Option<State>,
    pub city: Option<City>,
    pub neighborhood: Option<Neighborhood>,
    pub code: String,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
    pub sale_value: Option<f64>,
    pub lease_value: Option<f64>,
    #[serde(default)]
    pub negotiations: Vec<Negotiation>,
    pub private_area: Option<f64>,
    pub number_bedrooms: Option<i32>,
    pub number_suites: Option<i32>,
    pub number_parking_spaces: Option<i32>,
    pub number_bathrooms: Option<i32>,
}

pub type PropertiesResponse = ListEnvelope<Property>;
