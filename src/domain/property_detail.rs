use serde::{Deserialize, Serialize};

use super::catalog::{Amenity, Negotiation, PropertyType};
use super::locations::{City, Neighborhood, State};
use super::properties::PropertyImage;
use crate::api::Envelope;

/// Video attached to a listing; `order` is the display position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyVideo {
    pub id: String,
    pub url: String,
    pub order: i32,
}

/// Full listing as returned by `get_propertie_client`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyDetail {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub code: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub state: Option<State>,
    pub city: Option<City>,
    pub neighborhood: Option<Neighborhood>,
    pub street: Option<String>,
    pub address_number: Option<String>,
    pub address_complement: Option<String>,
    pub cep: Option<String>,
    pub sale_value: Option<f64>,
    pub lease_value: Option<f64>,
    pub condominium_value: Option<f64>,
    pub iptu_value: Option<f64>,
    pub value_fire_insurance: Option<f64>,
    pub financing: Option<bool>,
    #[serde(default)]
    pub negotiations: Vec<Negotiation>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    pub number_bedrooms: Option<i32>,
    pub number_suites: Option<i32>,
    pub number_bathrooms: Option<i32>,
    pub number_parking_spaces: Option<i32>,
    pub number_rooms: Option<i32>,
    pub total_area: Option<f64>,
    pub private_area: Option<f64>,
    pub useful_area: Option<f64>,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
    #[serde(default)]
    pub videos: Vec<PropertyVideo>,
}

pub type PropertyDetailResponse = Envelope<Option<PropertyDetail>>;
