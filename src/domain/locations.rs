use serde::{Deserialize, Serialize};

use crate::api::ListEnvelope;

/// Federative unit a listing belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct State {
    pub id: String,
    pub name: String,
    pub uf: String,
}

/// City that currently has at least one listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    pub id: String,
    pub name: String,
}

/// Neighborhood that currently has at least one listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Neighborhood {
    pub id: String,
    pub name: String,
}

pub type CitiesResponse = ListEnvelope<City>;
pub type NeighborhoodsResponse = ListEnvelope<Neighborhood>;
