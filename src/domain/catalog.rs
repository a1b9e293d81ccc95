//! Closed vocabularies shared by listings, filters and the procedure arguments.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Returned when a wire value is not part of a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Kind of real-estate unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Apartment,
    Land,
    Office,
    Store,
    Farm,
    SmallFarm,
}

impl PropertyType {
    pub const ALL: [PropertyType; 7] = [
        Self::House,
        Self::Apartment,
        Self::Land,
        Self::Office,
        Self::Store,
        Self::Farm,
        Self::SmallFarm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Land => "land",
            Self::Office => "office",
            Self::Store => "store",
            Self::Farm => "farm",
            Self::SmallFarm => "small_farm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::House => "Casa",
            Self::Apartment => "Apartamento",
            Self::Land => "Terreno",
            Self::Office => "Escritório",
            Self::Store => "Loja",
            Self::Farm => "Fazenda",
            Self::SmallFarm => "Chácara",
        }
    }
}

impl FromStr for PropertyType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("type", s))
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction mode offered for a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Negotiation {
    Sale,
    Lease,
}

impl Negotiation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Lease => "lease",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sale => "Venda",
            Self::Lease => "Locação",
        }
    }
}

impl FromStr for Negotiation {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(Self::Sale),
            "lease" => Ok(Self::Lease),
            other => Err(UnknownVariant::new("negotiation", other)),
        }
    }
}

impl std::fmt::Display for Negotiation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order understood by `get_properties_client`.
///
/// Absence of an order means "most recent first", decided by the procedure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertyOrder {
    GreaterValue,
    LowestValue,
    LargestPrivateArea,
    SmallestPrivateArea,
    LargestNumberBedrooms,
    SmallestNumberBedrooms,
}

impl PropertyOrder {
    pub const ALL: [PropertyOrder; 6] = [
        Self::GreaterValue,
        Self::LowestValue,
        Self::LargestPrivateArea,
        Self::SmallestPrivateArea,
        Self::LargestNumberBedrooms,
        Self::SmallestNumberBedrooms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterValue => "greater_value",
            Self::LowestValue => "lowest_value",
            Self::LargestPrivateArea => "largest_private_area",
            Self::SmallestPrivateArea => "smallest_private_area",
            Self::LargestNumberBedrooms => "largest_number_bedrooms",
            Self::SmallestNumberBedrooms => "smallest_number_bedrooms",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::GreaterValue => "Maior Valor",
            Self::LowestValue => "Menor Valor",
            Self::LargestPrivateArea => "Maior Área",
            Self::SmallestPrivateArea => "Menor Área",
            Self::LargestNumberBedrooms => "Mais Quartos",
            Self::SmallestNumberBedrooms => "Menos Quartos",
        }
    }
}

impl FromStr for PropertyOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("order", s))
    }
}

impl std::fmt::Display for PropertyOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feature tag attached to a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    AirConditioning,
    Elevator,
    Pool,
    Grill,
    Kitchen,
    Balcony,
    LaundryRoom,
    HomeOffice,
    Internet,
    Interfone,
    Doorman,
    GourmetArea,
    Terrace,
    Closet,
    BuiltInFurniture,
}

impl Amenity {
    pub const ALL: [Amenity; 15] = [
        Self::AirConditioning,
        Self::Elevator,
        Self::Pool,
        Self::Grill,
        Self::Kitchen,
        Self::Balcony,
        Self::LaundryRoom,
        Self::HomeOffice,
        Self::Internet,
        Self::Interfone,
        Self::Doorman,
        Self::GourmetArea,
        Self::Terrace,
        Self::Closet,
        Self::BuiltInFurniture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AirConditioning => "air_conditioning",
            Self::Elevator => "elevator",
            Self::Pool => "pool",
            Self::Grill => "grill",
            Self::Kitchen => "kitchen",
            Self::Balcony => "balcony",
            Self::LaundryRoom => "laundry_room",
            Self::HomeOffice => "home_office",
            Self::Internet => "internet",
            Self::Interfone => "interfone",
            Self::Doorman => "doorman",
            Self::GourmetArea => "gourmet_area",
            Self::Terrace => "terrace",
            Self::Closet => "closet",
            Self::BuiltInFurniture => "built_in_furniture",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AirConditioning => "Ar Condicionado",
            Self::Elevator => "Elevador",
            Self::Pool => "Piscina",
            Self::Grill => "Churrasqueira",
            Self::Kitchen => "Cozinha",
            Self::Balcony => "Varanda",
            Self::LaundryRoom => "Área de Serviço",
            Self::HomeOffice => "Escritório",
            Self::Internet => "Internet",
            Self::Interfone => "Interfone",
            Self::Doorman => "Portaria",
            Self::GourmetArea => "Área Gourmet",
            Self::Terrace => "Terraço",
            Self::Closet => "Closet",
            Self::BuiltInFurniture => "Mobília Planejada",
        }
    }
}

impl FromStr for Amenity {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("amenity", s))
    }
}

impl std::fmt::Display for Amenity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde() {
        for amenity in Amenity::ALL {
            let json = serde_json::to_string(&amenity).unwrap();
            assert_eq!(json, format!("\"{}\"", amenity.as_str()));
            assert_eq!(amenity.as_str().parse::<Amenity>().unwrap(), amenity);
        }
        for order in PropertyOrder::ALL {
            assert_eq!(order.to_string().parse::<PropertyOrder>().unwrap(), order);
        }
        assert_eq!(
            serde_json::to_string(&PropertyType::SmallFarm).unwrap(),
            "\"small_farm\""
        );
    }

    #[test]
    fn unknown_values_are_rejected() {
        let err = "castle".parse::<PropertyType>().unwrap_err();
        assert_eq!(err.kind, "type");
        assert_eq!(err.value, "castle");
        assert!("Sale".parse::<Negotiation>().is_err());
        assert!("sauna".parse::<Amenity>().is_err());
    }
}
