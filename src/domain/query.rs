//! Query-string coercion and the argument records sent to each procedure.
//!
//! Every list endpoint accepts optional string parameters. Numeric values are
//! coerced permissively (anything unparseable becomes `None`), while values
//! drawn from a closed vocabulary are validated and rejected at the boundary.

use serde::Serialize;
use std::str::FromStr;

use super::catalog::{Amenity, Negotiation, PropertyOrder, PropertyType, UnknownVariant};
use crate::api::QueryString;

/// Procedure names exposed by the database
pub mod procedures {
    pub const CITIES: &str = "get_cities_properties";
    pub const NEIGHBORHOODS: &str = "get_neighborhoods_properties";
    pub const PROPERTIES: &str = "get_properties_client";
    pub const PROPERTY_DETAIL: &str = "get_propertie_client";
}

/// A vocabulary parameter carried a value outside its enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Parâmetro inválido: {name}={value}")]
pub struct InvalidParameter {
    pub name: &'static str,
    pub value: String,
}

impl InvalidParameter {
    fn from_variant(name: &'static str, err: UnknownVariant) -> Self {
        Self {
            name,
            value: err.value,
        }
    }
}

// ============================================================================
// Coercion
// ============================================================================

pub mod coerce {
    /// Base-10 integer prefix parse.
    ///
    /// Leading whitespace is skipped, an optional sign is accepted and digits
    /// are consumed until the first non-digit. Returns `None` when no digit is
    /// found or the value overflows.
    pub fn int(raw: Option<&str>) -> Option<i64> {
        let s = raw?.trim_start();
        let bytes = s.as_bytes();
        let mut end = 0;

        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == digits_start {
            return None;
        }

        s[..end].parse().ok()
    }

    /// Permissive decimal prefix parse (sign, digits, fraction, exponent).
    ///
    /// No range validation is applied. Non-finite results are `None` since
    /// they have no JSON representation.
    pub fn float(raw: Option<&str>) -> Option<f64> {
        let s = raw?.trim_start();
        let bytes = s.as_bytes();
        let is_digit = |i: usize| i < bytes.len() && bytes[i].is_ascii_digit();
        let mut end = 0;

        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            end += 1;
        }

        let mut digits = 0;
        while is_digit(end) {
            end += 1;
            digits += 1;
        }

        if end < bytes.len() && bytes[end] == b'.' {
            let mut cursor = end + 1;
            let mut fraction = 0;
            while is_digit(cursor) {
                cursor += 1;
                fraction += 1;
            }
            if digits + fraction > 0 {
                end = cursor;
                digits += fraction;
            }
        }

        if digits == 0 {
            return None;
        }

        if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut cursor = end + 1;
            if cursor < bytes.len() && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
                cursor += 1;
            }
            let exponent_start = cursor;
            while is_digit(cursor) {
                cursor += 1;
            }
            if cursor > exponent_start {
                end = cursor;
            }
        }

        s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Comma-separated list. Blank input or a list with no non-empty segment
    /// is `None`, never an empty list.
    pub fn list(raw: Option<&str>) -> Option<Vec<String>> {
        let s = raw?;
        if s.trim().is_empty() {
            return None;
        }

        let items: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        if items.is_empty() {
            None
        } else {
            Some(items)
        }
    }

    /// Free text, trimmed; empty after trimming is `None`.
    pub fn text(raw: Option<&str>) -> Option<String> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Opaque identifier, forwarded unchanged when non-empty.
    pub fn id(raw: Option<&str>) -> Option<String> {
        raw.filter(|s| !s.is_empty()).map(str::to_string)
    }

    pub fn flag(raw: Option<&str>) -> Option<bool> {
        match raw?.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

fn vocabulary<T>(q: &QueryString, name: &'static str) -> Result<Option<T>, InvalidParameter>
where
    T: FromStr<Err = UnknownVariant>,
{
    match q.get(name).filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| InvalidParameter::from_variant(name, e)),
        None => Ok(None),
    }
}

fn amenities(q: &QueryString) -> Result<Option<Vec<Amenity>>, InvalidParameter> {
    coerce::list(q.get("amenities"))
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.parse()
                        .map_err(|e| InvalidParameter::from_variant("amenities", e))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
}

fn set_display<T: std::fmt::Display>(q: &mut QueryString, key: &str, value: Option<T>) {
    if let Some(value) = value {
        q.set(key, value.to_string());
    }
}

// ============================================================================
// Cities
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitiesQuery {
    pub page: Option<i64>,
    pub items_page: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CitiesArgs<'a> {
    pub p_page: Option<i64>,
    pub p_items_page: Option<i64>,
    pub p_search: Option<&'a str>,
}

impl CitiesQuery {
    pub fn parse(q: &QueryString) -> Self {
        Self {
            page: coerce::int(q.get("page")),
            items_page: coerce::int(q.get("items_page")),
            search: coerce::text(q.get("search")),
        }
    }

    pub fn args(&self) -> CitiesArgs<'_> {
        CitiesArgs {
            p_page: self.page,
            p_items_page: self.items_page,
            p_search: self.search.as_deref(),
        }
    }

    pub fn to_query(&self) -> QueryString {
        let mut q = QueryString::default();
        set_display(&mut q, "page", self.page);
        set_display(&mut q, "items_page", self.items_page);
        set_display(&mut q, "search", self.search.as_deref());
        q
    }
}

// ============================================================================
// Neighborhoods
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborhoodsQuery {
    pub page: Option<i64>,
    pub items_page: Option<i64>,
    pub city_id: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NeighborhoodsArgs<'a> {
    pub p_page: Option<i64>,
    pub p_items_page: Option<i64>,
    pub p_city_id: Option<&'a str>,
    pub p_search: Option<&'a str>,
}

impl NeighborhoodsQuery {
    pub fn parse(q: &QueryString) -> Self {
        Self {
            page: coerce::int(q.get("page")),
            items_page: coerce::int(q.get("items_page")),
            city_id: coerce::id(q.get("city_id")),
            search: coerce::text(q.get("search")),
        }
    }

    pub fn args(&self) -> NeighborhoodsArgs<'_> {
        NeighborhoodsArgs {
            p_page: self.page,
            p_items_page: self.items_page,
            p_city_id: self.city_id.as_deref(),
            p_search: self.search.as_deref(),
        }
    }

    pub fn to_query(&self) -> QueryString {
        let mut q = QueryString::default();
        set_display(&mut q, "page", self.page);
        set_display(&mut q, "items_page", self.items_page);
        set_display(&mut q, "city_id", self.city_id.as_deref());
        set_display(&mut q, "search", self.search.as_deref());
        q
    }
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertiesQuery {
    pub code: Option<String>,
    pub property_type: Option<PropertyType>,
    pub city_id: Option<String>,
    pub neighborhood_id: Option<String>,
    pub negotiation: Option<Negotiation>,
    pub page: Option<i64>,
    pub items_page: Option<i64>,
    pub minimum_value: Option<f64>,
    pub maximum_value: Option<f64>,
    pub number_bedrooms: Option<i64>,
    pub number_bathrooms: Option<i64>,
    pub number_parking_spaces: Option<i64>,
    pub minimum_private_area: Option<f64>,
    pub maximum_private_area: Option<f64>,
    pub amenities: Option<Vec<Amenity>>,
    pub order: Option<PropertyOrder>,
    pub only_featured: Option<bool>,
}

/// Argument record for `get_properties_client`.
///
/// `p_only_featured` is left out entirely unless the caller asked for it, so
/// procedures that predate the flag keep resolving.
#[derive(Debug, Serialize)]
pub struct PropertiesArgs<'a> {
    pub p_code: Option<&'a str>,
    pub p_type: Option<PropertyType>,
    pub p_city_id: Option<&'a str>,
    pub p_neighborhood_id: Option<&'a str>,
    pub p_negotiation: Option<Negotiation>,
    pub p_page: Option<i64>,
    pub p_items_page: Option<i64>,
    pub p_minimum_value: Option<f64>,
    pub p_maximum_value: Option<f64>,
    pub p_number_bedrooms: Option<i64>,
    pub p_number_bathrooms: Option<i64>,
    pub p_number_parking_spaces: Option<i64>,
    pub p_minimum_private_area: Option<f64>,
    pub p_maximum_private_area: Option<f64>,
    pub p_amenities: Option<&'a [Amenity]>,
    pub p_order: Option<PropertyOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_only_featured: Option<bool>,
}

impl PropertiesQuery {
    /// Validating parse: any vocabulary value outside its enumeration fails.
    pub fn parse(q: &QueryString) -> Result<Self, InvalidParameter> {
        Ok(Self {
            code: coerce::text(q.get("code")),
            property_type: vocabulary(q, "type")?,
            city_id: coerce::id(q.get("city_id")),
            neighborhood_id: coerce::id(q.get("neighborhood_id")),
            negotiation: vocabulary(q, "negotiation")?,
            page: coerce::int(q.get("page")),
            items_page: coerce::int(q.get("items_page")),
            minimum_value: coerce::float(q.get("minimum_value")),
            maximum_value: coerce::float(q.get("maximum_value")),
            number_bedrooms: coerce::int(q.get("number_bedrooms")),
            number_bathrooms: coerce::int(q.get("number_bathrooms")),
            number_parking_spaces: coerce::int(q.get("number_parking_spaces")),
            minimum_private_area: coerce::float(q.get("minimum_private_area")),
            maximum_private_area: coerce::float(q.get("maximum_private_area")),
            amenities: amenities(q)?,
            order: vocabulary(q, "order")?,
            only_featured: coerce::flag(q.get("only_featured")),
        })
    }

    pub fn args(&self) -> PropertiesArgs<'_> {
        PropertiesArgs {
            p_code: self.code.as_deref(),
            p_type: self.property_type,
            p_city_id: self.city_id.as_deref(),
            p_neighborhood_id: self.neighborhood_id.as_deref(),
            p_negotiation: self.negotiation,
            p_page: self.page,
            p_items_page: self.items_page,
            p_minimum_value: self.minimum_value,
            p_maximum_value: self.maximum_value,
            p_number_bedrooms: self.number_bedrooms,
            p_number_bathrooms: self.number_bathrooms,
            p_number_parking_spaces: self.number_parking_spaces,
            p_minimum_private_area: self.minimum_private_area,
            p_maximum_private_area: self.maximum_private_area,
            p_amenities: self.amenities.as_deref(),
            p_order: self.order,
            p_only_featured: self.only_featured,
        }
    }

    /// Query string carrying only the parameters that are present.
    pub fn to_query(&self) -> QueryString {
        let mut q = QueryString::default();
        set_display(&mut q, "code", self.code.as_deref());
        set_display(&mut q, "type", self.property_type);
        set_display(&mut q, "city_id", self.city_id.as_deref());
        set_display(&mut q, "neighborhood_id", self.neighborhood_id.as_deref());
        set_display(&mut q, "negotiation", self.negotiation);
        set_display(&mut q, "page", self.page);
        set_display(&mut q, "items_page", self.items_page);
        set_display(&mut q, "minimum_value", self.minimum_value);
        set_display(&mut q, "maximum_value", self.maximum_value);
        set_display(&mut q, "number_bedrooms", self.number_bedrooms);
        set_display(&mut q, "number_bathrooms", self.number_bathrooms);
        set_display(&mut q, "number_parking_spaces", self.number_parking_spaces);
        set_display(&mut q, "minimum_private_area", self.minimum_private_area);
        set_display(&mut q, "maximum_private_area", self.maximum_private_area);
        if let Some(amenities) = self.amenities.as_ref().filter(|a| !a.is_empty()) {
            let joined: Vec<&str> = amenities.iter().map(Amenity::as_str).collect();
            q.set("amenities", joined.join(","));
        }
        set_display(&mut q, "order", self.order);
        set_display(&mut q, "only_featured", self.only_featured);
        q
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyDetailArgs<'a> {
    pub p_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn int_follows_prefix_rules() {
        assert_eq!(coerce::int(Some("42")), Some(42));
        assert_eq!(coerce::int(Some("  7 rooms")), Some(7));
        assert_eq!(coerce::int(Some("-3")), Some(-3));
        assert_eq!(coerce::int(Some("3.9")), Some(3));
        assert_eq!(coerce::int(Some("0")), Some(0));
        assert_eq!(coerce::int(Some("abc")), None);
        assert_eq!(coerce::int(Some("")), None);
        assert_eq!(coerce::int(Some("-")), None);
        assert_eq!(coerce::int(None), None);
        assert_eq!(coerce::int(Some("99999999999999999999999")), None);
    }

    #[test]
    fn float_never_yields_nan() {
        assert_eq!(coerce::float(Some("250000.50")), Some(250000.5));
        assert_eq!(coerce::float(Some(".5")), Some(0.5));
        assert_eq!(coerce::float(Some("5.")), Some(5.0));
        assert_eq!(coerce::float(Some("1e3xyz")), Some(1000.0));
        assert_eq!(coerce::float(Some("2e")), Some(2.0));
        assert_eq!(coerce::float(Some("-12,5")), Some(-12.0));
        assert_eq!(coerce::float(Some(".")), None);
        assert_eq!(coerce::float(Some("NaN")), None);
        assert_eq!(coerce::float(Some("R$100")), None);
        assert_eq!(coerce::float(Some("1e999")), None);
        assert_eq!(coerce::float(None), None);
    }

    #[test]
    fn blank_lists_are_none() {
        assert_eq!(coerce::list(Some("")), None);
        assert_eq!(coerce::list(Some("   ")), None);
        assert_eq!(coerce::list(Some(",,,")), None);
        assert_eq!(
            coerce::list(Some("pool,,grill,")),
            Some(vec!["pool".to_string(), "grill".to_string()])
        );
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(coerce::text(Some("  AP-102 ")), Some("AP-102".to_string()));
        assert_eq!(coerce::text(Some("   ")), None);
        assert_eq!(coerce::id(Some("")), None);
        assert_eq!(coerce::flag(Some("true")), Some(true));
        assert_eq!(coerce::flag(Some("yes")), None);
    }

    #[test]
    fn properties_scenario_forwards_typed_arguments() {
        let q = QueryString::parse("type=house&number_bedrooms=3&amenities=pool,grill");
        let query = PropertiesQuery::parse(&q).unwrap();
        let args = serde_json::to_value(query.args()).unwrap();

        assert_eq!(
            args,
            json!({
                "p_code": null,
                "p_type": "house",
                "p_city_id": null,
                "p_neighborhood_id": null,
                "p_negotiation": null,
                "p_page": null,
                "p_items_page": null,
                "p_minimum_value": null,
                "p_maximum_value": null,
                "p_number_bedrooms": 3,
                "p_number_bathrooms": null,
                "p_number_parking_spaces": null,
                "p_minimum_private_area": null,
                "p_maximum_private_area": null,
                "p_amenities": ["pool", "grill"],
                "p_order": null
            })
        );
    }

    #[test]
    fn only_featured_is_forwarded_when_present() {
        let q = QueryString::parse("only_featured=true&items_page=12");
        let args = serde_json::to_value(PropertiesQuery::parse(&q).unwrap().args()).unwrap();
        assert_eq!(args["p_only_featured"], json!(true));
        assert_eq!(args["p_items_page"], json!(12));
    }

    #[test]
    fn unknown_vocabulary_is_rejected() {
        let err = PropertiesQuery::parse(&QueryString::parse("type=castle")).unwrap_err();
        assert_eq!(err.name, "type");
        assert_eq!(err.to_string(), "Parâmetro inválido: type=castle");

        let err = PropertiesQuery::parse(&QueryString::parse("amenities=pool,sauna")).unwrap_err();
        assert_eq!(err.name, "amenities");
        assert_eq!(err.value, "sauna");

        assert!(PropertiesQuery::parse(&QueryString::parse("order=random")).is_err());
        // An empty value is simply absent.
        assert!(PropertiesQuery::parse(&QueryString::parse("type=&order="))
            .unwrap()
            .property_type
            .is_none());
    }

    #[test]
    fn to_query_skips_absent_parameters() {
        let query = PropertiesQuery {
            negotiation: Some(Negotiation::Lease),
            minimum_value: Some(1500.0),
            amenities: Some(vec![Amenity::Pool, Amenity::Closet]),
            items_page: Some(12),
            ..Default::default()
        };
        assert_eq!(
            query.to_query().to_string(),
            "negotiation=lease&items_page=12&minimum_value=1500&amenities=pool%2Ccloset"
        );

        let cities = CitiesQuery {
            items_page: Some(100),
            ..Default::default()
        };
        assert_eq!(cities.to_query().to_string(), "items_page=100");
    }

    #[test]
    fn neighborhood_args_keep_every_key() {
        let q = QueryString::parse("city_id=c-1&search=%20centro%20");
        let args = serde_json::to_value(NeighborhoodsQuery::parse(&q).args()).unwrap();
        assert_eq!(
            args,
            json!({"p_page": null, "p_items_page": null, "p_city_id": "c-1", "p_search": "centro"})
        );
    }
}
