//! Filter state for the listing page.
//!
//! The URL query string is the source of truth across navigations. While the
//! shopper edits the advanced filter form only a [`FilterDraft`] changes; the
//! URL is rewritten when the draft is applied, cleared, or when the sort
//! order or page changes.

use crate::api::QueryString;
use crate::domain::query::coerce;
use crate::domain::{Amenity, Negotiation, PropertyOrder, PropertyType};

/// Query key holding the current page
pub const PAGE_KEY: &str = "page";

/// Query key holding the sort order
pub const ORDER_KEY: &str = "order";

/// Every key owned by the advanced filter form
pub const FILTER_KEYS: [&str; 13] = [
    "code",
    "type",
    "city_id",
    "neighborhood_id",
    "negotiation",
    "minimum_value",
    "maximum_value",
    "number_bedrooms",
    "number_bathrooms",
    "number_parking_spaces",
    "minimum_private_area",
    "maximum_private_area",
    "amenities",
];

/// Filter values committed to the URL (or edited in a draft)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilters {
    pub code: Option<String>,
    pub property_type: Option<PropertyType>,
    pub city_id: Option<String>,
    pub neighborhood_id: Option<String>,
    pub negotiation: Option<Negotiation>,
    pub minimum_value: Option<f64>,
    pub maximum_value: Option<f64>,
    pub number_bedrooms: Option<i64>,
    pub number_bathrooms: Option<i64>,
    pub number_parking_spaces: Option<i64>,
    pub minimum_private_area: Option<f64>,
    pub maximum_private_area: Option<f64>,
    pub amenities: Vec<Amenity>,
}

impl ListingFilters {
    /// Read every recognized key. Values outside a vocabulary are ignored so a
    /// hand-edited URL still renders a page.
    pub fn from_query(q: &QueryString) -> Self {
        Self {
            code: coerce::text(q.get("code")),
            property_type: q.get("type").and_then(|s| s.parse().ok()),
            city_id: coerce::id(q.get("city_id")),
            neighborhood_id: coerce::id(q.get("neighborhood_id")),
            negotiation: q.get("negotiation").and_then(|s| s.parse().ok()),
            minimum_value: coerce::float(q.get("minimum_value")),
            maximum_value: coerce::float(q.get("maximum_value")),
            number_bedrooms: coerce::int(q.get("number_bedrooms")),
            number_bathrooms: coerce::int(q.get("number_bathrooms")),
            number_parking_spaces: coerce::int(q.get("number_parking_spaces")),
            minimum_private_area: coerce::float(q.get("minimum_private_area")),
            maximum_private_area: coerce::float(q.get("maximum_private_area")),
            amenities: coerce::list(q.get("amenities"))
                .unwrap_or_default()
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect(),
        }
    }

    fn write_into(&self, q: &mut QueryString) {
        fn put<T: ToString>(q: &mut QueryString, key: &str, value: &Option<T>) {
            if let Some(value) = value {
                q.set(key, value.to_string());
            }
        }

        put(q, "code", &self.code);
        put(q, "type", &self.property_type);
        put(q, "city_id", &self.city_id);
        put(q, "neighborhood_id", &self.neighborhood_id);
        put(q, "negotiation", &self.negotiation);
        put(q, "minimum_value", &self.minimum_value);
        put(q, "maximum_value", &self.maximum_value);
        put(q, "number_bedrooms", &self.number_bedrooms);
        put(q, "number_bathrooms", &self.number_bathrooms);
        put(q, "number_parking_spaces", &self.number_parking_spaces);
        put(q, "minimum_private_area", &self.minimum_private_area);
        put(q, "maximum_private_area", &self.maximum_private_area);
        if !self.amenities.is_empty() {
            let joined: Vec<&str> = self.amenities.iter().map(Amenity::as_str).collect();
            q.set("amenities", joined.join(","));
        }
    }

    /// Number of active filters; each selected amenity counts on its own.
    pub fn active_count(&self) -> usize {
        let flags = [
            self.code.is_some(),
            self.property_type.is_some(),
            self.city_id.is_some(),
            self.neighborhood_id.is_some(),
            self.negotiation.is_some(),
            self.minimum_value.is_some(),
            self.maximum_value.is_some(),
            self.number_bedrooms.is_some(),
            self.number_bathrooms.is_some(),
            self.number_parking_spaces.is_some(),
            self.minimum_private_area.is_some(),
            self.maximum_private_area.is_some(),
        ];
        flags.iter().filter(|active| **active).count() + self.amenities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// A single edit made in the advanced filter form
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEdit {
    Code(String),
    Type(Option<PropertyType>),
    City(Option<String>),
    Neighborhood(Option<String>),
    Negotiation(Option<Negotiation>),
    MinimumValue(Option<f64>),
    MaximumValue(Option<f64>),
    Bedrooms(Option<i64>),
    Bathrooms(Option<i64>),
    ParkingSpaces(Option<i64>),
    MinimumPrivateArea(Option<f64>),
    MaximumPrivateArea(Option<f64>),
    ToggleAmenity(Amenity),
}

/// What the neighborhood selector must do after a city edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeighborhoodReload {
    Load(String),
    Clear,
}

/// Not-yet-applied state of the advanced filter form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterDraft {
    filters: ListingFilters,
}

impl FilterDraft {
    pub fn new(committed: &ListingFilters) -> Self {
        Self {
            filters: committed.clone(),
        }
    }

    pub fn filters(&self) -> &ListingFilters {
        &self.filters
    }

    /// Badge count shown on the filter button.
    pub fn active_count(&self) -> usize {
        self.filters.active_count()
    }

    /// Neighborhood load needed when the form opens on a committed city.
    pub fn initial_reload(&self) -> Option<NeighborhoodReload> {
        self.filters.city_id.clone().map(NeighborhoodReload::Load)
    }

    pub fn neighborhood_enabled(&self) -> bool {
        self.filters.city_id.is_some()
    }

    /// Apply one edit. Only a city edit that actually changes the city asks
    /// for a neighborhood reload; every city edit drops the neighborhood.
    pub fn edit(&mut self, edit: FilterEdit) -> Option<NeighborhoodReload> {
        let f = &mut self.filters;
        match edit {
            FilterEdit::Code(raw) => f.code = coerce::text(Some(&raw)),
            FilterEdit::Type(value) => f.property_type = value,
            FilterEdit::City(value) => {
                let value = value.filter(|id| !id.is_empty());
                let changed = value != f.city_id;
                f.neighborhood_id = None;
                f.city_id = value.clone();
                if !changed {
                    return None;
                }
                return Some(match value {
                    Some(id) => NeighborhoodReload::Load(id),
                    None => NeighborhoodReload::Clear,
                });
            }
            FilterEdit::Neighborhood(value) => {
                if f.city_id.is_some() {
                    f.neighborhood_id = value.filter(|id| !id.is_empty());
                }
            }
            FilterEdit::Negotiation(value) => f.negotiation = value,
            FilterEdit::MinimumValue(value) => f.minimum_value = value,
            FilterEdit::MaximumValue(value) => f.maximum_value = value,
            FilterEdit::Bedrooms(value) => f.number_bedrooms = value,
            FilterEdit::Bathrooms(value) => f.number_bathrooms = value,
            FilterEdit::ParkingSpaces(value) => f.number_parking_spaces = value,
            FilterEdit::MinimumPrivateArea(value) => f.minimum_private_area = value,
            FilterEdit::MaximumPrivateArea(value) => f.maximum_private_area = value,
            FilterEdit::ToggleAmenity(amenity) => {
                match f.amenities.iter().position(|a| *a == amenity) {
                    Some(index) => {
                        f.amenities.remove(index);
                    }
                    None => f.amenities.push(amenity),
                }
            }
        }
        None
    }

    pub fn reset(&mut self) {
        self.filters = ListingFilters::default();
    }
}

/// Commit `filters` to the URL: old filter keys and the page are dropped,
/// present values are written, unrelated keys are left alone.
pub fn apply(filters: &ListingFilters, current: &QueryString) -> QueryString {
    let mut next = clear(current);
    filters.write_into(&mut next);
    next
}

/// Remove every filter key and the page. The sort order survives.
pub fn clear(current: &QueryString) -> QueryString {
    let mut next = current.clone();
    next.delete(PAGE_KEY);
    for key in FILTER_KEYS {
        next.delete(key);
    }
    next
}

/// Change the sort order immediately, bypassing the draft.
pub fn set_order(current: &QueryString, order: Option<PropertyOrder>) -> QueryString {
    let mut next = current.clone();
    next.delete(PAGE_KEY);
    match order {
        Some(order) => next.set(ORDER_KEY, order.as_str()),
        None => next.delete(ORDER_KEY),
    }
    next
}

/// Move to `requested`, or `None` when it is outside `[1, total_pages]`.
pub fn change_page(current: &QueryString, requested: i64, total_pages: u32) -> Option<QueryString> {
    if requested < 1 || requested > i64::from(total_pages) {
        return None;
    }
    let mut next = current.clone();
    next.set(PAGE_KEY, requested.to_string());
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recognized_keys() {
        let q = QueryString::parse(
            "code=%20AB12%20&type=apartment&negotiation=lease&number_bedrooms=2x&minimum_value=abc&amenities=pool,sauna,,grill",
        );
        let filters = ListingFilters::from_query(&q);

        assert_eq!(filters.code.as_deref(), Some("AB12"));
        assert_eq!(filters.property_type, Some(PropertyType::Apartment));
        assert_eq!(filters.negotiation, Some(Negotiation::Lease));
        assert_eq!(filters.number_bedrooms, Some(2));
        assert_eq!(filters.minimum_value, None);
        assert_eq!(filters.amenities, vec![Amenity::Pool, Amenity::Grill]);
        assert_eq!(filters.active_count(), 6);
    }

    #[test]
    fn editing_a_draft_does_not_touch_committed_filters() {
        let committed = ListingFilters::default();
        let mut draft = FilterDraft::new(&committed);
        draft.edit(FilterEdit::Bedrooms(Some(3)));

        assert_eq!(draft.filters().number_bedrooms, Some(3));
        assert_eq!(committed.number_bedrooms, None);
    }

    #[test]
    fn changing_city_clears_neighborhood() {
        let mut draft = FilterDraft::default();
        assert!(!draft.neighborhood_enabled());

        // Neighborhood selector is disabled without a city
        draft.edit(FilterEdit::Neighborhood(Some("n-1".into())));
        assert_eq!(draft.filters().neighborhood_id, None);

        let reload = draft.edit(FilterEdit::City(Some("c-1".into())));
        assert_eq!(reload, Some(NeighborhoodReload::Load("c-1".into())));
        draft.edit(FilterEdit::Neighborhood(Some("n-1".into())));
        assert_eq!(draft.filters().neighborhood_id.as_deref(), Some("n-1"));

        let reload = draft.edit(FilterEdit::City(Some("c-2".into())));
        assert_eq!(reload, Some(NeighborhoodReload::Load("c-2".into())));
        assert_eq!(draft.filters().neighborhood_id, None);

        draft.edit(FilterEdit::Neighborhood(Some("n-9".into())));
        let reload = draft.edit(FilterEdit::City(Some("c-2".into())));
        assert_eq!(reload, None);
        assert_eq!(draft.filters().neighborhood_id, None);

        let reload = draft.edit(FilterEdit::City(None));
        assert_eq!(reload, Some(NeighborhoodReload::Clear));
        assert!(!draft.neighborhood_enabled());
    }

    #[test]
    fn committed_city_asks_for_initial_neighborhoods() {
        let url = QueryString::parse("city_id=c1&neighborhood_id=n1");
        let committed = ListingFilters::from_query(&url);
        let draft = FilterDraft::new(&committed);

        assert!(draft.neighborhood_enabled());
        assert_eq!(
            draft.initial_reload(),
            Some(NeighborhoodReload::Load("c1".into()))
        );
        assert_eq!(FilterDraft::default().initial_reload(), None);
    }

    #[test]
    fn amenities_toggle() {
        let mut draft = FilterDraft::default();
        draft.edit(FilterEdit::ToggleAmenity(Amenity::Pool));
        draft.edit(FilterEdit::ToggleAmenity(Amenity::Closet));
        draft.edit(FilterEdit::ToggleAmenity(Amenity::Pool));
        assert_eq!(draft.filters().amenities, vec![Amenity::Closet]);
        assert_eq!(draft.active_count(), 1);

        draft.edit(FilterEdit::Code("   ".into()));
        assert_eq!(draft.filters().code, None);
    }

    #[test]
    fn apply_writes_present_fields_and_resets_page() {
        let current = QueryString::parse("utm_source=ads&page=4&type=land&order=lowest_value");
        let mut draft = FilterDraft::new(&ListingFilters::from_query(&current));
        draft.edit(FilterEdit::Type(None));
        draft.edit(FilterEdit::Negotiation(Some(Negotiation::Sale)));
        draft.edit(FilterEdit::MaximumValue(Some(450000.0)));
        draft.edit(FilterEdit::ToggleAmenity(Amenity::Pool));
        draft.edit(FilterEdit::ToggleAmenity(Amenity::Grill));

        let next = apply(draft.filters(), &current);
        assert_eq!(
            next.to_string(),
            "utm_source=ads&order=lowest_value&negotiation=sale&maximum_value=450000&amenities=pool%2Cgrill"
        );
    }

    #[test]
    fn apply_then_clear_restores_unrelated_keys() {
        let before = QueryString::parse("utm_source=ads&ref=home");
        let filters = ListingFilters {
            code: Some("X1".into()),
            city_id: Some("c-1".into()),
            neighborhood_id: Some("n-1".into()),
            number_parking_spaces: Some(2),
            amenities: vec![Amenity::Elevator],
            ..Default::default()
        };

        let applied = apply(&filters, &before);
        assert_eq!(ListingFilters::from_query(&applied), filters);

        let paged = change_page(&applied, 2, 5).unwrap();
        assert_eq!(clear(&paged), before);
    }

    #[test]
    fn order_bypasses_draft_and_resets_page() {
        let current = QueryString::parse("page=3&type=house");
        let next = set_order(&current, Some(PropertyOrder::GreaterValue));
        assert_eq!(next.to_string(), "type=house&order=greater_value");
        assert_eq!(set_order(&next, None).to_string(), "type=house");
    }

    #[test]
    fn page_changes_are_clamped() {
        let current = QueryString::parse("page=2&type=house");
        assert_eq!(change_page(&current, 0, 3), None);
        assert_eq!(change_page(&current, 4, 3), None);
        assert_eq!(change_page(&current, 1, 0), None);
        assert_eq!(
            change_page(&current, 3, 3).unwrap().to_string(),
            "page=3&type=house"
        );
    }
}
