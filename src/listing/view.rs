//! Display helpers for listing cards, filter chips, pagination and contact
//! links. Text is pt-BR.

use url::Url;

use crate::api::QueryString;
use crate::config::Settings;
use crate::domain::query::coerce;
use crate::domain::{
    City, Negotiation, Neighborhood, Property, PropertyDetail, PropertyImage, PropertyType, State,
};

const NBSP: char = '\u{a0}';
const NO_LOCATION: &str = "Localização não informada";

/// Whole-real currency, e.g. `R$ 1.250.000` with a no-break space.
pub fn format_brl(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}R${NBSP}{}", group_thousands(rounded.abs() as u64))
}

/// Price shown on cards; zero and absent values are hidden.
pub fn format_price(value: Option<f64>) -> Option<String> {
    value
        .filter(|v| v.is_finite() && *v != 0.0)
        .map(format_brl)
}

/// Plain pt-BR number with up to three fraction digits (`1.500,5`).
pub fn format_decimal(value: f64) -> String {
    let scaled = (value.abs() * 1000.0).round() as u64;
    let (int, frac) = (scaled / 1000, scaled % 1000);
    let sign = if value < 0.0 && scaled != 0 { "-" } else { "" };

    let mut out = format!("{sign}{}", group_thousands(int));
    if frac != 0 {
        let digits = format!("{frac:03}");
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

fn join_location(parts: Vec<&str>) -> String {
    let parts: Vec<&str> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        NO_LOCATION.to_string()
    } else {
        parts.join(", ")
    }
}

/// `Neighborhood, City, UF` for result cards.
pub fn location_line(
    neighborhood: Option<&Neighborhood>,
    city: Option<&City>,
    state: Option<&State>,
) -> String {
    join_location(
        [
            neighborhood.map(|n| n.name.as_str()),
            city.map(|c| c.name.as_str()),
            state.map(|s| s.uf.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect(),
    )
}

/// Street-level address for the detail page.
pub fn address_line(detail: &PropertyDetail) -> String {
    join_location(
        [
            detail.street.as_deref(),
            detail.address_number.as_deref(),
            detail.neighborhood.as_ref().map(|n| n.name.as_str()),
            detail.city.as_ref().map(|c| c.name.as_str()),
            detail.state.as_ref().map(|s| s.uf.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect(),
    )
}

pub fn negotiation_label(negotiations: &[Negotiation]) -> &'static str {
    let sale = negotiations.contains(&Negotiation::Sale);
    let lease = negotiations.contains(&Negotiation::Lease);
    match (sale, lease) {
        (true, true) => "Venda e Locação",
        (true, false) => "Venda",
        (false, true) => "Locação",
        (false, false) => "",
    }
}

/// Images in display order.
pub fn sorted_images(images: &[PropertyImage]) -> Vec<&PropertyImage> {
    let mut sorted: Vec<&PropertyImage> = images.iter().collect();
    sorted.sort_by_key(|image| image.order);
    sorted
}

/// Everything a result card renders.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCard {
    pub href: String,
    pub title: String,
    pub code: String,
    pub location: String,
    pub negotiation: &'static str,
    pub sale_price: Option<String>,
    pub lease_price: Option<String>,
    pub image_urls: Vec<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub parking_spaces: Option<i32>,
    pub private_area: Option<String>,
}

impl From<&Property> for PropertyCard {
    fn from(p: &Property) -> Self {
        Self {
            href: format!("/properties/{}", p.id),
            title: p.title.clone(),
            code: p.code.clone(),
            location: location_line(p.neighborhood.as_ref(), p.city.as_ref(), p.state.as_ref()),
            negotiation: negotiation_label(&p.negotiations),
            sale_price: format_price(p.sale_value),
            lease_price: format_price(p.lease_value),
            image_urls: sorted_images(&p.images)
                .into_iter()
                .map(|image| image.url.clone())
                .collect(),
            bedrooms: p.number_bedrooms,
            bathrooms: p.number_bathrooms,
            parking_spaces: p.number_parking_spaces,
            private_area: p.private_area.map(|a| format!("{}m²", format_decimal(a))),
        }
    }
}

fn money_from_url(raw: &str) -> String {
    match coerce::float(Some(raw)) {
        Some(value) => format!("R$ {}", format_decimal(value)),
        None => format!("R$ {raw}"),
    }
}

fn range_chip(
    label: &str,
    min: Option<&str>,
    max: Option<&str>,
    render: impl Fn(&str) -> String,
    suffix: &str,
) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!(
            "{label}: {}{suffix} - {}{suffix}",
            render(min),
            render(max)
        )),
        (Some(min), None) => Some(format!("{label}: {}{suffix}+", render(min))),
        (None, Some(max)) => Some(format!("{label}: até {}{suffix}", render(max))),
        (None, None) => None,
    }
}

/// Chips describing the filters applied in the URL, in a fixed order.
pub fn active_filter_chips(q: &QueryString) -> Vec<String> {
    let present = |key: &str| q.get(key).filter(|v| !v.is_empty());
    let mut chips = Vec::new();

    if let Some(code) = present("code") {
        chips.push(format!("Código: {code}"));
    }
    if let Some(raw) = present("type") {
        let label = raw.parse::<PropertyType>().map(|t| t.label()).unwrap_or(raw);
        chips.push(format!("Tipo: {label}"));
    }
    if let Some(raw) = present("negotiation") {
        let label = raw.parse::<Negotiation>().map(|n| n.label()).unwrap_or(raw);
        chips.push(format!("Negociação: {label}"));
    }
    for (key, noun) in [
        ("number_bedrooms", "Quartos"),
        ("number_bathrooms", "Banheiros"),
        ("number_parking_spaces", "Vagas"),
    ] {
        if let Some(n) = present(key) {
            chips.push(format!("{n}+ {noun}"));
        }
    }
    chips.extend(range_chip(
        "Área",
        present("minimum_private_area"),
        present("maximum_private_area"),
        str::to_string,
        "m²",
    ));
    chips.extend(range_chip(
        "Preço",
        present("minimum_value"),
        present("maximum_value"),
        money_from_url,
        "",
    ));
    chips
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    Gap,
}

/// First page, last page and the neighbours of `current`, with a gap marker
/// wherever pages are skipped. Empty when there is nothing to paginate.
pub fn page_window(current: u32, total: u32) -> Vec<PageSlot> {
    if total <= 1 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut previous = 0;
    for page in 1..=total {
        let visible = page == 1 || page == total || page.abs_diff(current) <= 1;
        if !visible {
            continue;
        }
        if previous != 0 && page - previous > 1 {
            slots.push(PageSlot::Gap);
        }
        slots.push(PageSlot::Page(page));
        previous = page;
    }
    slots
}

/// `https://wa.me/<phone>`, with the message as `text` when given.
pub fn whatsapp_link(phone: &str, message: Option<&str>) -> Result<Url, url::ParseError> {
    let mut url = Url::parse("https://wa.me/")?.join(phone)?;
    if let Some(message) = message {
        url.query_pairs_mut().append_pair("text", message);
    }
    Ok(url)
}

/// Canonical public URL of a listing.
pub fn property_url(site_url: &str, id: &str) -> String {
    format!("{}/properties/{}", site_url.trim_end_matches('/'), id)
}

pub fn interest_message(detail: &PropertyDetail, page_url: &str) -> String {
    format!(
        "Olá! Tenho interesse no imóvel {} - {}.\n\n{}",
        detail.code, detail.title, page_url
    )
}

/// WhatsApp deep link asking about `detail`, pointing back at its page.
pub fn interest_link(settings: &Settings, detail: &PropertyDetail) -> Result<Url, url::ParseError> {
    let page_url = property_url(&settings.site_url, &detail.id);
    whatsapp_link(
        &settings.whatsapp_number,
        Some(&interest_message(detail, &page_url)),
    )
}
