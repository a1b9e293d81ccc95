use axum::{extract::State, http::header, response::IntoResponse};
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

use crate::app::AppState;

struct SitemapEntry {
    path: &'static str,
    change_frequency: &'static str,
    priority: f32,
}

const ENTRIES: [SitemapEntry; 2] = [
    SitemapEntry {
        path: "",
        change_frequency: "daily",
        priority: 1.0,
    },
    SitemapEntry {
        path: "/properties",
        change_frequency: "daily",
        priority: 0.9,
    },
];

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(site_url: &str, now: DateTime<Utc>) -> String {
    let lastmod = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in &ENTRIES {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(site_url), entry.path, lastmod, entry.change_frequency, entry.priority
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render(&state.settings.site_url, Utc::now()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn lists_home_and_catalog() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let xml = render("https://example.com.br", now);

        assert!(xml.contains("<loc>https://example.com.br</loc>"));
        assert!(xml.contains("<loc>https://example.com.br/properties</loc>"));
        assert!(xml.contains("<lastmod>2024-05-01T12:00:00Z</lastmod>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn site_url_is_escaped() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let xml = render("https://example.com.br/?a=1&b=<2>", now);

        assert!(xml.contains("<loc>https://example.com.br/?a=1&amp;b=&lt;2&gt;/properties</loc>"));
        assert!(!xml.contains("a=1&b"));
    }
}
