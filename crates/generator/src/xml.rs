//! Sitemap XML rendering.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/villa/sunset-bay</loc>
//!     <lastmod>2026-10-19T08:00:00.000Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.9</priority>
//!   </url>
//! </urlset>
//! ```

use sitemap_kit_core::SitemapEntry;

/// XML namespace for sitemap
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Render one `<urlset>` document. `loc` values are prefixed with `site_url`.
pub fn render_urlset(site_url: &str, entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 200);

    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&absolute_url(site_url, &entry.loc))
        ));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod_iso()));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Render a `<sitemapindex>` listing each file name under `site_url`
pub fn render_index(site_url: &str, files: &[String]) -> String {
    let mut xml = String::with_capacity(256 + files.len() * 100);

    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(&format!(r#"<sitemapindex xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for file in files {
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&absolute_url(site_url, &format!("/{}", file)))
        ));
        xml.push_str("  </sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    xml
}

pub(crate) fn absolute_url(site_url: &str, path: &str) -> String {
    format!("{}{}", site_url.trim_end_matches('/'), path)
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
