//! Sitemap protocol XML with `xhtml:link` language alternates.

use crate::i18n::Locale;
use crate::sitemap::build::SitemapEntry;
use chrono::SecondsFormat;
use std::fmt::Write;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Render entries as a `<urlset>` document.
///
/// Each URL lists its alternates plus an `x-default` link to the default
/// locale's variant when that locale is among the alternates.
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let default_code = Locale::default_locale().code();
    let mut xml = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        xml,
        r#"<urlset xmlns="{}" xmlns:xhtml="{}">"#,
        SITEMAP_NS, XHTML_NS
    );

    for entry in entries {
        let _ = writeln!(xml, "  <url>");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.url));

        for (code, href) in &entry.alternates.languages {
            let _ = writeln!(
                xml,
                r#"    <xhtml:link rel="alternate" hreflang="{}" href="{}"/>"#,
                escape_xml(code),
                escape_xml(href)
            );
        }
        if let Some(href) = entry.alternates.languages.get(default_code) {
            let _ = writeln!(
                xml,
                r#"    <xhtml:link rel="alternate" hreflang="x-default" href="{}"/>"#,
                escape_xml(href)
            );
        }

        let _ = writeln!(
            xml,
            "    <lastmod>{}</lastmod>",
            entry
                .last_modified
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let _ = writeln!(
            xml,
            "    <changefreq>{}</changefreq>",
            entry.change_frequency.as_str()
        );
        let _ = writeln!(xml, "    <priority>{:.1}</priority>", entry.priority);
        let _ = writeln!(xml, "  </url>");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::supported_locales;
    use crate::sitemap::build::build_sitemap;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"a&b<c>"d"'e'"#),
            "a&amp;b&lt;c&gt;&quot;d&quot;&apos;e&apos;"
        );
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_render_document() {
        let timestamp = Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap();
        let entries = build_sitemap(
            ["/", "/strategies"],
            &supported_locales(),
            "https://site.example",
            timestamp,
        );
        let xml = render_sitemap_xml(&entries);

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.trim_end().ends_with("</urlset>"));
        assert_eq!(xml.matches("<url>").count(), entries.len());
        assert!(xml.contains("<loc>https://site.example/de/strategies</loc>"));
        assert!(xml.contains(
            r#"<xhtml:link rel="alternate" hreflang="pt-BR" href="https://site.example/pt-BR"/>"#
        ));
        assert!(xml.contains(
            r#"<xhtml:link rel="alternate" hreflang="x-default" href="https://site.example/strategies"/>"#
        ));
        assert!(xml.contains("<lastmod>2026-03-01T08:30:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
    }

    #[test]
    fn test_render_escapes_urls() {
        let timestamp = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let entries = build_sitemap(
            ["/search?a=1&b=2"],
            &supported_locales()[..1],
            "https://site.example",
            timestamp,
        );
        let xml = render_sitemap_xml(&entries);

        assert!(xml.contains("<loc>https://site.example/search?a=1&amp;b=2</loc>"));
        assert!(!xml.contains("a=1&b=2"));
    }

    #[test]
    fn test_render_empty() {
        let xml = render_sitemap_xml(&[]);
        assert!(xml.contains("<urlset"));
        assert!(!xml.contains("<url>"));
    }
}
