use crate::xml::absolute_url;
use sitemap_kit_core::RobotsConfig;

/// Render robots.txt allowing everything except `robots.disallow`
pub fn render_robots(site_url: &str, robots: &RobotsConfig) -> String {
    let mut out = String::from("# *\nUser-agent: *\nAllow: /\n");

    for path in &robots.disallow {
        out.push_str(&format!("Disallow: {}\n", path));
    }

    out.push_str(&format!("\n# Host\nHost: {}\n", site_url.trim_end_matches('/')));
    out.push_str(&format!(
        "\n# Sitemaps\nSitemap: {}\n",
        absolute_url(site_url, "/sitemap.xml")
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_default_policy() {
        let txt = render_robots("https://villa.example.com", &RobotsConfig::default());
        assert!(txt.contains("User-agent: *\nAllow: /\n"));
        assert!(txt.contains("Disallow: /api/\n"));
        assert!(txt.contains("Disallow: /admin/\n"));
        assert!(txt.contains("Host: https://villa.example.com\n"));
        assert!(txt.ends_with("Sitemap: https://villa.example.com/sitemap.xml\n"));
    }

    #[test]
    fn test_robots_without_disallow() {
        let robots = RobotsConfig { disallow: vec![] };
        let txt = render_robots("https://villa.example.com/", &robots);
        assert!(!txt.contains("Disallow"));
        assert!(txt.contains("Sitemap: https://villa.example.com/sitemap.xml"));
    }
}
