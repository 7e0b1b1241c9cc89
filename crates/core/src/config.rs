use crate::error::{Error, Result};
use crate::types::{ChangeFrequency, Priority};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_PAGE_SIZE: usize = 1000;
pub const DEFAULT_SITEMAP_SIZE: usize = 7000;
/// Upper bound the sitemap protocol allows per file
pub const MAX_SITEMAP_SIZE: usize = 50_000;
pub const DEFAULT_CHANGEFREQ: ChangeFrequency = ChangeFrequency::Daily;
pub const DEFAULT_PRIORITY: Priority = Priority::from_const(0.7);

pub const DEFAULT_EXCLUDES: &[&str] = &[
    "/api/*",
    "/admin/*",
    "/checkout",
    "/checkout/*",
    "/login",
    "/register",
    "/dashboard/*",
    "/booking-success",
];

pub const DEFAULT_DISALLOW: &[&str] = &["/api/", "/admin/", "/checkout", "/login"];

/// Built-in priorities for the static routes
pub const STATIC_PRIORITIES: &[(&str, Priority)] = &[
    ("/", Priority::from_const(1.0)),
    ("/tim-kiem", Priority::from_const(0.9)),
    ("/bai-viet", Priority::from_const(0.8)),
    ("/lien-he", Priority::from_const(0.5)),
    ("/gioi-thieu", Priority::from_const(0.6)),
];

/// Built-in change frequencies for the static routes
pub const STATIC_FREQUENCIES: &[(&str, ChangeFrequency)] = &[
    ("/", ChangeFrequency::Daily),
    ("/tim-kiem", ChangeFrequency::Daily),
    ("/bai-viet", ChangeFrequency::Daily),
    ("/lien-he", ChangeFrequency::Monthly),
    ("/gioi-thieu", ChangeFrequency::Monthly),
];

/// Everything loaded from site.toml
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Public origin without trailing slash, e.g. `https://example.com`
    pub site_url: String,
    pub api: ApiConfig,
    pub sitemap: SitemapConfig,
    pub robots: RobotsConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend origin without trailing slash
    pub base_url: String,
    pub page_size: usize,
}

/// Immutable record driving path transformation and sitemap output
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapConfig {
    pub default_changefreq: ChangeFrequency,
    pub default_priority: Priority,
    pub priorities: BTreeMap<String, Priority>,
    pub frequencies: BTreeMap<String, ChangeFrequency>,
    pub exclude: Vec<String>,
    pub sitemap_size: usize,
    pub generate_robots_txt: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            default_changefreq: DEFAULT_CHANGEFREQ,
            default_priority: DEFAULT_PRIORITY,
            priorities: STATIC_PRIORITIES
                .iter()
                .map(|(path, p)| (path.to_string(), *p))
                .collect(),
            frequencies: STATIC_FREQUENCIES
                .iter()
                .map(|(path, f)| (path.to_string(), *f))
                .collect(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            sitemap_size: DEFAULT_SITEMAP_SIZE,
            generate_robots_txt: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RobotsConfig {
    pub disallow: Vec<String>,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            disallow: DEFAULT_DISALLOW.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    site: RawSite,
    api: RawApi,
    #[serde(default)]
    sitemap: Option<RawSitemap>,
    #[serde(default)]
    robots: Option<RawRobots>,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    url: String,
}

#[derive(Debug, Deserialize)]
struct RawApi {
    base_url: String,
    page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawSitemap {
    changefreq: Option<ChangeFrequency>,
    priority: Option<Priority>,
    sitemap_size: Option<usize>,
    generate_robots_txt: Option<bool>,
    exclude: Option<Vec<String>>,
    #[serde(default)]
    priorities: BTreeMap<String, Priority>,
    #[serde(default)]
    frequencies: BTreeMap<String, ChangeFrequency>,
}

#[derive(Debug, Deserialize)]
struct RawRobots {
    disallow: Vec<String>,
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let site_url = validate_origin(&raw.site.url, "site.url")?;
    let base_url = validate_origin(&raw.api.base_url, "api.base_url")?;

    let page_size = raw.api.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err(Error::ConfigParse(
            "api.page_size must be greater than 0".to_string(),
        ));
    }

    let sitemap = match raw.sitemap {
        Some(raw_sitemap) => convert_sitemap(raw_sitemap)?,
        None => SitemapConfig::default(),
    };

    let robots = match raw.robots {
        Some(raw_robots) => {
            for path in &raw_robots.disallow {
                validate_route(path, "robots.disallow")?;
            }
            RobotsConfig {
                disallow: raw_robots.disallow,
            }
        }
        None => RobotsConfig::default(),
    };

    Ok(SiteConfig {
        site_url,
        api: ApiConfig {
            base_url,
            page_size,
        },
        sitemap,
        robots,
    })
}

/// Merge the `[sitemap]` table over the built-in defaults
fn convert_sitemap(raw: RawSitemap) -> Result<SitemapConfig> {
    let mut sitemap = SitemapConfig::default();

    if let Some(changefreq) = raw.changefreq {
        sitemap.default_changefreq = changefreq;
    }
    if let Some(priority) = raw.priority {
        sitemap.default_priority = priority;
    }
    if let Some(generate) = raw.generate_robots_txt {
        sitemap.generate_robots_txt = generate;
    }

    if let Some(size) = raw.sitemap_size {
        if size == 0 || size > MAX_SITEMAP_SIZE {
            return Err(Error::ConfigParse(format!(
                "sitemap.sitemap_size must be between 1 and {}, got {}",
                MAX_SITEMAP_SIZE, size
            )));
        }
        sitemap.sitemap_size = size;
    }

    if let Some(exclude) = raw.exclude {
        for pattern in &exclude {
            validate_route(pattern, "sitemap.exclude")?;
        }
        sitemap.exclude = exclude;
    }

    for (path, priority) in raw.priorities {
        validate_route(&path, "sitemap.priorities")?;
        sitemap.priorities.insert(path, priority);
    }
    for (path, frequency) in raw.frequencies {
        validate_route(&path, "sitemap.frequencies")?;
        sitemap.frequencies.insert(path, frequency);
    }

    Ok(sitemap)
}

/// Validate an http(s) origin and strip any trailing slash.
///
/// ```text
/// validate_origin("https://example.com/", "site.url")  → Ok("https://example.com")
/// validate_origin("example.com", "site.url")           → Err("... must start with http:// or https://")
/// ```
fn validate_origin(url: &str, field_name: &str) -> Result<String> {
    let trimmed = url.trim();

    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| {
            Error::ConfigParse(format!(
                "'{}' must start with http:// or https://: '{}'",
                field_name, url
            ))
        })?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(Error::ConfigParse(format!(
            "'{}' has no valid host: '{}'",
            field_name, url
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Routes and route patterns are site-relative and must begin with `/`
fn validate_route(route: &str, field_name: &str) -> Result<()> {
    if !route.starts_with('/') {
        return Err(Error::ConfigParse(format!(
            "Entries in '{}' must start with '/': '{}'",
            field_name, route
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[site]
url = "https://villa.example.com"

[api]
base_url = "https://api.villa.example.com"
"#;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_site_toml_str(MINIMAL).unwrap();
        assert_eq!(config.site_url, "https://villa.example.com");
        assert_eq!(config.api.base_url, "https://api.villa.example.com");
        assert_eq!(config.api.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.sitemap, SitemapConfig::default());
        assert_eq!(config.robots, RobotsConfig::default());
    }

    #[test]
    fn test_default_maps_cover_static_paths() {
        let sitemap = SitemapConfig::default();
        for path in crate::types::STATIC_PATHS {
            assert!(sitemap.priorities.contains_key(*path), "{}", path);
            assert!(sitemap.frequencies.contains_key(*path), "{}", path);
        }
        assert_eq!(sitemap.sitemap_size, 7000);
        assert_eq!(sitemap.default_changefreq, ChangeFrequency::Daily);
        assert_eq!(sitemap.default_priority.value(), 0.7);
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let toml = r#"
[site]
url = "https://villa.example.com/"

[api]
base_url = "http://localhost:4000/"
page_size = 50
"#;
        let config = parse_site_toml_str(toml).unwrap();
        assert_eq!(config.site_url, "https://villa.example.com");
        assert_eq!(config.api.base_url, "http://localhost:4000");
        assert_eq!(config.api.page_size, 50);
    }

    #[test]
    fn test_sitemap_table_overrides_defaults() {
        let toml = r#"
[site]
url = "https://villa.example.com"

[api]
base_url = "https://api.villa.example.com"

[sitemap]
changefreq = "weekly"
priority = 0.4
sitemap_size = 100
generate_robots_txt = false
exclude = ["/private/*"]

[sitemap.priorities]
"/lien-he" = 0.2
"/khuyen-mai" = 0.85

[sitemap.frequencies]
"/khuyen-mai" = "hourly"

[robots]
disallow = ["/private/"]
"#;
        let config = parse_site_toml_str(toml).unwrap();
        let sitemap = &config.sitemap;
        assert_eq!(sitemap.default_changefreq, ChangeFrequency::Weekly);
        assert_eq!(sitemap.default_priority.value(), 0.4);
        assert_eq!(sitemap.sitemap_size, 100);
        assert!(!sitemap.generate_robots_txt);
        assert_eq!(sitemap.exclude, vec!["/private/*".to_string()]);
        assert_eq!(sitemap.priorities["/lien-he"].value(), 0.2);
        assert_eq!(sitemap.priorities["/khuyen-mai"].value(), 0.85);
        // untouched built-ins survive the merge
        assert_eq!(sitemap.priorities["/"].value(), 1.0);
        assert_eq!(sitemap.frequencies["/khuyen-mai"], ChangeFrequency::Hourly);
        assert_eq!(config.robots.disallow, vec!["/private/".to_string()]);
    }

    #[test]
    fn test_rejects_out_of_range_priority() {
        let toml = format!("{}\n[sitemap]\npriority = 1.5\n", MINIMAL);
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn test_rejects_unknown_frequency() {
        let toml = format!("{}\n[sitemap.frequencies]\n\"/\" = \"sometimes\"\n", MINIMAL);
        assert!(parse_site_toml_str(&toml).is_err());
    }

    #[test]
    fn test_rejects_relative_exclude() {
        let toml = format!("{}\n[sitemap]\nexclude = [\"admin/*\"]\n", MINIMAL);
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("sitemap.exclude"));
    }

    #[test]
    fn test_rejects_bad_sitemap_size() {
        let toml = format!("{}\n[sitemap]\nsitemap_size = 0\n", MINIMAL);
        assert!(parse_site_toml_str(&toml).is_err());

        let toml = format!("{}\n[sitemap]\nsitemap_size = 60000\n", MINIMAL);
        assert!(parse_site_toml_str(&toml).is_err());
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let toml = r#"
[site]
url = "https://villa.example.com"

[api]
base_url = "https://api.villa.example.com"
page_size = 0
"#;
        let err = parse_site_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("api.page_size"));
    }

    #[test]
    fn test_validate_origin() {
        assert_eq!(
            validate_origin("https://example.com", "site.url").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            validate_origin("  http://example.com//", "site.url").unwrap(),
            "http://example.com"
        );

        let err = validate_origin("example.com", "site.url").unwrap_err();
        assert!(err.to_string().contains("site.url"));
        assert!(validate_origin("https://", "site.url").is_err());
        assert!(validate_origin("ftp://example.com", "site.url").is_err());
    }

    #[test]
    fn test_missing_api_table() {
        let toml = r#"
[site]
url = "https://villa.example.com"
"#;
        let err = parse_site_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("Configuration parse error"));
    }
}
