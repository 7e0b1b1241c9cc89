//! Path → sitemap entry mapping.

use chrono::{DateTime, Utc};
use sitemap_kit_core::{ChangeFrequency, Priority, SitemapConfig, SitemapEntry};

/// Prefix rules checked after the static maps; first match wins
const ROUTE_OVERRIDES: &[(&str, ChangeFrequency, Priority)] = &[
    ("/villa/", ChangeFrequency::Weekly, Priority::from_const(0.9)),
    ("/bai-viet/", ChangeFrequency::Weekly, Priority::from_const(0.8)),
];

/// Build the sitemap entry for `path`, stamped with the current time.
pub fn transform(config: &SitemapConfig, path: &str) -> SitemapEntry {
    transform_at(config, path, Utc::now())
}

/// Build the sitemap entry for `path` with an explicit `lastmod`.
///
/// Lookup order:
/// 1. `config.priorities` / `config.frequencies`, falling back to the configured defaults
/// 2. route prefix overrides (`/villa/`, `/bai-viet/`), which beat everything above
pub fn transform_at(config: &SitemapConfig, path: &str, now: DateTime<Utc>) -> SitemapEntry {
    let mut priority = config
        .priorities
        .get(path)
        .copied()
        .unwrap_or(config.default_priority);
    let mut changefreq = config
        .frequencies
        .get(path)
        .copied()
        .unwrap_or(config.default_changefreq);

    if let Some((_, freq, prio)) = ROUTE_OVERRIDES
        .iter()
        .find(|(prefix, _, _)| path.starts_with(prefix))
    {
        changefreq = *freq;
        priority = *prio;
    }

    SitemapEntry {
        loc: path.to_string(),
        changefreq,
        priority,
        lastmod: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SitemapConfig {
        SitemapConfig::default()
    }

    #[test]
    fn test_unmapped_path_uses_defaults() {
        let config = config();
        for path in ["/khuyen-mai", "/villa", "/bai-vietx", "", "no-slash", "/tim-kiem/extra"] {
            let entry = transform(&config, path);
            assert_eq!(entry.priority, config.default_priority, "{}", path);
            assert_eq!(entry.changefreq, config.default_changefreq, "{}", path);
            assert_eq!(entry.loc, path);
        }
    }

    #[test]
    fn test_unmapped_path_follows_custom_defaults() {
        let config = SitemapConfig {
            default_changefreq: ChangeFrequency::Yearly,
            default_priority: Priority::from_const(0.3),
            ..SitemapConfig::default()
        };
        let entry = transform(&config, "/chinh-sach");
        assert_eq!(entry.changefreq, ChangeFrequency::Yearly);
        assert_eq!(entry.priority.value(), 0.3);
    }

    #[test]
    fn test_static_maps() {
        let config = config();
        let home = transform(&config, "/");
        assert_eq!(home.priority.value(), 1.0);
        assert_eq!(home.changefreq, ChangeFrequency::Daily);

        let contact = transform(&config, "/lien-he");
        assert_eq!(contact.priority.value(), 0.5);
        assert_eq!(contact.changefreq, ChangeFrequency::Monthly);
    }

    #[test]
    fn test_villa_prefix_override() {
        let config = config();
        for path in ["/villa/", "/villa/sunset-bay", "/villa/a/b"] {
            let entry = transform(&config, path);
            assert_eq!(entry.priority.value(), 0.9, "{}", path);
            assert_eq!(entry.changefreq, ChangeFrequency::Weekly, "{}", path);
        }
    }

    #[test]
    fn test_post_prefix_override() {
        let entry = transform(&config(), "/bai-viet/top-10-villa-da-lat");
        assert_eq!(entry.priority.value(), 0.8);
        assert_eq!(entry.changefreq, ChangeFrequency::Weekly);
    }

    #[test]
    fn test_prefix_override_beats_static_maps() {
        let mut config = config();
        config
            .priorities
            .insert("/villa/special".to_string(), Priority::from_const(0.1));
        config
            .frequencies
            .insert("/villa/special".to_string(), ChangeFrequency::Never);
        config
            .priorities
            .insert("/bai-viet/pinned".to_string(), Priority::MAX);

        let villa = transform(&config, "/villa/special");
        assert_eq!(villa.priority.value(), 0.9);
        assert_eq!(villa.changefreq, ChangeFrequency::Weekly);

        let post = transform(&config, "/bai-viet/pinned");
        assert_eq!(post.priority.value(), 0.8);
    }

    #[test]
    fn test_lastmod_is_now() {
        let before = Utc::now();
        let entry = transform(&config(), "/");
        let after = Utc::now();
        assert!(entry.lastmod >= before && entry.lastmod <= after);
    }

    #[test]
    fn test_transform_at_uses_given_time() {
        let now = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let entry = transform_at(&config(), "/", now);
        assert_eq!(entry.lastmod, now);
    }
}
