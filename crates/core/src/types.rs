use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level routes that are always part of the sitemap
pub const STATIC_PATHS: &[&str] = &["/", "/tim-kiem", "/bai-viet", "/lien-he", "/gioi-thieu"];

/// Crawler hint for how often a URL changes (sitemap protocol values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(ChangeFrequency::Always),
            "hourly" => Ok(ChangeFrequency::Hourly),
            "daily" => Ok(ChangeFrequency::Daily),
            "weekly" => Ok(ChangeFrequency::Weekly),
            "monthly" => Ok(ChangeFrequency::Monthly),
            "yearly" => Ok(ChangeFrequency::Yearly),
            "never" => Ok(ChangeFrequency::Never),
            other => Err(format!(
                "unknown change frequency '{}', expected one of always, hourly, daily, weekly, monthly, yearly, never",
                other
            )),
        }
    }
}

/// Sitemap priority, always within `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Priority(f64);

impl Priority {
    pub const MIN: Priority = Priority(0.0);
    pub const MAX: Priority = Priority(1.0);

    /// Returns `None` when the value is NaN or outside `[0, 1]`
    pub fn new(value: f64) -> Option<Self> {
        if (0.0..=1.0).contains(&value) {
            Some(Priority(value))
        } else {
            None
        }
    }

    /// For literals known to be in range
    pub const fn from_const(value: f64) -> Self {
        assert!(value >= 0.0 && value <= 1.0, "priority out of range");
        Priority(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Priority {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Priority::new(value).ok_or_else(|| format!("priority {} is outside [0, 1]", value))
    }
}

impl From<Priority> for f64 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One URL of the generated sitemap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    /// Site-relative path, e.g. `/villa/sunset-bay`
    pub loc: String,
    pub changefreq: ChangeFrequency,
    pub priority: Priority,
    pub lastmod: DateTime<Utc>,
}

impl SitemapEntry {
    /// `lastmod` as ISO-8601 with millisecond precision, e.g. `2026-10-19T08:00:00.000Z`
    pub fn lastmod_iso(&self) -> String {
        self.lastmod.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// The slice of a backend villa or post that the sitemap needs.
/// Every other field of the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub slug: String,
}

impl Resource {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }

    /// The slug as a single percent-encoded path segment.
    ///
    /// Surrounding whitespace is trimmed. Returns `None` for slugs that are
    /// blank, `.` or `..`, or contain `/`, `?` or `#`, since those would
    /// change the structure of the URL.
    pub fn path_segment(&self) -> Option<String> {
        let slug = self.slug.trim();
        if slug.is_empty() || slug == "." || slug == ".." {
            return None;
        }
        if slug.contains(['/', '?', '#']) {
            return None;
        }
        Some(urlencoding::encode(slug).into_owned())
    }
}

/// Remote collections whose items get their own sitemap URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Villas,
    Posts,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Villas, Collection::Posts];

    /// Endpoint relative to the API base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Collection::Villas => "villas",
            Collection::Posts => "posts/visible",
        }
    }

    /// Key holding the item array in the response body
    pub fn payload_key(&self) -> &'static str {
        match self {
            Collection::Villas => "villas",
            Collection::Posts => "posts",
        }
    }

    pub fn route_prefix(&self) -> &'static str {
        match self {
            Collection::Villas => "/villa/",
            Collection::Posts => "/bai-viet/",
        }
    }

    /// Site path for `resource`, or `None` when its slug is unusable
    pub fn path_for(&self, resource: &Resource) -> Option<String> {
        resource
            .path_segment()
            .map(|segment| format!("{}{}", self.route_prefix(), segment))
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload_key())
    }
}
