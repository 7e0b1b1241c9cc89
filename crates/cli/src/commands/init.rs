use anyhow::{Context, Result};
use sitemap_kit_core::config::{
    DEFAULT_CHANGEFREQ, DEFAULT_DISALLOW, DEFAULT_EXCLUDES, DEFAULT_PAGE_SIZE, DEFAULT_PRIORITY,
    DEFAULT_SITEMAP_SIZE, STATIC_FREQUENCIES, STATIC_PRIORITIES,
};
use std::fs;
use std::path::PathBuf;

use super::SITE_TOML;

const PLACEHOLDER_SITE_URL: &str = "https://example.com";
const PLACEHOLDER_API_URL: &str = "https://api.example.com";

/// Escape a string for safe inclusion in TOML per TOML v1.0.0 spec
///
/// Handles the required escape sequences for TOML basic strings:
/// - Backslash (\\) -> \\\\
/// - Quote (\") -> \\\"
/// - Backspace (\b) -> \\b
/// - Form feed (\f) -> \\f
/// - Newline (\n) -> \\n
/// - Carriage return (\r) -> \\r
/// - Tab (\t) -> \\t
/// - Any other control character -> \\uXXXX
///
/// The template is written by hand so its comments survive; the toml crate's
/// serializer would drop them.
fn toml_escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Format a list of strings as a TOML inline array
fn toml_string_array(items: &[&str]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|s| format!("\"{}\"", toml_escape_string(s)))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Write a commented site.toml into an existing directory.
///
/// # Errors
///
/// Returns an error if:
/// - The directory doesn't exist
/// - site.toml already exists in the directory
/// - The file can't be written
pub async fn run(path: PathBuf, site_url: Option<String>, api_url: Option<String>) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    if !path.exists() {
        anyhow::bail!(
            "Directory '{}' does not exist. Create it first: mkdir {}",
            path.display(),
            path.display()
        );
    }

    let site_toml_path = path.join(SITE_TOML);
    if site_toml_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            SITE_TOML,
            site_toml_path.display()
        );
    }

    let content = render_site_toml(
        site_url.as_deref().unwrap_or(PLACEHOLDER_SITE_URL),
        api_url.as_deref().unwrap_or(PLACEHOLDER_API_URL),
    );
    fs::write(&site_toml_path, content)
        .with_context(|| format!("Failed to write {}", site_toml_path.display()))?;

    println!("✓ Wrote {}", site_toml_path.display());
    if site_url.is_none() || api_url.is_none() {
        println!("⚠ Placeholder URLs used; edit [site] and [api] before generating");
    }

    println!("\nNext steps:");
    println!("  1. Check site.toml (site url, api base url, exclusions)");
    println!("  2. Validate: sitemap-kit validate {}", path.display());
    println!(
        "  3. Generate: sitemap-kit generate {} --output public",
        path.display()
    );

    Ok(())
}

/// Render the starter site.toml. The built-in defaults are spelled out so
/// they can be tuned in place.
fn render_site_toml(site_url: &str, api_url: &str) -> String {
    let priorities: String = STATIC_PRIORITIES
        .iter()
        .map(|(path, p)| format!("\"{}\" = {:?}\n", toml_escape_string(path), p.value()))
        .collect();
    let frequencies: String = STATIC_FREQUENCIES
        .iter()
        .map(|(path, f)| format!("\"{}\" = \"{}\"\n", toml_escape_string(path), f))
        .collect();

    format!(
        r#"# Sitemap configuration
# Generated by sitemap-kit init

[site]
# Public origin used for <loc> values and robots.txt
url = "{site_url}"

[api]
# Backend serving /villas and /posts/visible
base_url = "{api_url}"
# Items requested per collection (only the first page is read)
page_size = {page_size}

[sitemap]
# Used for paths missing from the tables below
changefreq = "{changefreq}"
priority = {priority:?}
# URLs per sitemap file; larger sets are split and listed in sitemap.xml
sitemap_size = {sitemap_size}
generate_robots_txt = true
# Glob patterns (* matches anything) never written to the sitemap
exclude = {exclude}

# /villa/* is always weekly at 0.9 and /bai-viet/* weekly at 0.8

[sitemap.priorities]
{priorities}
[sitemap.frequencies]
{frequencies}
[robots]
disallow = {disallow}
"#,
        site_url = toml_escape_string(site_url),
        api_url = toml_escape_string(api_url),
        page_size = DEFAULT_PAGE_SIZE,
        changefreq = DEFAULT_CHANGEFREQ,
        priority = DEFAULT_PRIORITY.value(),
        sitemap_size = DEFAULT_SITEMAP_SIZE,
        exclude = toml_string_array(DEFAULT_EXCLUDES),
        priorities = priorities,
        frequencies = frequencies,
        disallow = toml_string_array(DEFAULT_DISALLOW),
    )
}
