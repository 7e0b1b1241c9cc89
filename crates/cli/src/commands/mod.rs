pub mod check;
pub mod generate;
pub mod init;
pub mod serve;
pub mod validate;

use anyhow::{Context, Result};
use sitemap_kit_core::{SiteConfig, parse_site_toml};
use std::path::Path;

pub const SITE_TOML: &str = "site.toml";

/// Load site.toml from a site directory
pub fn load_site_config(path: &Path) -> Result<SiteConfig> {
    if !path.exists() {
        anyhow::bail!("Site directory does not exist: {}", path.display());
    }

    let site_toml_path = path.join(SITE_TOML);
    if !site_toml_path.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'sitemap-kit init {}' first",
            SITE_TOML,
            path.display(),
            path.display()
        );
    }

    parse_site_toml(&site_toml_path).with_context(|| format!("Failed to parse {}", SITE_TOML))
}
