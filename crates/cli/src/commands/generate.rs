use anyhow::{Context, Result};
use sitemap_kit_core::SiteConfig;
use sitemap_kit_fetcher::{ApiClient, ResourceSource};
use sitemap_kit_generator::{Assembly, GeneratedSitemap, additional_paths, render_sitemap};
use std::path::{Path, PathBuf};

use super::load_site_config;

/// Fetch villas and posts, then write sitemap files into `output`
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🗺  Generating sitemap...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let config = load_site_config(&path)?;
    println!("✓ Loaded: {}", config.site_url);
    println!("  API: {}", config.api.base_url);
    println!();

    let client = ApiClient::new(&config.api).context("Failed to create API client")?;

    println!("🌐 Fetching villas and posts...");
    let (assembly, generated) = build_sitemap(&config, &client, &output).await?;

    for outcome in &assembly.outcomes {
        match &outcome.result {
            Ok(count) => println!("   ✓ {}: {} URLs", outcome.collection, count),
            Err(err) => println!("   ⚠ {}: skipped ({})", outcome.collection, err),
        }
    }
    println!();

    println!("📄 Sitemap files:");
    for (name, _) in &generated.files {
        println!("   ✓ {}", name);
    }
    if !generated.excluded.is_empty() {
        println!("   {} path(s) excluded", generated.excluded.len());
    }

    println!();
    if assembly.is_degraded() {
        println!(
            "⚠ Sitemap written without some dynamic URLs ({} total)",
            generated.url_count
        );
    } else {
        println!("✅ Sitemap complete! {} URLs", generated.url_count);
    }
    println!("   Output: {}", output.display());
    println!();

    Ok(())
}

/// Assemble entries from `source`, render them and write everything to `output`.
///
/// Fetch failures only shrink the result; write failures are returned.
pub async fn build_sitemap<S>(
    config: &SiteConfig,
    source: &S,
    output: &Path,
) -> Result<(Assembly, GeneratedSitemap)>
where
    S: ResourceSource + ?Sized,
{
    let assembly = additional_paths(&config.sitemap, source).await;

    let generated =
        render_sitemap(config, &assembly.entries).context("Failed to render sitemap")?;
    generated
        .write_to(output)
        .with_context(|| format!("Failed to write sitemap to {}", output.display()))?;

    Ok((assembly, generated))
}
