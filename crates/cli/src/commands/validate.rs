use super::load_site_config;
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating site at: {}", path.display());

    let config = load_site_config(&path)?;
    let sitemap = &config.sitemap;

    println!("✓ site.toml valid");
    println!("  Site: {}", config.site_url);
    println!(
        "  API: {} (page size {})",
        config.api.base_url, config.api.page_size
    );
    println!(
        "  Defaults: {} / {}",
        sitemap.default_changefreq, sitemap.default_priority
    );
    println!("  Exclusions: {}", sitemap.exclude.join(", "));
    println!("  URLs per sitemap file: {}", sitemap.sitemap_size);
    println!(
        "  robots.txt: {}",
        if sitemap.generate_robots_txt {
            "generated"
        } else {
            "skipped"
        }
    );

    Ok(())
}
