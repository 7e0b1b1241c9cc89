//! Sitemap generation: path transform, entry assembly and output rendering.

pub mod assemble;
pub mod exclude;
pub mod robots;
pub mod transform;
pub mod xml;

pub use assemble::{Assembly, CollectionOutcome, additional_paths, static_entries};
pub use exclude::ExcludeMatcher;
pub use transform::{transform, transform_at};

use sitemap_kit_core::{Error, Result, SiteConfig, SitemapEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const INDEX_FILE: &str = "sitemap.xml";
pub const ROBOTS_FILE: &str = "robots.txt";

/// Rendered output files, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSitemap {
    pub files: Vec<(String, String)>, // (file name, contents)
    /// URLs written across all sitemap chunks
    pub url_count: usize,
    /// Paths dropped by the exclusion filter
    pub excluded: Vec<String>,
}

/// Render `entries` into chunked sitemap files, the index and, when enabled,
/// robots.txt.
///
/// Chunks are named `sitemap-0.xml`, `sitemap-1.xml`, ... and hold at most
/// `sitemap_size` URLs each. `sitemap.xml` is always the index.
pub fn render_sitemap(config: &SiteConfig, entries: &[SitemapEntry]) -> Result<GeneratedSitemap> {
    let matcher = ExcludeMatcher::new(&config.sitemap.exclude)
        .map_err(|e| Error::ConfigParse(format!("Invalid exclude pattern: {}", e)))?;

    let (kept, excluded): (Vec<&SitemapEntry>, Vec<&SitemapEntry>) = entries
        .iter()
        .partition(|entry| !matcher.is_excluded(&entry.loc));
    let kept: Vec<SitemapEntry> = kept.into_iter().cloned().collect();
    let excluded: Vec<String> = excluded.into_iter().map(|e| e.loc.clone()).collect();

    for path in &excluded {
        debug!("Excluded from sitemap: {}", path);
    }

    let mut files = Vec::new();
    let mut chunk_names = Vec::new();

    // An empty run still gets one (empty) urlset so the index is never empty
    let chunks: Vec<&[SitemapEntry]> = if kept.is_empty() {
        vec![&kept[..]]
    } else {
        kept.chunks(config.sitemap.sitemap_size.max(1)).collect()
    };

    for (i, chunk) in chunks.into_iter().enumerate() {
        let name = format!("sitemap-{}.xml", i);
        files.push((name.clone(), xml::render_urlset(&config.site_url, chunk)));
        chunk_names.push(name);
    }

    files.push((
        INDEX_FILE.to_string(),
        xml::render_index(&config.site_url, &chunk_names),
    ));

    if config.sitemap.generate_robots_txt {
        files.push((
            ROBOTS_FILE.to_string(),
            robots::render_robots(&config.site_url, &config.robots),
        ));
    }

    Ok(GeneratedSitemap {
        files,
        url_count: kept.len(),
        excluded,
    })
}

impl GeneratedSitemap {
    /// Write every file into `out_dir`, creating it if needed
    pub fn write_to(&self, out_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(out_dir)?;

        let mut written = Vec::with_capacity(self.files.len());
        for (name, contents) in &self.files {
            let path = out_dir.join(name);
            fs::write(&path, contents)?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
