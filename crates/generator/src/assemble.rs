//! Collects every sitemap entry for one generation run.

use crate::transform::transform_at;
use chrono::{DateTime, Utc};
use sitemap_kit_core::{Collection, Resource, STATIC_PATHS, SitemapConfig, SitemapEntry};
use sitemap_kit_fetcher::{FetchError, ResourceSource};
use std::collections::HashSet;
use tracing::{debug, warn};

/// How one remote collection fared during assembly
#[derive(Debug)]
pub struct CollectionOutcome {
    pub collection: Collection,
    /// Number of entries contributed, or the reason the collection was skipped
    pub result: Result<usize, FetchError>,
}

/// Result of one generation run
#[derive(Debug)]
pub struct Assembly {
    /// Static entries first, then villas, then posts, each in upstream order
    pub entries: Vec<SitemapEntry>,
    /// One outcome per remote collection, in fetch order
    pub outcomes: Vec<CollectionOutcome>,
    pub started_at: DateTime<Utc>,
}

impl Assembly {
    /// True when at least one collection could not be fetched
    pub fn is_degraded(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.is_err())
    }

    pub fn outcome(&self, collection: Collection) -> Option<&CollectionOutcome> {
        self.outcomes.iter().find(|o| o.collection == collection)
    }
}

/// Entries for the fixed top-level routes
pub fn static_entries(config: &SitemapConfig, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    STATIC_PATHS
        .iter()
        .map(|path| transform_at(config, path, now))
        .collect()
}

/// Assemble the full entry list: static routes plus one entry per villa and post.
///
/// Both collections are fetched concurrently. A failed fetch is logged and
/// contributes nothing; the other collection and the static routes are
/// unaffected.
pub async fn additional_paths<S>(config: &SitemapConfig, source: &S) -> Assembly
where
    S: ResourceSource + ?Sized,
{
    let started_at = Utc::now();

    let (villas, posts) = tokio::join!(
        source.fetch(Collection::Villas),
        source.fetch(Collection::Posts)
    );

    let now = Utc::now();
    let mut entries = static_entries(config, now);
    let mut seen: HashSet<String> = entries.iter().map(|e| e.loc.clone()).collect();
    let mut outcomes = Vec::with_capacity(Collection::ALL.len());

    for (collection, fetched) in [(Collection::Villas, villas), (Collection::Posts, posts)] {
        let result = match fetched {
            Ok(resources) => Ok(push_collection(
                config,
                collection,
                &resources,
                now,
                &mut seen,
                &mut entries,
            )),
            Err(err) => {
                warn!("Skipping {} in sitemap: {}", collection, err);
                Err(err)
            }
        };
        outcomes.push(CollectionOutcome { collection, result });
    }

    Assembly {
        entries,
        outcomes,
        started_at,
    }
}

/// Append entries for `resources`, returning how many were added
fn push_collection(
    config: &SitemapConfig,
    collection: Collection,
    resources: &[Resource],
    now: DateTime<Utc>,
    seen: &mut HashSet<String>,
    entries: &mut Vec<SitemapEntry>,
) -> usize {
    let before = entries.len();

    for resource in resources {
        let Some(path) = collection.path_for(resource) else {
            warn!(
                "Ignoring {} item with unusable slug {:?}",
                collection, resource.slug
            );
            continue;
        };
        if !seen.insert(path.clone()) {
            debug!("Duplicate path {} dropped", path);
            continue;
        }

        entries.push(transform_at(config, &path, now));
    }

    entries.len() - before
}
