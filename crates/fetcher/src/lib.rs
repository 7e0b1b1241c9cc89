//! Remote collection fetching from the backend API.
//!
//! The [`ResourceSource`] trait is the seam the sitemap assembler talks to;
//! [`api::ApiClient`] is the HTTP implementation.

pub mod api;
pub mod error;

pub use api::{ApiClient, BookingReply};
pub use error::FetchError;

use async_trait::async_trait;
use sitemap_kit_core::{Collection, Resource};

#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Fetch one page of a collection. A failure covers the whole collection.
    async fn fetch(&self, collection: Collection) -> Result<Vec<Resource>, FetchError>;
}
