// Backend API client: collection listing for the sitemap, booking forwarding for the proxy

use crate::ResourceSource;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use sitemap_kit_core::{ApiConfig, Collection, Resource};
use tracing::debug;

const BOOKINGS_ENDPOINT: &str = "bookings";

/// Backend API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    page_size: usize,
}

/// Status and JSON body returned by the backend for a booking request
#[derive(Debug, Clone, PartialEq)]
pub struct BookingReply {
    pub status: u16,
    pub body: Value,
}

impl ApiClient {
    /// Create new backend API client
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Forward a booking payload to `POST /bookings` and hand back whatever
    /// the backend answered, success or not.
    pub async fn forward_booking(&self, payload: &Value) -> Result<BookingReply, FetchError> {
        let response = self
            .client
            .post(self.url(BOOKINGS_ENDPOINT))
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let body = serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode {
            endpoint: BOOKINGS_ENDPOINT.to_string(),
            reason: e.to_string(),
        })?;

        Ok(BookingReply { status, body })
    }
}

#[async_trait]
impl ResourceSource for ApiClient {
    async fn fetch(&self, collection: Collection) -> Result<Vec<Resource>, FetchError> {
        let url = self.url(collection.endpoint());
        debug!("GET {}?limit={}", url, self.page_size);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", self.page_size)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: collection.endpoint().to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let resources = decode_collection(collection, &bytes)?;
        debug!("{} {} received", resources.len(), collection);

        Ok(resources)
    }
}

/// Pull the item array for `collection` out of a response body.
///
/// ```text
/// {"villas": [{"slug": "a", "name": "A"}], "total": 1}  → Ok([Resource { slug: "a" }])
/// {"villas": null}                                      → Err(Decode)
/// {"villas": [{"name": "no slug"}]}                     → Err(Decode)
/// ```
pub fn decode_collection(collection: Collection, body: &[u8]) -> Result<Vec<Resource>, FetchError> {
    let decode_err = |reason: String| FetchError::Decode {
        endpoint: collection.endpoint().to_string(),
        reason,
    };

    let mut payload: Value = serde_json::from_slice(body).map_err(|e| decode_err(e.to_string()))?;

    let items = payload
        .get_mut(collection.payload_key())
        .map(Value::take)
        .ok_or_else(|| decode_err(format!("missing '{}' field", collection.payload_key())))?;

    if !items.is_array() {
        return Err(decode_err(format!(
            "'{}' is not an array",
            collection.payload_key()
        )));
    }

    serde_json::from_value(items).map_err(|e| decode_err(e.to_string()))
}
