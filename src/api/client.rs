use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::models::{ApiConfig, ExtractRequest, ExtractResponse};

// Browser-impersonation headers for the image host. Instagram's CDN serves
// most media without them but rejects bare clients on some edges.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const ACCEPT: &str = "image/avif,image/webp,image/apng,image/*,*/*;q=0.8";
const REFERER: &str = "https://www.instagram.com/";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Backend server not running. Please start the extraction server on {0}")]
    BackendUnreachable(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("{0}")]
    Api(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("No image URL in extraction response")]
    NoImageUrl,

    #[error("Failed to fetch image: {0}")]
    ImageFetch(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Step 1: Ask the extraction backend for the direct image URL behind an
    /// Instagram post.
    pub async fn extract_image_url(&self, post_url: &str) -> Result<Url> {
        let endpoint = format!("{}/api/extract", self.config.base_url);
        tracing::debug!(%endpoint, post_url, "requesting image extraction");

        // A transport-level failure here means the backend isn't listening.
        let response = self
            .http
            .post(&endpoint)
            .json(&ExtractRequest { url: post_url })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("extraction request failed: {}", e);
                ApiError::BackendUnreachable(self.config.base_url.clone())
            })?;

        if !response.status().is_success() {
            // Error responses carry an `error` field; fall back when they don't.
            let body: ExtractResponse = response.json().await.unwrap_or_default();
            if body.error.is_empty() {
                return Err(ApiError::Api("Failed to extract image".to_string()));
            }
            return Err(ApiError::Api(body.error));
        }

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        let raw = body.resolved_url().ok_or(ApiError::NoImageUrl)?;
        Url::parse(raw).map_err(|e| ApiError::InvalidResponse(format!("bad image URL: {}", e)))
    }

    /// Step 2: Download the image bytes from the resolved URL.
    pub async fn fetch_image(&self, image_url: &Url) -> Result<Bytes> {
        tracing::debug!(%image_url, "fetching image");

        let response = self
            .http
            .get(image_url.clone())
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .header("Referer", REFERER)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ApiError::ImageFetch(format!("image request failed: {}", e)))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::ImageFetch(format!("failed to read image body: {}", e)))?;

        tracing::debug!(len = bytes.len(), "image fetched");
        Ok(bytes)
    }
}
