use serde::{Deserialize, Serialize};

/// Request body for the /api/extract endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ExtractRequest<'a> {
    pub url: &'a str,
}

/// Response from the /api/extract endpoint.
///
/// The backend has gone through a few names for the resolved image URL field;
/// whichever is present and non-empty wins, in declaration order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExtractResponse {
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    #[serde(rename = "fullImageUrl", default)]
    pub full_image_url: String,
    #[serde(rename = "highResUrl", default)]
    pub high_res_url: String,
    #[serde(default)]
    pub error: String,
}

impl ExtractResponse {
    /// First non-empty URL field, in precedence order.
    pub fn resolved_url(&self) -> Option<&str> {
        [&self.image_url, &self.full_image_url, &self.high_res_url]
            .into_iter()
            .map(String::as_str)
            .find(|url| !url.is_empty())
    }
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
        }
    }
}
