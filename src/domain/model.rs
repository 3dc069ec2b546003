use bytes::Bytes;
use url::Url;

/// Image fetched from the resolved URL, held in memory until saved or reset.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Bytes,
    pub source_url: Url,
    pub suggested_filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    Idle,
    Loading,
    Ready,
}
