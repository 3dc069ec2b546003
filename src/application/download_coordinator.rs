use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::{
    api::ApiClient,
    domain::{AppError, FetchedImage},
    utils::{is_instagram_post_url, suggested_filename},
};

#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ApiClient,
}

impl DownloadCoordinator {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    /// Run the full retrieval flow: validate the post URL, resolve it to a
    /// direct image URL via the backend, then fetch the image bytes.
    ///
    /// Validation happens before any network traffic.
    pub async fn fetch(&self, post_url: String) -> Result<FetchedImage, AppError> {
        if !is_instagram_post_url(&post_url) {
            return Err(AppError::InvalidUrl);
        }

        let source_url = self
            .api_client
            .extract_image_url(&post_url)
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        let bytes = self
            .api_client
            .fetch_image(&source_url)
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        let suggested_filename = suggested_filename(&bytes);
        tracing::info!(%source_url, len = bytes.len(), "image ready");

        Ok(FetchedImage {
            bytes,
            source_url,
            suggested_filename,
        })
    }

    /// Open the native save dialog, pre-filled with the suggested filename.
    pub async fn choose_save_path(&self, suggested_filename: String) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_file_name(&suggested_filename)
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    /// Write the fetched bytes to the chosen location.
    pub async fn save_image(&self, bytes: Bytes, path: &Path) -> Result<(), AppError> {
        tracing::debug!(path = %path.display(), len = bytes.len(), "saving image");
        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| AppError::Io(format!("Failed to write file: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use mockito::{Matcher, Server};

    fn coordinator_for(server: &mockito::ServerGuard) -> DownloadCoordinator {
        DownloadCoordinator::new(ApiClient::new(ApiConfig {
            base_url: server.url(),
        }))
    }

    #[tokio::test]
    async fn test_invalid_url_issues_no_network_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/extract")
            .expect(0)
            .create_async()
            .await;

        let err = coordinator_for(&server)
            .fetch("https://instagram.com/notaprofile".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidUrl));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_full_flow_posts_then_fetches_once() {
        let mut server = Server::new_async().await;
        let image_url = format!("{}/media/a.png", server.url());
        let extract = server
            .mock("POST", "/api/extract")
            .with_status(200)
            .with_body(format!(r#"{{"imageUrl":"{}"}}"#, image_url))
            .expect(1)
            .create_async()
            .await;
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let media = server
            .mock("GET", "/media/a.png")
            .with_status(200)
            .with_body(png.to_vec())
            .expect(1)
            .create_async()
            .await;

        let image = coordinator_for(&server)
            .fetch("https://www.instagram.com/p/ABC123/".to_string())
            .await
            .unwrap();

        assert!(!image.bytes.is_empty());
        assert_eq!(image.source_url.as_str(), image_url);
        assert!(image.suggested_filename.starts_with("instagram-image-"));
        assert!(image.suggested_filename.ends_with(".png"));
        extract.assert_async().await;
        media.assert_async().await;
    }

    #[tokio::test]
    async fn test_extraction_failure_stops_before_image_fetch() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/extract")
            .with_status(500)
            .with_body(r#"{"error":"Could not resolve post"}"#)
            .create_async()
            .await;
        let media = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = coordinator_for(&server)
            .fetch("https://www.instagram.com/p/ABC123/".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Could not resolve post");
        media.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_image_writes_bytes() {
        let dir = std::env::temp_dir().join(format!("igdl-test-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("out.jpg");

        let coordinator = DownloadCoordinator::new(ApiClient::new(ApiConfig::default()));
        coordinator
            .save_image(Bytes::from_static(b"abc"), &path)
            .await
            .unwrap();

        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"abc");
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
