use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;

/// Instagram post, reel and tv links, e.g. `https://www.instagram.com/p/ABC123/`.
/// Anchored at the start only; anything after the shortcode is ignored.
static INSTAGRAM_POST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?instagram\.com/(p|reel|tv)/[A-Za-z0-9_-]+/?")
        .expect("hardcoded pattern compiles")
});

/// Check whether a string is a link to an Instagram post, reel or tv video.
pub fn is_instagram_post_url(url: &str) -> bool {
    INSTAGRAM_POST_RE.is_match(url)
}

/// Get current Unix timestamp in seconds
pub fn get_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}

/// Pick a file extension by sniffing the image bytes. Instagram serves jpeg
/// almost exclusively, so that is also the fallback.
pub fn image_extension(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("jpg")
}

/// Filename offered in the save dialog, e.g. `instagram-image-1700000000.jpg`.
pub fn suggested_filename(bytes: &[u8]) -> String {
    format!("instagram-image-{}.{}", get_timestamp(), image_extension(bytes))
}
