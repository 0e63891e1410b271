pub mod core;
pub mod deezer;
pub mod error;
mod fetch;
pub mod server;
pub mod spotify;
pub mod tiktok;
pub mod utils;
pub mod youtube;

pub use crate::core::{Audio, Extractor, Platform};
pub use crate::deezer::DeezerExtractor;
pub use crate::error::{ExtractError, Result};
pub use crate::spotify::SpotifyExtractor;
pub use crate::tiktok::TiktokExtractor;
pub use crate::youtube::YoutubeExtractor;

/// Classification and dispatch order; first match wins.
pub static EXTRACTORS: &[&dyn Extractor] = &[
    &YoutubeExtractor,
    &TiktokExtractor,
    &SpotifyExtractor,
    &DeezerExtractor,
];

/// Resolve a media URL to a playable audio stream (auto-detect platform)
pub async fn extract(url: &str) -> Result<Audio> {
    let platform = Platform::from_url(url);
    match platform.extractor() {
        Some(extractor) => extractor.extract(url).await,
        None => Err(ExtractError::UnsupportedPlatform(format!(
            "No extractor found for: {}",
            url
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_platform_fails_without_touching_an_extractor() {
        let err = extract("https://soundcloud.com/artist/song").await.unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedPlatform(_)));
    }

    #[tokio::test]
    async fn malformed_youtube_url_is_rejected_before_any_upstream_call() {
        let err = extract("https://www.youtube.com/feed/trending").await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUrl(_)));
    }
}
