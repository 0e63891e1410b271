use crate::core::{Audio, ExtractStrategy, Extractor, Platform, run_strategies};
use crate::error::Result;
use async_trait::async_trait;

pub mod player;
pub mod utils;
pub mod ytdlp;

pub use player::PlayerApiStrategy;
pub use utils::{build_watch_url, parse_video_id};
pub use ytdlp::YtDlpStrategy;

/// Ordered strategy chain: the Innertube player API first, yt-dlp only when
/// it fails.
static STRATEGIES: &[&dyn ExtractStrategy] = &[&PlayerApiStrategy, &YtDlpStrategy];

/// YouTube extractor implementing the Extractor trait
#[derive(Debug, Clone)]
pub struct YoutubeExtractor;

#[async_trait]
impl Extractor for YoutubeExtractor {
    fn matches(&self, url: &str) -> bool {
        url.contains("youtube.com") || url.contains("youtu.be")
    }

    async fn extract(&self, url: &str) -> Result<Audio> {
        // Reject URLs without a recognizable video ID before spending any
        // upstream call.
        parse_video_id(url)?;
        run_strategies(url, STRATEGIES).await
    }

    fn platform(&self) -> Platform {
        Platform::Youtube
    }
}

/// Resolve a watch URL through the full strategy chain. Entry point for the
/// extractors that map foreign tracks (Spotify, Deezer) onto YouTube.
pub async fn extract_stream(url: &str) -> Result<Audio> {
    run_strategies(url, STRATEGIES).await
}
