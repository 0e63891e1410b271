use serde::{Deserialize, Serialize};
pub use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::error::{ExtractError, Result};

use crate::deezer::DeezerExtractor;
use crate::spotify::SpotifyExtractor;
use crate::tiktok::TiktokExtractor;
use crate::youtube::YoutubeExtractor;

/// Supported platforms
#[derive(EnumIter, Display, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Youtube,
    Tiktok,
    Spotify,
    Deezer,
    Unknown,
}

impl Platform {
    /// Classify a URL by asking each extractor in order; first match wins.
    /// No normalization is applied to the input.
    pub fn from_url(url: &str) -> Platform {
        for extractor in crate::EXTRACTORS {
            if extractor.matches(url) {
                return extractor.platform();
            }
        }
        Platform::Unknown
    }

    /// Dispatch table. `Unknown` carries no extractor; the dispatcher turns
    /// it into an [`ExtractError::UnsupportedPlatform`] before getting here.
    pub fn extractor(&self) -> Option<&'static dyn Extractor> {
        match self {
            Platform::Youtube => Some(&YoutubeExtractor),
            Platform::Tiktok => Some(&TiktokExtractor),
            Platform::Spotify => Some(&SpotifyExtractor),
            Platform::Deezer => Some(&DeezerExtractor),
            Platform::Unknown => None,
        }
    }
}

/// A resolved audio stream: direct playable URL plus display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audio {
    pub title: String,
    pub stream_url: String,
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Audio {
    pub fn new(title: String, stream_url: String, platform: Platform) -> Self {
        Self {
            title,
            stream_url,
            platform,
            duration: None,
        }
    }

    /// Set duration, already formatted for display
    pub fn with_duration(mut self, duration: String) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Trait for resolving audio streams from different platforms
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Check if the URL belongs to this extractor's platform
    fn matches(&self, url: &str) -> bool;

    /// Resolve the URL to a playable audio stream
    async fn extract(&self, url: &str) -> Result<Audio>;

    /// Get platform identifier
    fn platform(&self) -> Platform;
}

/// One way of resolving a URL to an audio stream. Extractors with more than
/// one (YouTube: player API first, yt-dlp second) hold an ordered list of
/// these and try them in sequence.
#[async_trait::async_trait]
pub trait ExtractStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract(&self, url: &str) -> Result<Audio>;
}

/// Try strategies in order; first success wins. The last failure is reported
/// only after every strategy has been exhausted.
pub async fn run_strategies(url: &str, strategies: &[&dyn ExtractStrategy]) -> Result<Audio> {
    let mut last_err = None;
    for strategy in strategies {
        match strategy.extract(url).await {
            Ok(audio) => return Ok(audio),
            Err(e) => {
                tracing::warn!(strategy = strategy.name(), error = %e, "extraction strategy failed");
                last_err = Some(e);
            }
        }
    }
    Err(last_err
        .unwrap_or_else(|| ExtractError::ExtractionFailed("no extraction strategy ran".into())))
}
