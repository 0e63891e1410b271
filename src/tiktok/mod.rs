use async_trait::async_trait;
use serde::Deserialize;

use crate::core::{Audio, Extractor, Platform};
use crate::error::{ExtractError, Result};
use crate::fetch::get_json;
use crate::utils::format_duration;

const TIKWM_ENDPOINT: &str = "https://www.tikwm.com/api/";

#[derive(Debug, Deserialize)]
pub struct TikwmResponse {
    pub msg: Option<String>,
    pub data: Option<TikwmData>,
}

#[derive(Debug, Deserialize)]
pub struct TikwmData {
    pub title: Option<String>,
    /// Direct URL of the post's music track
    pub music: Option<String>,
    pub duration: Option<u64>,
}

fn audio_from_response(response: TikwmResponse) -> Result<Audio> {
    let TikwmResponse { msg, data } = response;

    let data = data.ok_or_else(|| {
        ExtractError::ExtractionFailed(msg.unwrap_or_else(|| "tikwm returned no data".to_string()))
    })?;

    let music = data
        .music
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            ExtractError::ExtractionFailed("tikwm response has no music stream".to_string())
        })?;

    let mut audio = Audio::new(
        data.title.unwrap_or_else(|| "TikTok audio".to_string()),
        music,
        Platform::Tiktok,
    );
    audio.duration = data.duration.map(format_duration);
    Ok(audio)
}

/// TikTok extractor backed by the public tikwm API
pub struct TiktokExtractor;

#[async_trait]
impl Extractor for TiktokExtractor {
    fn matches(&self, url: &str) -> bool {
        url.contains("tiktok.com")
    }

    async fn extract(&self, url: &str) -> Result<Audio> {
        let api_url = format!("{}?url={}", TIKWM_ENDPOINT, urlencoding::encode(url));
        let response: TikwmResponse = get_json(&api_url).await?;
        audio_from_response(response)
    }

    fn platform(&self) -> Platform {
        Platform::Tiktok
    }
}
