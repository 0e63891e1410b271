//! Primary YouTube strategy: the Innertube player API with an Android
//! client context. The Android client hands back direct stream URLs, so no
//! signature solving is involved.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::core::{Audio, ExtractStrategy, Platform};
use crate::error::{ExtractError, Result};
use crate::fetch::post_json;
use crate::utils::format_duration;
use crate::youtube::utils::parse_video_id;

pub const ANDROID_USER_AGENT: &str =
    "com.google.android.youtube/20.10.38 (Linux; U; Android 11) gzip";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";
const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player?prettyPrint=false";

#[derive(Serialize)]
struct InnertubeRequest {
    #[serde(rename = "videoId")]
    video_id: String,
    context: InnertubeContext,
    #[serde(rename = "contentCheckOk")]
    content_check_ok: bool,
    #[serde(rename = "racyCheckOk")]
    racy_check_ok: bool,
}

#[derive(Serialize)]
struct InnertubeContext {
    client: ClientInfo,
}

#[derive(Serialize)]
struct ClientInfo {
    #[serde(rename = "clientName")]
    client_name: String,
    #[serde(rename = "clientVersion")]
    client_version: String,
    #[serde(rename = "userAgent")]
    user_agent: String,
    #[serde(rename = "osName")]
    os_name: String,
    #[serde(rename = "osVersion")]
    os_version: String,
    hl: String,
    #[serde(rename = "timeZone")]
    time_zone: String,
    #[serde(rename = "utcOffsetMinutes")]
    utc_offset_minutes: i32,
}

#[derive(Debug, Deserialize)]
pub struct PlayerResponse {
    #[serde(rename = "playabilityStatus")]
    pub playability_status: Option<PlayabilityStatus>,
    #[serde(rename = "streamingData")]
    pub streaming_data: Option<StreamingData>,
    #[serde(rename = "videoDetails")]
    pub video_details: Option<VideoDetails>,
}

#[derive(Debug, Deserialize)]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StreamingData {
    #[serde(rename = "adaptiveFormats", default)]
    pub adaptive_formats: Vec<AdaptiveFormat>,
}

#[derive(Debug, Deserialize)]
pub struct AdaptiveFormat {
    pub itag: Option<i64>,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    pub bitrate: Option<i64>,
    #[serde(rename = "audioQuality")]
    pub audio_quality: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoDetails {
    pub title: Option<String>,
    #[serde(rename = "lengthSeconds")]
    pub length_seconds: Option<String>,
}

/// Fetch player response from the Innertube API (Android client)
async fn fetch_player_response(video_id: &str) -> Result<PlayerResponse> {
    let request_body = InnertubeRequest {
        video_id: video_id.to_string(),
        context: InnertubeContext {
            client: ClientInfo {
                client_name: INNERTUBE_CLIENT_NAME.to_string(),
                client_version: INNERTUBE_CLIENT_VERSION.to_string(),
                user_agent: ANDROID_USER_AGENT.to_string(),
                os_name: "Android".to_string(),
                os_version: "11".to_string(),
                hl: "en".to_string(),
                time_zone: "UTC".to_string(),
                utc_offset_minutes: 0,
            },
        },
        content_check_ok: true,
        racy_check_ok: true,
    };

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(ANDROID_USER_AGENT));
    headers.insert("X-YouTube-Client-Name", HeaderValue::from_static("3"));
    headers.insert(
        "X-YouTube-Client-Version",
        HeaderValue::from_static(INNERTUBE_CLIENT_VERSION),
    );
    headers.insert(ORIGIN, HeaderValue::from_static("https://www.youtube.com"));

    post_json(PLAYER_ENDPOINT, &request_body, headers).await
}

/// Audio-only variants with a direct URL, best bitrate first
fn select_best_audio(formats: &[AdaptiveFormat]) -> Result<&AdaptiveFormat> {
    formats
        .iter()
        .filter(|f| f.mime_type.starts_with("audio/") && f.url.is_some())
        .max_by_key(|f| f.bitrate.unwrap_or(0))
        .ok_or(ExtractError::AudioNotFound)
}

fn audio_from_player_response(response: PlayerResponse) -> Result<Audio> {
    if let Some(status) = &response.playability_status {
        let status_str = status.status.as_deref().unwrap_or("OK");
        if status_str != "OK" {
            return Err(ExtractError::ExtractionFailed(format!(
                "Video unavailable: {}",
                status.reason.as_deref().unwrap_or(status_str)
            )));
        }
    }

    let streaming = response.streaming_data.ok_or(ExtractError::AudioNotFound)?;
    let format = select_best_audio(&streaming.adaptive_formats)?;
    let stream_url = format
        .url
        .clone()
        .ok_or(ExtractError::AudioNotFound)?;

    let details = response.video_details.as_ref();
    let title = details
        .and_then(|d| d.title.clone())
        .unwrap_or_else(|| "YouTube audio".to_string());

    let mut audio = Audio::new(title, stream_url, Platform::Youtube);
    audio.duration = details
        .and_then(|d| d.length_seconds.as_deref())
        .and_then(|s| s.parse::<u64>().ok())
        .map(format_duration);
    Ok(audio)
}

/// Player-API-backed extraction strategy
pub struct PlayerApiStrategy;

#[async_trait::async_trait]
impl ExtractStrategy for PlayerApiStrategy {
    fn name(&self) -> &'static str {
        "innertube-player"
    }

    async fn extract(&self, url: &str) -> Result<Audio> {
        let video_id = parse_video_id(url)?;
        let response = fetch_player_response(&video_id).await?;
        audio_from_player_response(response)
    }
}
