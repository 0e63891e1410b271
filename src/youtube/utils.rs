use regex::Regex;

use crate::error::{ExtractError, Result};

/// Parse the 11-character video ID out of a YouTube watch, short-link,
/// shorts or embed URL. Rejects anything that does not carry one.
pub fn parse_video_id(url: &str) -> Result<String> {
    let re = Regex::new(
        r"(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|shorts/|embed/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .unwrap();

    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractError::InvalidUrl(format!("Not a valid YouTube URL: {}", url)))
}

/// Construct YouTube watch URL from video ID
pub fn build_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watch_urls() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=jNQXAC9IVRw").unwrap(),
            "jNQXAC9IVRw"
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?list=PL1&v=jNQXAC9IVRw&t=10").unwrap(),
            "jNQXAC9IVRw"
        );
    }

    #[test]
    fn parses_short_links_and_shorts() {
        assert_eq!(
            parse_video_id("https://youtu.be/jNQXAC9IVRw?si=xyz").unwrap(),
            "jNQXAC9IVRw"
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/shorts/jNQXAC9IVRw").unwrap(),
            "jNQXAC9IVRw"
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/embed/jNQXAC9IVRw").unwrap(),
            "jNQXAC9IVRw"
        );
    }

    #[test]
    fn rejects_urls_without_a_video_id() {
        assert!(parse_video_id("https://www.youtube.com/").is_err());
        assert!(parse_video_id("https://www.youtube.com/watch?v=short").is_err());
        assert!(parse_video_id("https://example.com/watch?v=jNQXAC9IVRw-but-not-youtube").is_err());
    }

    #[test]
    fn builds_watch_urls() {
        assert_eq!(
            build_watch_url("jNQXAC9IVRw"),
            "https://www.youtube.com/watch?v=jNQXAC9IVRw"
        );
    }
}
