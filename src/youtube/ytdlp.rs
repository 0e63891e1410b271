//! Fallback YouTube strategy: shell out to yt-dlp for the direct stream URL.

use tokio::process::Command;

use crate::core::{Audio, ExtractStrategy, Platform};
use crate::error::{ExtractError, Result};

const DEFAULT_BIN: &str = "yt-dlp";

fn ytdlp_bin() -> String {
    std::env::var("YTDLP_BIN").unwrap_or_else(|_| DEFAULT_BIN.to_string())
}

/// Last non-empty stderr line; yt-dlp puts the actual failure there.
fn stderr_tail(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .next_back()
        .unwrap_or("yt-dlp exited with an error")
        .to_string()
}

/// With `--get-title --get-url`, yt-dlp prints the title line followed by
/// the resolved stream URL.
fn parse_output(stdout: &[u8]) -> Result<(String, String)> {
    let text = String::from_utf8_lossy(stdout);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let stream_url = lines
        .iter()
        .rev()
        .find(|line| line.starts_with("http://") || line.starts_with("https://"))
        .map(|line| line.to_string())
        .ok_or_else(|| {
            ExtractError::ExtractionFailed("yt-dlp produced no stream URL".to_string())
        })?;

    let title = lines
        .iter()
        .find(|line| !line.starts_with("http://") && !line.starts_with("https://"))
        .map(|line| line.to_string())
        .unwrap_or_else(|| "YouTube audio".to_string());

    Ok((title, stream_url))
}

/// yt-dlp subprocess strategy. The URL travels as a discrete argument, never
/// through a shell string.
pub struct YtDlpStrategy;

#[async_trait::async_trait]
impl ExtractStrategy for YtDlpStrategy {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract(&self, url: &str) -> Result<Audio> {
        let bin = ytdlp_bin();
        let output = Command::new(&bin)
            .arg("--no-playlist")
            .arg("-f")
            .arg("bestaudio")
            .arg("--get-title")
            .arg("--get-url")
            .arg(url)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractError::Command(format!("{} is not installed or not on PATH", bin))
                } else {
                    ExtractError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(ExtractError::Command(stderr_tail(&output.stderr)));
        }

        let (title, stream_url) = parse_output(&output.stdout)?;
        Ok(Audio::new(title, stream_url, Platform::Youtube))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_title_and_url_lines() {
        let stdout = b"Me at the zoo\nhttps://rr1.googlevideo.com/videoplayback?sig=abc\n";
        let (title, url) = parse_output(stdout).unwrap();
        assert_eq!(title, "Me at the zoo");
        assert!(url.starts_with("https://rr1.googlevideo.com/"));
    }

    #[test]
    fn url_only_output_gets_a_placeholder_title() {
        let (title, url) = parse_output(b"https://cdn.example.com/a.m4a\n").unwrap();
        assert_eq!(title, "YouTube audio");
        assert_eq!(url, "https://cdn.example.com/a.m4a");
    }

    #[test]
    fn output_without_a_url_fails() {
        assert!(parse_output(b"Some title but nothing else\n").is_err());
        assert!(parse_output(b"").is_err());
    }

    #[test]
    fn stderr_tail_takes_the_last_meaningful_line() {
        let stderr = b"WARNING: unable to use cookies\n\nERROR: Video unavailable\n\n";
        assert_eq!(stderr_tail(stderr), "ERROR: Video unavailable");
        assert_eq!(stderr_tail(b""), "yt-dlp exited with an error");
    }
}
