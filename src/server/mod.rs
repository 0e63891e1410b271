//! Axum router and request handlers.
//!
//! [`build`] assembles the application router: the health/info route, the
//! dispatching extraction endpoint, the direct yt-dlp endpoint, and the CORS
//! layer (wildcard unless an origin allow-list is configured).

pub mod config;
pub mod error;

use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::core::{Audio, ExtractStrategy, IntoEnumIterator, Platform};
use crate::error::ExtractError;
use crate::server::config::Config;
use crate::server::error::ApiError;
use crate::youtube::YtDlpStrategy;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    #[serde(rename = "audioUrl")]
    pub audio_url: String,
    pub title: String,
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl From<Audio> for ExtractResponse {
    fn from(audio: Audio) -> Self {
        Self {
            success: true,
            audio_url: audio.stream_url,
            title: audio.title,
            platform: audio.platform,
            duration: audio.duration,
        }
    }
}

/// Build the complete application [`Router`].
pub fn build(config: &Config) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/extract-audio", post(extract_audio))
        .route("/extract-audio-ytdlp", post(extract_audio_ytdlp))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// Wildcard CORS unless a comma-separated origin list is configured.
fn cors_layer(config: &Config) -> CorsLayer {
    if let Some(origins_str) = &config.cors_allowed_origins {
        let origins: Vec<axum::http::HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        if origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any)
        } else {
            CorsLayer::new()
                .allow_origin(origins)
                .allow_headers(Any)
                .allow_methods(Any)
        }
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_headers(Any)
            .allow_methods(Any)
    }
}

/// Health / info endpoint (`GET /`).
async fn service_info() -> Json<Value> {
    let platforms: Vec<Platform> = Platform::iter()
        .filter(|p| *p != Platform::Unknown)
        .collect();
    Json(json!({
        "status": "online",
        "message": "audiograb is running",
        "platforms": platforms,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// Classify the URL and dispatch to its platform extractor
/// (`POST /extract-audio`).
async fn extract_audio(
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ExtractError::InvalidUrl("URL is required".to_string()).into());
    }

    info!(%url, "extraction requested");
    let audio = crate::extract(url).await?;
    info!(%url, platform = %audio.platform, "extraction succeeded");
    Ok(Json(audio.into()))
}

/// Bypass classification and resolve directly through yt-dlp
/// (`POST /extract-audio-ytdlp`).
async fn extract_audio_ytdlp(
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ExtractError::InvalidUrl("URL is required".to_string()).into());
    }

    info!(%url, "yt-dlp extraction requested");
    let audio = YtDlpStrategy.extract(url).await?;
    Ok(Json(audio.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_config() -> Config {
        Config {
            port: 3000,
            log_level: "info".into(),
            cors_allowed_origins: None,
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn info_route_lists_supported_platforms() {
        let app = build(&test_config());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "online");
        let platforms = body["platforms"].as_array().unwrap();
        assert_eq!(platforms.len(), 4);
        assert!(platforms.contains(&json!("youtube")));
        assert!(!platforms.contains(&json!("unknown")));
    }

    #[tokio::test]
    async fn missing_url_is_a_400_with_an_error_field() {
        let app = build(&test_config());
        let response = app
            .oneshot(post_json_request("/extract-audio", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("URL"));
    }

    #[tokio::test]
    async fn empty_url_is_a_400() {
        let app = build(&test_config());
        let response = app
            .oneshot(post_json_request("/extract-audio", r#"{"url": "  "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unsupported_platform_is_a_500_with_an_error_field() {
        let app = build(&test_config());
        let response = app
            .oneshot(post_json_request(
                "/extract-audio",
                r#"{"url": "https://soundcloud.com/artist/song"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("soundcloud.com"));
    }

    #[tokio::test]
    async fn preflight_is_answered_by_the_cors_layer() {
        let app = build(&test_config());
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/extract-audio")
                    .header(header::ORIGIN, "https://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn success_payload_uses_the_wire_field_names() {
        let audio = Audio::new(
            "a song".into(),
            "https://cdn.example.com/a.m4a".into(),
            Platform::Tiktok,
        );
        let body = serde_json::to_value(ExtractResponse::from(audio)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["audioUrl"], "https://cdn.example.com/a.m4a");
        assert_eq!(body["platform"], "tiktok");
        assert!(body.get("duration").is_none());
    }

    #[test]
    fn duration_is_included_when_known() {
        let audio = Audio::new("a".into(), "https://x/a".into(), Platform::Youtube)
            .with_duration("3:33".into());
        let body = serde_json::to_value(ExtractResponse::from(audio)).unwrap();
        assert_eq!(body["duration"], "3:33");
    }
}
