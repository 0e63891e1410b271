use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{ExtractError, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// Initialize HTTP client with default configuration
fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .connect_timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}

fn merge_headers(additional: Option<HeaderMap>) -> HeaderMap {
    let mut headers = default_headers();
    if let Some(custom) = additional {
        headers.extend(custom);
    }
    headers
}

/// Execute GET request with error handling
async fn execute_get(url: &str, headers: Option<HeaderMap>) -> Result<reqwest::Response> {
    let request = http_client().get(url).headers(merge_headers(headers));

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ExtractError::RequestTimeout(url.to_string())
        } else {
            ExtractError::Network(e)
        }
    })?;

    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ExtractError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// Fetch and parse a JSON response from URL
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let response = execute_get(url, None).await?;
    response.json::<T>().await.map_err(ExtractError::from)
}

/// Execute POST request with JSON body and custom headers
pub async fn post_json<T: DeserializeOwned, B: Serialize>(
    url: &str,
    body: &B,
    headers: HeaderMap,
) -> Result<T> {
    let request = http_client()
        .post(url)
        .headers(merge_headers(Some(headers)))
        .json(body);

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ExtractError::RequestTimeout(url.to_string())
        } else {
            ExtractError::Network(e)
        }
    })?;

    let status = response.status();
    if status.is_success() {
        response.json::<T>().await.map_err(ExtractError::from)
    } else {
        Err(ExtractError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}
