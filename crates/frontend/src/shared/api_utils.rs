//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making JSON requests.

use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/geo/region");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// GET `path` and decode the JSON body
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = Request::get(&api_url(path))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    decode(response).await
}

/// POST `body` as JSON to `path`, ignoring the response body
pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<(), String> {
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    ensure_ok(&response)
}

/// PUT `body` as JSON to `path`, ignoring the response body
pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<(), String> {
    let response = Request::put(&api_url(path))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    ensure_ok(&response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    ensure_ok(&response)?;
    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

fn ensure_ok(response: &Response) -> Result<(), String> {
    if response.status() == 404 {
        return Err("Not found".to_string());
    }
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}
