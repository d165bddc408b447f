// src/core/net.rs

// Blocking HTTPS GET for a single game page.

use std::time::Duration;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::ScrapeError;

/// `<base_url><game_id>`, e.g. `https://j-archive.com/showgame.php?game_id=7000`.
pub fn episode_url(base_url: &str, game_id: u32) -> String {
    format!("{base_url}{game_id}")
}

pub fn http_get(url: &str) -> Result<String, ScrapeError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ScrapeError::Fetch(e.to_string()))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| ScrapeError::Fetch(format!("{url}: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::Fetch(format!("HTTP error: {status} {url}")));
    }
    resp.text().map_err(|e| ScrapeError::Fetch(format!("{url}: {e}")))
}
