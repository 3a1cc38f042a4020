//! Optional banner art fetched from the network.
//!
//! The configured URL points at a Lottie animation. A terminal can't play it,
//! so only its name and length are shown in the screen header. Any failure
//! simply means no decoration.

use exn::ResultExt;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use shelf_config::DecorationConfig;
use std::time::Duration;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoration {
    pub name: String,
    pub frames: u64,
}

/// The few top-level fields of a Lottie document we care about.
#[derive(Debug, Deserialize)]
struct LottieHeader {
    #[serde(default)]
    nm: Option<String>,
    /// In point, in frames.
    #[serde(default)]
    ip: f64,
    /// Out point, in frames.
    op: f64,
}
impl From<LottieHeader> for Decoration {
    fn from(header: LottieHeader) -> Self {
        let name = header.nm.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        Self {
            name: name.unwrap_or_else(|| "animation".to_string()),
            frames: (header.op - header.ip).max(0.0).round() as u64,
        }
    }
}

/// Fetches the decoration once. Returns `None` when disabled or on any
/// failure, which is logged at debug level only.
#[instrument(skip_all, fields(url = %config.url))]
pub async fn fetch(config: &DecorationConfig) -> Option<Decoration> {
    if !config.enabled {
        return None;
    }
    match try_fetch(&config.url, config.timeout()).await {
        Ok(decoration) => {
            tracing::debug!(name = decoration.name, frames = decoration.frames, "Decoration loaded");
            Some(decoration)
        },
        Err(e) => {
            tracing::debug!(error = ?e, "Decoration unavailable");
            None
        },
    }
}

async fn try_fetch(url: &str, timeout: Duration) -> Result<Decoration> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .or_raise(|| ErrorKind::Decoration("could not build HTTP client".to_string()))?;
    let response = client.get(url).send().await.or_raise(|| ErrorKind::Decoration("request failed".to_string()))?;
    if response.status() != StatusCode::OK {
        exn::bail!(ErrorKind::Decoration(format!("unexpected status {}", response.status())));
    }
    let header: LottieHeader =
        response.json().await.or_raise(|| ErrorKind::Decoration("not a Lottie document".to_string()))?;
    Ok(header.into())
}
