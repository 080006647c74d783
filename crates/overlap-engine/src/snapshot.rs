//! Schedule transport: JSON snapshots, share tokens, and share links.
//!
//! A share token is the JSON snapshot in URL-safe base64 without padding. Tokens
//! in standard padded base64 (what a browser's `btoa` produces) decode too, so
//! links made by the web tool and by this crate are interchangeable.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use tracing::warn;

use crate::error::{OverlapError, Result};
use crate::schedule::Schedule;

const DATA_FRAGMENT: &str = "#data=";

/// Serialize a schedule into a self-describing JSON snapshot.
pub fn serialize(schedule: &Schedule) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(schedule)?)
}

/// Rebuild a schedule from a snapshot made by [`serialize`].
///
/// # Errors
/// Returns `OverlapError::Snapshot` for malformed JSON, unknown timezones, or
/// badly formatted dates and times.
pub fn deserialize(bytes: &[u8]) -> Result<Schedule> {
    serde_json::from_slice(bytes).map_err(|e| {
        warn!(error = %e, "rejected schedule snapshot");
        OverlapError::Snapshot(e)
    })
}

pub fn encode_share_token(schedule: &Schedule) -> Result<String> {
    Ok(URL_SAFE_NO_PAD.encode(serialize(schedule)?))
}

pub fn decode_share_token(token: &str) -> Result<Schedule> {
    let token = token.trim();
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .or_else(|_| STANDARD.decode(token))
        .map_err(|e| OverlapError::ShareToken(format!("base64 decode failed: {}", e)))?;
    deserialize(&bytes)
}

/// Build `<base_url>?schedule=<id>#data=<token>`.
pub fn share_link(base_url: &str, schedule: &Schedule) -> Result<String> {
    let token = encode_share_token(schedule)?;
    Ok(format!(
        "{}?schedule={}{}{}",
        base_url.trim_end_matches('/'),
        schedule.id,
        DATA_FRAGMENT,
        token
    ))
}

/// Decode the schedule carried in a share link's `#data=` fragment.
///
/// # Errors
/// Returns `OverlapError::ShareToken` if the link has no data fragment.
pub fn parse_share_link(link: &str) -> Result<Schedule> {
    let (_, token) = link
        .split_once(DATA_FRAGMENT)
        .ok_or_else(|| OverlapError::ShareToken("link has no #data= fragment".to_string()))?;
    decode_share_token(token)
}
