//! WASM bindings for overlap-engine.
//!
//! Exposes schedule creation, availability submission, common-window search,
//! share tokens and the timezone table to JavaScript via `wasm-bindgen`.
//! Schedules cross the boundary as JSON strings in the same snapshot shape the
//! engine serializes, so the browser can keep them in local storage or a URL
//! fragment as-is.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p overlap-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/overlap-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/overlap_wasm.wasm
//! ```

use overlap_engine::normalize::parse_date;
use overlap_engine::report::{format_windows, summarize};
use overlap_engine::{snapshot, zones};
use overlap_engine::{Interval, Schedule, SchedulerConfig, Submission};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct WindowDto {
    start: String,
    end: String,
    duration_minutes: i64,
    /// `HH:MM-HH:MM` in UTC
    label: String,
}

impl From<&Interval> for WindowDto {
    fn from(iv: &Interval) -> Self {
        Self {
            start: iv.start.to_rfc3339(),
            end: iv.end.to_rfc3339(),
            duration_minutes: iv.duration_minutes(),
            label: iv.to_string(),
        }
    }
}

#[derive(Serialize)]
struct CommonDto {
    windows: Vec<WindowDto>,
    /// e.g. `"13:00-16:00 UTC"`, absent when there is no common time
    summary: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers: plain-Rust cores of the exports, errors as strings
// ---------------------------------------------------------------------------

fn parse_schedule(json: &str) -> Result<Schedule, String> {
    snapshot::deserialize(json.as_bytes()).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn parse_config(config_json: Option<&str>) -> Result<SchedulerConfig, String> {
    match config_json {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(raw).map_err(|e| format!("Invalid config JSON: {}", e))
        }
        _ => Ok(SchedulerConfig::default()),
    }
}

fn submit(
    schedule_json: &str,
    submission: &Submission,
    config_json: Option<&str>,
) -> Result<String, String> {
    let schedule = parse_schedule(schedule_json)?;
    let config = parse_config(config_json)?;
    let updated = overlap_engine::submit_availability(&schedule, submission, &config)
        .map_err(|e| e.to_string())?;
    to_json(&updated)
}

fn common(schedule_json: &str, date: &str) -> Result<String, String> {
    let schedule = parse_schedule(schedule_json)?;
    let date = parse_date(date).map_err(|e| e.to_string())?;
    let windows = overlap_engine::find_common_windows(&schedule, date);
    to_json(&CommonDto {
        windows: windows.iter().map(WindowDto::from).collect(),
        summary: (!windows.is_empty()).then(|| format_windows(&windows)),
    })
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Create an empty schedule. A blank name gets a `"Meeting <Mon DD>"` default.
///
/// Returns the schedule snapshot as a JSON string.
#[wasm_bindgen(js_name = "createSchedule")]
pub fn create_schedule(name: &str) -> Result<String, JsValue> {
    to_json(&overlap_engine::create_schedule(name)).map_err(js_err)
}

/// Submit one availability range and return the updated schedule JSON.
///
/// # Arguments
/// - `schedule_json` -- current schedule snapshot
/// - `user` -- participant name (exact-match identity, trimmed)
/// - `timezone` -- IANA timezone of `start`/`end`
/// - `date` -- `YYYY-MM-DD`
/// - `start`, `end` -- local `HH:MM`
/// - `config_json` -- optional `{"dst_policy": "...", "submission_policy": "..."}`
#[wasm_bindgen(js_name = "submitAvailability")]
pub fn submit_availability(
    schedule_json: &str,
    user: &str,
    timezone: &str,
    date: &str,
    start: &str,
    end: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let submission = Submission::new(user, timezone, date, start, end);
    submit(schedule_json, &submission, config_json.as_deref()).map_err(js_err)
}

/// Common windows for `date` as `{windows: [{start, end, duration_minutes, label}], summary}`.
#[wasm_bindgen(js_name = "findCommonWindows")]
pub fn find_common_windows(schedule_json: &str, date: &str) -> Result<String, JsValue> {
    common(schedule_json, date).map_err(js_err)
}

/// Per-date summaries (participants, declared ranges, common windows) as JSON.
#[wasm_bindgen(js_name = "summarizeSchedule")]
pub fn summarize_schedule(schedule_json: &str) -> Result<String, JsValue> {
    parse_schedule(schedule_json)
        .and_then(|s| to_json(&summarize(&s)))
        .map_err(js_err)
}

/// Rename a schedule; a blank name keeps the current one.
#[wasm_bindgen(js_name = "renameSchedule")]
pub fn rename_schedule(schedule_json: &str, name: &str) -> Result<String, JsValue> {
    parse_schedule(schedule_json)
        .and_then(|s| to_json(&overlap_engine::rename_schedule(&s, name)))
        .map_err(js_err)
}

/// URL-safe share token for a schedule snapshot.
#[wasm_bindgen(js_name = "encodeShareToken")]
pub fn encode_share_token(schedule_json: &str) -> Result<String, JsValue> {
    parse_schedule(schedule_json)
        .and_then(|s| snapshot::encode_share_token(&s).map_err(|e| e.to_string()))
        .map_err(js_err)
}

/// Decode a share token (URL-safe or standard base64) back to schedule JSON.
#[wasm_bindgen(js_name = "decodeShareToken")]
pub fn decode_share_token(token: &str) -> Result<String, JsValue> {
    snapshot::decode_share_token(token)
        .map_err(|e| e.to_string())
        .and_then(|s| to_json(&s))
        .map_err(js_err)
}

/// JSON array of IANA timezone names matching `query` (all when empty).
#[wasm_bindgen(js_name = "listZones")]
pub fn list_zones(query: Option<String>) -> Result<String, JsValue> {
    to_json(&zones::search_zones(query.as_deref().unwrap_or(""))).map_err(js_err)
}
