//! Record normalizer: loosely-typed export records into canonical moments.
//!
//! The extraction pipeline hands over JSON records of collaborator-defined
//! shape. This is the only place loosely-typed data exists; every field is
//! extracted leniently and defaulted, so a record is dropped only when it is
//! not an object at all, and even then the rest of the batch proceeds.

use crate::types::{Interaction, MediaItem, Moment, MomentContent, MomentStats};
use chrono::{LocalResult, TimeZone, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Errors from parsing the extraction pipeline's payload. The only fallible
/// entry path into the core; normalization itself never fails.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("extraction pipeline reported an error: {0}")]
    Pipeline(String),
    #[error("export payload carries no feed list")]
    MissingFeeds,
}

/// Parse the pipeline's JSON payload into raw feed records.
///
/// Accepts either a bare array of records or the envelope
/// `{"status": ..., "message": ..., "feeds": [...]}` emitted by the
/// extraction bridge. An `"error"` status surfaces the pipeline's message.
pub fn parse_export(payload: &str) -> Result<Vec<Value>, ExportError> {
    let value: Value = serde_json::from_str(payload)?;
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => {
            let status = map
                .get("status")
                .and_then(|v| v.as_str())
                .unwrap_or("success");
            if status == "error" {
                let message = map
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown error")
                    .to_string();
                return Err(ExportError::Pipeline(message));
            }
            match map.remove("feeds") {
                Some(Value::Array(records)) => Ok(records),
                _ => Err(ExportError::MissingFeeds),
            }
        }
        _ => Err(ExportError::MissingFeeds),
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Identifiers arrive as strings or integers depending on the export path.
fn id_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Timestamps arrive numeric on moments but sometimes as digit strings on
/// interactions; anything else becomes 0.
fn time_field(value: &Value, key: &str) -> i64 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Derive a display date from a unix timestamp. Fixed UTC format so output
/// is chronologically sortable and locale-independent.
fn derive_display_date(timestamp: i64) -> String {
    match Utc.timestamp_opt(timestamp, 0) {
        LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => String::new(),
    }
}

fn normalize_interaction(raw: &Value) -> Interaction {
    Interaction {
        handle: str_field(raw, "user"),
        snapshot_name: str_field(raw, "name"),
        timestamp: time_field(raw, "time"),
        text: str_field(raw, "content"),
        reply_to: str_field(raw, "reply_to"),
    }
}

fn normalize_content(raw: &Value) -> MomentContent {
    let text = str_field(raw, "text");
    let media = raw
        .get("media")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|m| {
                    let src = str_field(m, "src");
                    if src.is_empty() {
                        return None;
                    }
                    let kind = str_field(m, "type");
                    Some(MediaItem {
                        kind: if kind.is_empty() { "image".to_string() } else { kind },
                        src,
                        thumb: str_field(m, "thumb"),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    MomentContent { text, media }
}

fn normalize_interactions(raw: &Value, key: &str) -> Vec<Interaction> {
    raw.pointer(&format!("/interactions/{key}"))
        .and_then(|v| v.as_array())
        .map(|items| items.iter().map(normalize_interaction).collect())
        .unwrap_or_default()
}

/// Normalize one raw record. Returns `None` only for inputs that are not
/// objects at all; a record missing `id` or `author` is still converted so
/// downstream counts stay truthful.
pub fn normalize_record(raw: &Value) -> Option<Moment> {
    if !raw.is_object() {
        return None;
    }

    let timestamp = time_field(raw, "timestamp");
    let supplied_date = str_field(raw, "date");
    let display_date = if supplied_date.is_empty() {
        derive_display_date(timestamp)
    } else {
        supplied_date
    };

    let stats = raw
        .get("stats")
        .map(|s| MomentStats {
            like_count: time_field(s, "likes_count").max(0) as u32,
            comment_count: time_field(s, "comments_count").max(0) as u32,
        })
        .unwrap_or_default();

    Some(Moment {
        id: id_field(raw, "id"),
        author_handle: str_field(raw, "author"),
        timestamp,
        display_date,
        content: raw.get("content").map(normalize_content).unwrap_or_default(),
        stats,
        likes: normalize_interactions(raw, "likes"),
        comments: normalize_interactions(raw, "comments"),
    })
}

/// Normalize a whole batch, preserving input order. Unreadable entries are
/// skipped with a warning; they never abort the rest of the batch.
pub fn normalize_batch(raw: &[Value]) -> Vec<Moment> {
    let mut moments = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;
    for record in raw {
        match normalize_record(record) {
            Some(moment) => moments.push(moment),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("Skipped {skipped} unreadable feed records");
    }
    moments
}
