//! Detection records and ingestion payload coercion.
//!
//! Camera devices post loosely-typed JSON. [`DetectionPayload`] keeps every
//! field as an optional raw value so presence and type can be checked
//! separately; [`DetectionPayload::into_new_detection`] turns it into a
//! fully-typed [`NewDetection`] or a [`CoreError::Validation`] carrying one
//! of two generic client messages.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Client-facing messages
// ---------------------------------------------------------------------------

/// Returned when any required field is absent, null or an empty string.
pub const MSG_MISSING_FIELDS: &str = "Missing required fields";

/// Returned when a field is present but cannot be coerced to its type.
pub const MSG_INVALID_PAYLOAD: &str = "Invalid detection payload";

/// Lower bound applied to incoming confidence values.
pub const MIN_CONFIDENCE: f64 = 0.0;

/// Upper bound applied to incoming confidence values.
pub const MAX_CONFIDENCE: f64 = 1.0;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A persisted detection. Immutable once stored; only deletion is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub id: DbId,
    pub camera_id: String,
    pub video_id: String,
    pub item: String,
    pub confidence: f64,
    pub timestamp: Timestamp,
    /// Offset into the video clip, in whole seconds.
    pub timestamp_sec: i32,
    pub created_at: Timestamp,
}

/// A coerced, validated detection ready for insertion.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewDetection {
    #[validate(length(min = 1))]
    pub camera_id: String,
    #[validate(length(min = 1))]
    pub video_id: String,
    #[validate(length(min = 1))]
    pub item: String,
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence: f64,
    pub timestamp: Timestamp,
    #[validate(range(min = 0))]
    pub timestamp_sec: i32,
    /// Stamped by the server, never taken from the client.
    pub created_at: Timestamp,
}

impl NewDetection {
    /// Attach a store-assigned identifier.
    pub fn into_detection(self, id: DbId) -> Detection {
        Detection {
            id,
            camera_id: self.camera_id,
            video_id: self.video_id,
            item: self.item,
            confidence: self.confidence,
            timestamp: self.timestamp,
            timestamp_sec: self.timestamp_sec,
            created_at: self.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Ingestion payload
// ---------------------------------------------------------------------------

/// Raw ingestion body. JSON `null` deserializes to `None` and counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionPayload {
    pub camera_id: Option<Value>,
    pub video_id: Option<Value>,
    pub item: Option<Value>,
    pub confidence: Option<Value>,
    pub timestamp: Option<Value>,
    pub timestamp_sec: Option<Value>,
}

impl DetectionPayload {
    /// Check presence of all six fields, coerce them, and stamp `created_at`.
    ///
    /// - Text fields must be non-empty strings.
    /// - `confidence` accepts a number or numeric string and is clamped to
    ///   `[0, 1]`; `0` is valid.
    /// - `timestamp` accepts RFC 3339 text or epoch milliseconds.
    /// - `timestampSec` accepts an integer, a float (truncated) or an integer
    ///   string; `0` is valid, negatives are rejected.
    pub fn into_new_detection(self, now: Timestamp) -> Result<NewDetection, CoreError> {
        let (
            Some(camera_id),
            Some(video_id),
            Some(item),
            Some(confidence),
            Some(timestamp),
            Some(timestamp_sec),
        ) = (
            self.camera_id,
            self.video_id,
            self.item,
            self.confidence,
            self.timestamp,
            self.timestamp_sec,
        )
        else {
            return Err(missing_fields());
        };

        let detection = NewDetection {
            camera_id: required_text(&camera_id)?,
            video_id: required_text(&video_id)?,
            item: required_text(&item)?,
            confidence: parse_confidence(&confidence)?,
            timestamp: parse_timestamp(&timestamp)?,
            timestamp_sec: parse_timestamp_sec(&timestamp_sec)?,
            created_at: now,
        };

        detection.validate().map_err(|_| invalid_payload())?;
        Ok(detection)
    }
}

fn missing_fields() -> CoreError {
    CoreError::Validation(MSG_MISSING_FIELDS.to_string())
}

fn invalid_payload() -> CoreError {
    CoreError::Validation(MSG_INVALID_PAYLOAD.to_string())
}

fn required_text(value: &Value) -> Result<String, CoreError> {
    match value {
        Value::String(s) if s.trim().is_empty() => Err(missing_fields()),
        Value::String(s) => Ok(s.trim().to_string()),
        _ => Err(invalid_payload()),
    }
}

fn parse_confidence(value: &Value) -> Result<f64, CoreError> {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return Err(missing_fields()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw {
        Some(c) if c.is_finite() => Ok(c.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)),
        _ => Err(invalid_payload()),
    }
}

fn parse_timestamp(value: &Value) -> Result<Timestamp, CoreError> {
    match value {
        Value::String(s) if s.trim().is_empty() => Err(missing_fields()),
        Value::String(s) => parse_timestamp_text(s.trim()).ok_or_else(invalid_payload),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .ok_or_else(invalid_payload)?;
            Utc.timestamp_millis_opt(millis)
                .single()
                .ok_or_else(invalid_payload)
        }
        _ => Err(invalid_payload()),
    }
}

/// RFC 3339 first, then a zone-less ISO 8601 form interpreted as UTC.
fn parse_timestamp_text(text: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_timestamp_sec(value: &Value) -> Result<i32, CoreError> {
    let raw = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) if s.trim().is_empty() => return Err(missing_fields()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    };

    let secs = raw.ok_or_else(invalid_payload)?;
    if secs < 0 {
        return Err(invalid_payload());
    }
    i32::try_from(secs).map_err(|_| invalid_payload())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
