//! Versioned JSON layout documents.
//!
//! A layout document carries the geometry/appearance part of the quilt
//! configuration, the full paint layer, and the fabric repeat size. UI state
//! (zoom, active color, saved colors, the fabric image itself) is never
//! persisted.
//!
//! ```json
//! {
//!   "version": 1,
//!   "exportedAt": "2025-01-01T00:00:00.000Z",
//!   "quilt": { "rows": 3, "cols": 3, "blockWidth": 15, ... },
//!   "paintLayer": [["", "__fabric__", "#ff0000"], ...],
//!   "fabricRepeatInches": 6
//! }
//! ```

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::LAYOUT_VERSION;
use crate::models::{GridDimensions, PaintLayer, QuiltConfig};

/// Errors produced while reading a layout document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Well-formed document with a version this build does not understand
    VersionMismatch {
        /// The version value found in the document (JSON text, or "missing")
        found: String,
    },
    /// Input is not JSON, or not shaped like a layout document
    Parse(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VersionMismatch { found } => {
                write!(f, "Unknown layout version: {found} (expected {LAYOUT_VERSION})")
            }
            Self::Parse(msg) => write!(f, "Invalid JSON file: {msg}"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Persisted layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedLayout {
    /// Document format version, always [`LAYOUT_VERSION`] when written
    pub version: u32,
    /// ISO-8601 export timestamp
    pub exported_at: String,
    /// Quilt geometry and region colors
    pub quilt: QuiltConfig,
    /// Paint overlay, one row per grid inch
    pub paint_layer: PaintLayer,
    /// Fabric tile size (inches)
    pub fabric_repeat_inches: f64,
}

impl PersistedLayout {
    /// Builds a document stamped with the current time.
    #[must_use]
    pub fn new(quilt: QuiltConfig, paint_layer: PaintLayer, fabric_repeat_inches: f64) -> Self {
        Self {
            version: LAYOUT_VERSION,
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            quilt,
            paint_layer,
            fabric_repeat_inches,
        }
    }
}

/// Serializes a layout as pretty-printed JSON (two-space indent).
///
/// # Errors
///
/// Returns an error only if serialization itself fails, which cannot happen
/// for well-formed values.
pub fn serialize(layout: &PersistedLayout) -> Result<String, LayoutError> {
    serde_json::to_string_pretty(layout).map_err(|e| LayoutError::Parse(e.to_string()))
}

/// Parses a layout document and checks its version.
///
/// The version is checked before the rest of the document, so a future
/// document with a different shape still reports a version mismatch rather
/// than a parse error.
///
/// # Errors
///
/// - [`LayoutError::Parse`] if the input is not JSON, not an object, does
///   not have the layout document shape, or describes a quilt larger than
///   [`MAX_GRID_CELLS`](crate::constants::MAX_GRID_CELLS) on a side
/// - [`LayoutError::VersionMismatch`] if `version` is missing or not 1
///   (`1.0` counts as 1)
pub fn deserialize(input: &str) -> Result<PersistedLayout, LayoutError> {
    let mut value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| LayoutError::Parse(e.to_string()))?;

    let Some(object) = value.as_object_mut() else {
        return Err(LayoutError::Parse(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    match object.get("version") {
        Some(v) if v.as_f64() == Some(f64::from(LAYOUT_VERSION)) => {}
        Some(v) => {
            return Err(LayoutError::VersionMismatch {
                found: v.to_string(),
            })
        }
        None => {
            return Err(LayoutError::VersionMismatch {
                found: "missing".to_string(),
            })
        }
    }
    object.insert("version".to_string(), LAYOUT_VERSION.into());

    let layout: PersistedLayout =
        serde_json::from_value(value).map_err(|e| LayoutError::Parse(e.to_string()))?;
    GridDimensions::compute(&layout.quilt.sanitized())
        .ensure_fits()
        .map_err(|e| LayoutError::Parse(e.to_string()))?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FABRIC_MARKER;

    fn sample() -> PersistedLayout {
        let mut paint = PaintLayer::new(2, 3);
        paint.paint_cell(0, 1, "#ff0000");
        paint.paint_cell(1, 2, FABRIC_MARKER);
        PersistedLayout::new(QuiltConfig::default(), paint, 6.0)
    }

    #[test]
    fn test_round_trip() {
        let layout = sample();
        let text = serialize(&layout).unwrap();
        let back = deserialize(&text).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn test_document_shape() {
        let text = serialize(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], 1);
        assert!(value["exportedAt"].as_str().unwrap().ends_with('Z'));
        assert_eq!(value["quilt"]["rows"], 3);
        assert_eq!(value["quilt"]["sashingColor"], "#bfbfbf");
        assert_eq!(value["paintLayer"][1][2], FABRIC_MARKER);
        assert_eq!(value["fabricRepeatInches"], 6.0);
        assert!(text.contains("\n  \"version\": 1"));
    }

    #[test]
    fn test_version_mismatch() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["version"] = serde_json::json!(2);
        let err = deserialize(&value.to_string()).unwrap_err();
        assert_eq!(
            err,
            LayoutError::VersionMismatch {
                found: "2".to_string()
            }
        );
        assert!(err.to_string().starts_with("Unknown layout version"));
    }

    #[test]
    fn test_version_checked_before_shape() {
        let err = deserialize(r#"{"version": "1", "something": "else"}"#).unwrap_err();
        assert!(matches!(err, LayoutError::VersionMismatch { .. }));

        let err = deserialize(r#"{"quilt": {}}"#).unwrap_err();
        assert_eq!(
            err,
            LayoutError::VersionMismatch {
                found: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(deserialize("not json"), Err(LayoutError::Parse(_))));
        assert!(matches!(deserialize("[1, 2]"), Err(LayoutError::Parse(_))));
        assert!(matches!(
            deserialize(r#"{"version": 1, "quilt": 5}"#),
            Err(LayoutError::Parse(_))
        ));
        let err = deserialize("{").unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON file"));
    }

    #[test]
    fn test_accepts_integer_lengths() {
        let text = r##"{
            "version": 1,
            "exportedAt": "2024-05-01T12:00:00.000Z",
            "quilt": {
                "rows": 2, "cols": 2, "blockWidth": 4, "blockHeight": 4,
                "sashingEnabled": true, "sashingWidth": 1, "sashingColor": "#bfbfbf",
                "sashingBorderEnabled": false, "sashingBorderWidth": 0, "sashingBorderColor": "#666666",
                "borderWidth": 0, "borderColor": "#8c8c8c"
            },
            "paintLayer": [["#ff0000", ""]],
            "fabricRepeatInches": 6
        }"##;
        let layout = deserialize(text).unwrap();
        assert_eq!(layout.quilt.block_width, 4.0);
        assert_eq!(layout.paint_layer.get(0, 0), Some("#ff0000"));
        assert_eq!(layout.fabric_repeat_inches, 6.0);
    }

    #[test]
    fn test_float_version_is_accepted() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["version"] = serde_json::json!(1.0);
        let layout = deserialize(&value.to_string()).unwrap();
        assert_eq!(layout.version, LAYOUT_VERSION);

        value["version"] = serde_json::json!(1.5);
        assert!(matches!(
            deserialize(&value.to_string()),
            Err(LayoutError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_oversized_quilt_is_rejected() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["quilt"]["blockWidth"] = serde_json::json!(1e300);
        let err = deserialize(&value.to_string()).unwrap_err();
        assert!(matches!(err, LayoutError::Parse(_)));
        assert!(err.to_string().contains("largest supported grid"));
    }
}
