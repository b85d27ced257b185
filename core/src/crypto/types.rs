//! crypto/types.rs
//! Uniform result shape produced by every computation unit.

use serde::{Deserialize, Serialize};

/// Display color attached to a breakdown segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentColor {
    Cyan,
    Purple,
    Yellow,
    Green,
    Gray,
}

/// One labelled piece of an output, in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashComponent {
    pub label: String,
    pub value: String,
    pub description: String,
    pub color: SegmentColor,
}

impl HashComponent {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
        color: SegmentColor,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: description.into(),
            color,
        }
    }
}

/// Result of one computation.
///
/// `time_ms` covers the compute window of this call only and is never negative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashResult {
    pub hash: String,
    pub time_ms: f64,
    pub breakdown: Vec<HashComponent>,
}

impl HashResult {
    pub fn segment(&self, label: &str) -> Option<&HashComponent> {
        self.breakdown.iter().find(|c| c.label == label)
    }
}
