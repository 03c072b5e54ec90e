use serde::{Deserialize, Serialize};

/// Window mode as stored in the persisted record.
/// Minimized windows are recorded as `Normal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotMode {
    #[default]
    Normal,
    Maximized,
    Fullscreen,
}

impl SnapshotMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotMode::Normal => "normal",
            SnapshotMode::Maximized => "maximized",
            SnapshotMode::Fullscreen => "fullscreen",
        }
    }
}

impl std::fmt::Display for SnapshotMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted window record.
///
/// `x`, `y`, `width` and `height` always describe the normal (restorable)
/// geometry, even when `mode` is maximized or fullscreen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    pub mode: SnapshotMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Difference between the reported height and the height that has to be
    /// requested to get the same window. Never stored as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_height: Option<i32>,
}

impl WindowSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check if all four normal-geometry fields are present
    pub fn has_geometry(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.width.is_some() && self.height.is_some()
    }
}
