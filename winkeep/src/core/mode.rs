use std::fmt;

use winkeep_proto::SnapshotMode;

/// Live display mode of the tracked window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowMode {
    #[default]
    Normal,
    Maximized,
    Fullscreen,
    Minimized,
}

impl WindowMode {
    /// Mode written to the persisted record; minimized collapses to normal.
    pub fn snapshot_mode(self) -> SnapshotMode {
        match self {
            WindowMode::Maximized => SnapshotMode::Maximized,
            WindowMode::Fullscreen => SnapshotMode::Fullscreen,
            WindowMode::Normal | WindowMode::Minimized => SnapshotMode::Normal,
        }
    }

    pub fn is_maximized_or_fullscreen(self) -> bool {
        matches!(self, WindowMode::Maximized | WindowMode::Fullscreen)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WindowMode::Normal => "normal",
            WindowMode::Maximized => "maximized",
            WindowMode::Fullscreen => "fullscreen",
            WindowMode::Minimized => "minimized",
        }
    }
}

impl From<SnapshotMode> for WindowMode {
    fn from(mode: SnapshotMode) -> Self {
        match mode {
            SnapshotMode::Normal => WindowMode::Normal,
            SnapshotMode::Maximized => WindowMode::Maximized,
            SnapshotMode::Fullscreen => WindowMode::Fullscreen,
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimized_is_persisted_as_normal() {
        assert_eq!(WindowMode::Minimized.snapshot_mode(), SnapshotMode::Normal);
        assert_eq!(WindowMode::Normal.snapshot_mode(), SnapshotMode::Normal);
        assert_eq!(WindowMode::Maximized.snapshot_mode(), SnapshotMode::Maximized);
        assert_eq!(WindowMode::Fullscreen.snapshot_mode(), SnapshotMode::Fullscreen);
    }

    #[test]
    fn test_from_snapshot_mode() {
        assert_eq!(WindowMode::from(SnapshotMode::Fullscreen), WindowMode::Fullscreen);
        assert!(WindowMode::from(SnapshotMode::Maximized).is_maximized_or_fullscreen());
        assert!(!WindowMode::Minimized.is_maximized_or_fullscreen());
    }
}
