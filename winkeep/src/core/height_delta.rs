/// Difference between the height a window reports and the height that has
/// to be requested to get that same window back.
///
/// `Unknown` means nothing has been learned yet, which is not the same as
/// `Learned(0)` (learned, no correction needed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeightDelta {
    #[default]
    Unknown,
    Learned(i32),
}

impl HeightDelta {
    pub fn is_learned(self) -> bool {
        matches!(self, HeightDelta::Learned(_))
    }

    /// Value to write into the persisted record. Zero is never stored.
    pub fn persisted(self) -> Option<i32> {
        match self {
            HeightDelta::Learned(delta) if delta != 0 => Some(delta),
            _ => None,
        }
    }
}

/// Subtract `delta` from `height`, saturating into the `u32` range.
pub fn apply_delta(height: u32, delta: i32) -> u32 {
    (i64::from(height) - i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32
}

/// Delta between a reported and a saved height, saturating into `i32`.
pub fn measure_delta(reported: u32, saved: u32) -> i32 {
    (i64::from(reported) - i64::from(saved)).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
