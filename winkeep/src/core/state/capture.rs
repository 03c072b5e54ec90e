use super::super::{Frame, WindowMode};
use super::WindowState;

/// Write the live state into the snapshot.
///
/// Geometry is only taken while the window is in normal mode, so the
/// snapshot keeps the bounds to restore to while maximized, fullscreen or
/// minimized.
pub(super) fn capture(state: &mut WindowState, live: Frame) {
    let snapshot = &mut state.snapshot;
    snapshot.mode = state.mode.snapshot_mode();

    if state.mode == WindowMode::Normal {
        snapshot.x = Some(live.x);
        snapshot.y = Some(live.y);
        snapshot.width = Some(live.width);
        snapshot.height = Some(live.height);
    }

    // A delta learned while maximized or fullscreen waits for normal mode
    if !state.mode.is_maximized_or_fullscreen() {
        snapshot.delta_height = state.height_delta.persisted();
    }
}
