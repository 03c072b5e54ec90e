use winkeep_proto::{SnapshotMode, WindowSnapshot};

use super::super::{apply_delta, HeightDelta};
use super::WindowState;
use crate::effect::Effect;
use crate::error::{Error, Result};

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(Error::RestoreTargetInvalid { field })
}

fn restore_size(snapshot: &WindowSnapshot) -> Result<Effect> {
    let width = required(snapshot.width, "width")?;
    let height = required(snapshot.height, "height")?;
    let height = match snapshot.delta_height {
        Some(delta) => apply_delta(height, delta),
        None => height,
    };
    Ok(Effect::SetSize { width, height })
}

fn restore_position(snapshot: &WindowSnapshot) -> Result<Effect> {
    let x = required(snapshot.x, "x")?;
    let y = required(snapshot.y, "y")?;
    Ok(Effect::SetPosition { x, y })
}

/// Commands that put the window back at the snapshot's normal geometry.
/// Size is issued before position.
pub(super) fn restore(state: &mut WindowState, into: SnapshotMode) -> Vec<Effect> {
    let mut effects = Vec::new();

    if let Some(delta) = state.snapshot.delta_height {
        state.height_delta = HeightDelta::Learned(delta);
    }

    match restore_size(&state.snapshot) {
        Ok(effect) => effects.push(effect),
        Err(e) => tracing::warn!("Skipping resize on restore: {}", e),
    }
    match restore_position(&state.snapshot) {
        Ok(effect) => effects.push(effect),
        Err(e) => tracing::warn!("Skipping move on restore: {}", e),
    }

    if into == SnapshotMode::Fullscreen {
        effects.push(Effect::EnterFullscreen);
    }

    effects
}
