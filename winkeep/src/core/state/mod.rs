use winkeep_proto::{SnapshotMode, WindowSnapshot};

use super::{Frame, HeightDelta, WindowMode};
use crate::effect::Effect;
use crate::event::Event;

mod capture;
mod restore;
mod transition;

use capture::*;
use restore::*;
use transition::*;

/// Everything the reconciler knows about the tracked window: the
/// last-known-good snapshot plus the live session fields.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    pub snapshot: WindowSnapshot,
    pub mode: WindowMode,
    pub height_delta: HeightDelta,
    /// Set by a maximize; the next settled resize belongs to that maximize
    pub pending_maximize_ack: bool,
}

impl WindowState {
    /// State for a window with no saved record, seeded from its current frame.
    pub fn first_run(live: Frame) -> Self {
        let mut state = Self {
            snapshot: WindowSnapshot::default(),
            mode: WindowMode::Normal,
            height_delta: HeightDelta::Learned(0),
            pending_maximize_ack: false,
        };
        state.capture(live);
        state
    }

    pub fn from_snapshot(snapshot: WindowSnapshot) -> Self {
        let height_delta = snapshot
            .delta_height
            .map(HeightDelta::Learned)
            .unwrap_or_default();
        Self {
            mode: snapshot.mode.into(),
            snapshot,
            height_delta,
            pending_maximize_ack: false,
        }
    }

    /// Build the session state and the commands that take a hidden, freshly
    /// opened window to the saved geometry. Always ends with `Show`.
    pub fn init(persisted: Option<WindowSnapshot>, live: Frame) -> (Self, Vec<Effect>) {
        let Some(snapshot) = persisted else {
            tracing::info!("No saved window state, starting from {:?}", live);
            return (Self::first_run(live), vec![Effect::Show]);
        };

        let mut state = Self::from_snapshot(snapshot);
        let mut effects = match state.snapshot.mode {
            SnapshotMode::Maximized => vec![Effect::Maximize],
            mode => state.restore(mode),
        };
        effects.push(Effect::Show);
        (state, effects)
    }

    // Snapshot operations - delegated to state/capture.rs and state/restore.rs

    pub fn capture(&mut self, live: Frame) {
        capture(self, live)
    }

    pub fn restore(&mut self, into: SnapshotMode) -> Vec<Effect> {
        restore(self, into)
    }

    // Event handling - delegated to state/transition.rs

    pub fn handle_event(&mut self, event: &Event, live: Frame) -> Vec<Effect> {
        handle_event(self, event, live)
    }
}
