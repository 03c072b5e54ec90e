use winkeep_proto::SnapshotMode;

use super::super::{apply_delta, measure_delta, Frame, HeightDelta, WindowMode};
use super::capture::capture;
use super::restore::restore;
use super::WindowState;
use crate::effect::Effect;
use crate::event::Event;

fn set_mode(state: &mut WindowState, mode: WindowMode) {
    if state.mode != mode {
        tracing::debug!("Window mode {} -> {}", state.mode, mode);
    }
    state.mode = mode;
}

pub(super) fn handle_event(state: &mut WindowState, event: &Event, live: Frame) -> Vec<Effect> {
    match event {
        Event::Maximized => {
            set_mode(state, WindowMode::Maximized);
            state.pending_maximize_ack = true;
            Vec::new()
        }
        Event::Unmaximized => {
            // Platforms do not reliably return to the previous bounds
            set_mode(state, WindowMode::Normal);
            restore(state, SnapshotMode::Normal)
        }
        Event::Minimized => {
            set_mode(state, WindowMode::Minimized);
            Vec::new()
        }
        Event::RestoredFromMinimized => {
            set_mode(state, WindowMode::Normal);
            Vec::new()
        }
        Event::EnteredFullscreen => {
            set_mode(state, WindowMode::Fullscreen);
            Vec::new()
        }
        Event::LeftFullscreen => {
            set_mode(state, WindowMode::Normal);
            Vec::new()
        }
        // Raw resizes are collapsed by the debouncer before they get here
        Event::Resized => Vec::new(),
        Event::ResizeSettled => handle_settled_resize(state, live),
    }
}

fn handle_settled_resize(state: &mut WindowState, live: Frame) -> Vec<Effect> {
    if state.pending_maximize_ack {
        // This resize is the maximize itself
        state.pending_maximize_ack = false;
    } else if state.mode == WindowMode::Maximized {
        // A maximized window resized by the user is no longer maximized
        set_mode(state, WindowMode::Normal);
    }

    let effects = learn_height_delta(state, live);
    capture(state, live);
    effects
}

fn learn_height_delta(state: &mut WindowState, live: Frame) -> Vec<Effect> {
    if state.height_delta.is_learned() {
        return Vec::new();
    }
    // Maximized, fullscreen and minimized sizes say nothing about the frame
    if state.mode != WindowMode::Normal {
        tracing::debug!("Window is {}, deferring height delta", state.mode);
        return Vec::new();
    }
    let Some(saved_height) = state.snapshot.height else {
        tracing::debug!("No saved height yet, deferring height delta");
        return Vec::new();
    };

    let delta = measure_delta(live.height, saved_height);
    state.height_delta = HeightDelta::Learned(delta);
    if delta == 0 {
        tracing::debug!("Reported height matches saved height, no delta");
        return Vec::new();
    }

    tracing::info!(
        "Learned height delta {} (reported {}, saved {})",
        delta,
        live.height,
        saved_height
    );
    vec![Effect::SetSize {
        width: state.snapshot.width.unwrap_or(live.width),
        height: apply_delta(live.height, delta),
    }]
}
