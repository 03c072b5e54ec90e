use tokio::time::Instant;

use crate::core::{Config, WindowState};
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::event::Event;
use crate::persistence::{decode_snapshot, encode_snapshot, SnapshotStore};
use crate::platform::{WindowManipulator, WindowSystem};

use super::effects::execute_effects;

/// Keeps the tracked window and its persisted record in sync.
///
/// Owns the session state exclusively; all calls are expected on one
/// thread, one at a time.
pub struct Reconciler<W, S> {
    state: WindowState,
    window: W,
    store: S,
    debouncer: Debouncer,
    autosave: bool,
}

impl<W, S> Reconciler<W, S>
where
    W: WindowSystem + WindowManipulator,
    S: SnapshotStore,
{
    /// Create a reconciler. Nothing is loaded or issued until [`init`](Self::init).
    pub fn new(window: W, store: S, config: &Config) -> Self {
        let state = WindowState::first_run(window.frame());
        Self {
            state,
            window,
            store,
            debouncer: Debouncer::new(config.debounce),
            autosave: config.autosave,
        }
    }

    /// Load the saved record and bring the window to it, then show it.
    ///
    /// A malformed record is treated as a first run. If the store itself
    /// fails the session still starts as a first run and the error is
    /// returned afterwards.
    pub fn init(&mut self) -> Result<()> {
        let (persisted, load_error) = match self.store.load() {
            Ok(Some(blob)) => match decode_snapshot(&blob) {
                Ok(snapshot) => (Some(snapshot), None),
                Err(e) => {
                    tracing::warn!("{}; starting with default geometry", e);
                    (None, None)
                }
            },
            Ok(None) => (None, None),
            Err(e) => {
                tracing::warn!("{}; starting with default geometry", e);
                (None, Some(e))
            }
        };

        if let Some(snapshot) = &persisted {
            tracing::info!("Restoring window state {:?}", snapshot);
        }
        let (state, effects) = WindowState::init(persisted, self.window.frame());
        self.state = state;
        execute_effects(effects, &self.window);

        match load_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        self.handle_event_at(event, Instant::now());
    }

    pub fn handle_event_at(&mut self, event: Event, now: Instant) {
        tracing::debug!("Window event: {:?}", event);
        match event {
            Event::Resized => self.debouncer.trigger_at(now),
            Event::ResizeSettled => {
                self.debouncer.cancel();
                self.settle_resize();
            }
            _ => {
                let effects = self.state.handle_event(&event, self.window.frame());
                execute_effects(effects, &self.window);
            }
        }
    }

    /// Deadline of the pending settled resize, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn resize_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Run the settled resize if its quiet period is over.
    pub fn poll_settled(&mut self, now: Instant) -> bool {
        if !self.debouncer.fire_if_due(now) {
            return false;
        }
        self.settle_resize();
        true
    }

    fn settle_resize(&mut self) {
        let effects = self
            .state
            .handle_event(&Event::ResizeSettled, self.window.frame());
        execute_effects(effects, &self.window);

        if self.autosave {
            if let Err(e) = self.save() {
                tracing::warn!("Autosave failed: {}", e);
            }
        }
    }

    /// Capture the live window and overwrite the persisted record.
    pub fn save(&mut self) -> Result<()> {
        self.state.capture(self.window.frame());
        let blob = encode_snapshot(&self.state.snapshot)?;
        self.store.save(&blob)?;
        tracing::info!("Saved window state {}", blob);
        Ok(())
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
