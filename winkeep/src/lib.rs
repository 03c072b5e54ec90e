//! Persist and restore the geometry and display mode of a single window.
//!
//! [`core::WindowState`] is a pure state machine turning window
//! notifications into [`effect::Effect`]s. [`app::Reconciler`] wires it to
//! a window, a snapshot store and a resize debouncer.

pub mod app;
pub mod core;
pub mod debounce;
pub mod effect;
pub mod error;
pub mod event;
pub mod headless;
pub mod persistence;
pub mod platform;

pub use crate::app::{App, Reconciler};
pub use crate::core::{Config, Frame, HeightDelta, WindowMode, WindowState};
pub use crate::error::{Error, Result};
pub use crate::persistence::{FileStore, MemoryStore, SnapshotStore};
