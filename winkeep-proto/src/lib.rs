pub mod action;
pub mod snapshot;
pub mod status;

pub use action::Action;
pub use snapshot::{SnapshotMode, WindowSnapshot};
pub use status::SessionStatus;
