use serde::{Deserialize, Serialize};

use crate::WindowSnapshot;

/// Reply to a `status` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    /// Live mode: normal, maximized, fullscreen or minimized
    pub mode: String,
    /// `None` until the height delta has been learned
    pub height_delta: Option<i32>,
    pub resize_pending: bool,
    pub visible: bool,
    pub snapshot: WindowSnapshot,
}
