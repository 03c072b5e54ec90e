use serde::{Deserialize, Serialize};

/// One line of a driver script, describing what the user (or the window
/// manager) does to the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    // User geometry changes
    Resize {
        width: u32,
        height: u32,
        /// Number of intermediate resize notifications (drag granularity)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        steps: Option<u32>,
    },
    Move {
        x: i32,
        y: i32,
    },

    // Mode changes
    Maximize,
    Unmaximize,
    Minimize,
    Restore,
    EnterFullscreen,
    LeaveFullscreen,

    // Session control
    /// Stop reading actions for a while so pending resizes can settle
    Wait {
        ms: u64,
    },
    Save,
    Status,
    Quit,
}

impl Action {
    /// Number of resize notifications a user resize produces
    pub fn resize_steps(&self) -> u32 {
        match self {
            Action::Resize { steps, .. } => steps.unwrap_or(1).max(1),
            _ => 0,
        }
    }
}
