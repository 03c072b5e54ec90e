/// Commands issued back to the window. All of them are fire-and-forget;
/// their outcome shows up later as notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetSize { width: u32, height: u32 },
    SetPosition { x: i32, y: i32 },
    Maximize,
    EnterFullscreen,
    Show,
}
