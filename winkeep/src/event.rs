/// Notifications from the window, plus the settled resize produced by the
/// debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Maximized,
    Unmaximized,
    Minimized,
    RestoredFromMinimized,
    EnteredFullscreen,
    LeftFullscreen,
    Resized,
    ResizeSettled,
}
