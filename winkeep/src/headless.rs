//! A simulated window for running sessions without a windowing toolkit.
//!
//! It behaves like the toolkits the reconciler has to cope with: the
//! reported height includes a frame that `set_size` does not, commands are
//! answered with notifications, and unmaximizing may land at slightly
//! different coordinates than the window had before.

use std::cell::RefCell;
use std::rc::Rc;

use tokio::sync::mpsc;
use winkeep_proto::Action;

use crate::core::{Frame, WindowMode};
use crate::event::Event;
use crate::platform::{WindowManipulator, WindowSystem};

#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Content geometry the window opens with
    pub initial: Frame,
    pub screen_width: u32,
    pub screen_height: u32,
    /// Extra height included in the reported size but not in `set_size`
    pub frame_height: u32,
    /// Offset applied to the position when the window manager unmaximizes
    pub unmaximize_drift: (i32, i32),
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            initial: Frame::new(100, 100, 800, 600),
            screen_width: 1920,
            screen_height: 1080,
            frame_height: 0,
            unmaximize_drift: (0, 0),
        }
    }
}

struct Inner {
    config: HeadlessConfig,
    content: Frame,
    mode: WindowMode,
    /// Content geometry from before maximize/fullscreen
    saved: Option<Frame>,
    visible: bool,
}

/// Handle to the simulated window. Clones share the same window.
#[derive(Clone)]
pub struct HeadlessWindow {
    inner: Rc<RefCell<Inner>>,
    notifications: mpsc::UnboundedSender<Event>,
}

impl HeadlessWindow {
    pub fn new(config: HeadlessConfig) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let inner = Inner {
            content: config.initial,
            config,
            mode: WindowMode::Normal,
            saved: None,
            visible: false,
        };
        let window = Self {
            inner: Rc::new(RefCell::new(inner)),
            notifications: tx,
        };
        (window, rx)
    }

    pub fn mode(&self) -> WindowMode {
        self.inner.borrow().mode
    }

    pub fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }

    /// Geometry without the simulated frame.
    pub fn content(&self) -> Frame {
        self.inner.borrow().content
    }

    fn notify(&self, event: Event) {
        // The receiver is gone once the session has shut down
        let _ = self.notifications.send(event);
    }

    /// Apply something the user or window manager does to the window.
    /// Session control actions are not window actions and are ignored.
    pub fn apply_action(&self, action: &Action) {
        match action {
            Action::Resize { width, height, .. } => {
                self.user_resize(*width, *height, action.resize_steps())
            }
            Action::Move { x, y } => self.user_move(*x, *y),
            Action::Maximize => self.do_maximize(),
            Action::Unmaximize => self.do_unmaximize(),
            Action::Minimize => self.do_minimize(),
            Action::Restore => self.do_restore(),
            Action::EnterFullscreen => self.do_enter_fullscreen(),
            Action::LeaveFullscreen => self.do_leave_fullscreen(),
            Action::Wait { .. } | Action::Save | Action::Status | Action::Quit => {}
        }
    }

    fn user_resize(&self, width: u32, height: u32, steps: u32) {
        let start = {
            let mut inner = self.inner.borrow_mut();
            match inner.mode {
                WindowMode::Minimized | WindowMode::Fullscreen => {
                    tracing::debug!("Ignoring resize while {}", inner.mode);
                    return;
                }
                // Resizing a maximized window leaves maximized mode without
                // an unmaximize notification
                WindowMode::Maximized => {
                    inner.mode = WindowMode::Normal;
                    inner.saved = None;
                }
                WindowMode::Normal => {}
            }
            inner.content
        };

        for step in 1..=steps {
            let w = interpolate(start.width, width, step, steps);
            let h = interpolate(start.height, height, step, steps);
            {
                let mut inner = self.inner.borrow_mut();
                inner.content.width = w;
                inner.content.height = h;
            }
            self.notify(Event::Resized);
        }
    }

    fn user_move(&self, x: i32, y: i32) {
        let mut inner = self.inner.borrow_mut();
        if inner.mode != WindowMode::Normal {
            tracing::debug!("Ignoring move while {}", inner.mode);
            return;
        }
        inner.content.x = x;
        inner.content.y = y;
    }

    fn do_maximize(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.mode != WindowMode::Normal {
                return;
            }
            inner.saved = Some(inner.content);
            inner.content = screen_content(&inner.config);
            inner.mode = WindowMode::Maximized;
        }
        self.notify(Event::Maximized);
        self.notify(Event::Resized);
    }

    fn do_unmaximize(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.mode != WindowMode::Maximized {
                return;
            }
            let (dx, dy) = inner.config.unmaximize_drift;
            let mut frame = inner.saved.take().unwrap_or(inner.config.initial);
            frame.x += dx;
            frame.y += dy;
            inner.content = frame;
            inner.mode = WindowMode::Normal;
        }
        self.notify(Event::Unmaximized);
        self.notify(Event::Resized);
    }

    fn do_minimize(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.mode == WindowMode::Minimized {
                return;
            }
            inner.mode = WindowMode::Minimized;
        }
        self.notify(Event::Minimized);
    }

    fn do_restore(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.mode != WindowMode::Minimized {
                return;
            }
            inner.mode = WindowMode::Normal;
        }
        self.notify(Event::RestoredFromMinimized);
    }

    fn do_enter_fullscreen(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.mode == WindowMode::Fullscreen {
                return;
            }
            if inner.mode == WindowMode::Normal {
                inner.saved = Some(inner.content);
            }
            inner.content = Frame::new(0, 0, inner.config.screen_width, inner.config.screen_height);
            inner.mode = WindowMode::Fullscreen;
        }
        self.notify(Event::EnteredFullscreen);
        self.notify(Event::Resized);
    }

    fn do_leave_fullscreen(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.mode != WindowMode::Fullscreen {
                return;
            }
            inner.content = inner.saved.take().unwrap_or(inner.config.initial);
            inner.mode = WindowMode::Normal;
        }
        self.notify(Event::LeftFullscreen);
        self.notify(Event::Resized);
    }
}

/// Content frame of a maximized window: the whole screen including frame.
fn screen_content(config: &HeadlessConfig) -> Frame {
    Frame::new(
        0,
        0,
        config.screen_width,
        config.screen_height.saturating_sub(config.frame_height),
    )
}

fn interpolate(from: u32, to: u32, step: u32, steps: u32) -> u32 {
    let from = i64::from(from);
    let to = i64::from(to);
    (from + (to - from) * i64::from(step) / i64::from(steps)) as u32
}

impl WindowSystem for HeadlessWindow {
    fn position(&self) -> (i32, i32) {
        self.inner.borrow().content.position()
    }

    fn size(&self) -> (u32, u32) {
        let inner = self.inner.borrow();
        let reported = match inner.mode {
            WindowMode::Fullscreen => inner.content.height,
            _ => inner.content.height + inner.config.frame_height,
        };
        (inner.content.width, reported)
    }
}

impl WindowManipulator for HeadlessWindow {
    fn set_size(&self, width: u32, height: u32) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let changed = inner.content.size() != (width, height);
            inner.content.width = width;
            inner.content.height = height;
            changed
        };
        if changed {
            self.notify(Event::Resized);
        }
    }

    fn set_position(&self, x: i32, y: i32) {
        let mut inner = self.inner.borrow_mut();
        inner.content.x = x;
        inner.content.y = y;
    }

    fn maximize(&self) {
        self.do_maximize();
    }

    fn enter_fullscreen(&self) {
        self.do_enter_fullscreen();
    }

    fn show(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.visible {
            tracing::info!("Window shown at {:?}", inner.content);
        }
        inner.visible = true;
    }
}
