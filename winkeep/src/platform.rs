use crate::core::Frame;

/// Trait for querying the tracked window's geometry.
/// This abstraction allows mocking in tests.
pub trait WindowSystem {
    fn position(&self) -> (i32, i32);
    /// Size as the window system reports it, which may include a frame.
    fn size(&self) -> (u32, u32);

    fn frame(&self) -> Frame {
        Frame::from_parts(self.position(), self.size())
    }
}

/// Trait for manipulating the tracked window (side effects).
/// Commands are fire-and-forget; results arrive later as notifications.
/// This abstraction allows mocking in tests.
pub trait WindowManipulator {
    fn set_size(&self, width: u32, height: u32);
    fn set_position(&self, x: i32, y: i32);
    fn maximize(&self);
    fn enter_fullscreen(&self);
    fn show(&self);
}

#[cfg(test)]
pub mod mock {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::effect::Effect;

    /// Window that records every command and applies size/position to
    /// its own geometry. `frame_height` is added to the reported height,
    /// like a platform that reports outer size but resizes the content.
    #[derive(Default)]
    pub struct MockWindow {
        pub frame: Cell<Frame>,
        pub frame_height: u32,
        pub commands: RefCell<Vec<Effect>>,
        pub visible: Cell<bool>,
    }

    impl MockWindow {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_frame(self, x: i32, y: i32, width: u32, height: u32) -> Self {
            self.frame.set(Frame::new(x, y, width, height));
            self
        }

        pub fn with_frame_height(mut self, frame_height: u32) -> Self {
            self.frame_height = frame_height;
            self
        }

        /// Move or resize the window behind the reconciler's back.
        pub fn set_live(&self, x: i32, y: i32, width: u32, height: u32) {
            self.frame.set(Frame::new(x, y, width, height));
        }

        pub fn take_commands(&self) -> Vec<Effect> {
            std::mem::take(&mut *self.commands.borrow_mut())
        }
    }

    impl WindowSystem for MockWindow {
        fn position(&self) -> (i32, i32) {
            self.frame.get().position()
        }

        fn size(&self) -> (u32, u32) {
            let frame = self.frame.get();
            (frame.width, frame.height + self.frame_height)
        }
    }

    impl WindowManipulator for MockWindow {
        fn set_size(&self, width: u32, height: u32) {
            let mut frame = self.frame.get();
            frame.width = width;
            frame.height = height;
            self.frame.set(frame);
            self.commands
                .borrow_mut()
                .push(Effect::SetSize { width, height });
        }

        fn set_position(&self, x: i32, y: i32) {
            let mut frame = self.frame.get();
            frame.x = x;
            frame.y = y;
            self.frame.set(frame);
            self.commands.borrow_mut().push(Effect::SetPosition { x, y });
        }

        fn maximize(&self) {
            self.commands.borrow_mut().push(Effect::Maximize);
        }

        fn enter_fullscreen(&self) {
            self.commands.borrow_mut().push(Effect::EnterFullscreen);
        }

        fn show(&self) {
            self.visible.set(true);
            self.commands.borrow_mut().push(Effect::Show);
        }
    }

    #[test]
    fn test_mock_reports_frame_height() {
        let window = MockWindow::new()
            .with_frame(1, 2, 800, 600)
            .with_frame_height(20);
        assert_eq!(window.frame(), Frame::new(1, 2, 800, 620));

        window.set_size(800, 600);
        assert_eq!(window.size(), (800, 620));
        assert_eq!(window.take_commands().len(), 1);
        assert!(window.take_commands().is_empty());
    }
}
