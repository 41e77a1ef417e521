use std::cell::Cell;
use std::sync::Arc;

use log::{debug, warn};
use winit::window::{CursorGrabMode, Window as WinitWindow};

use crate::traits::{CursorMode, WindowContext};

/// Wrapper around a winit window applying the frame driver's cursor and title requests
pub struct Window {
    inner: Arc<WinitWindow>,
    cursor: Cell<CursorMode>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self {
            inner: window,
            cursor: Cell::new(CursorMode::Free),
        }
    }
}

impl WindowContext for Window {
    fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    fn set_cursor_mode(&self, mode: CursorMode) {
        if self.cursor.get() == mode {
            return;
        }

        let grabbed = match mode {
            CursorMode::Captured => self
                .inner
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.inner.set_cursor_grab(CursorGrabMode::Confined)),
            CursorMode::Free => self.inner.set_cursor_grab(CursorGrabMode::None),
        };
        if let Err(e) = grabbed {
            warn!("Failed to apply cursor mode {:?}: {}", mode, e);
        }

        self.inner.set_cursor_visible(mode == CursorMode::Free);
        self.cursor.set(mode);
        debug!("Cursor mode {:?}", mode);
    }

    fn set_title(&self, title: &str) {
        self.inner.set_title(title);
    }
}
