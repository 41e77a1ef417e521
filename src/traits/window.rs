/// Pointer mode requested by the camera each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Visible, not grabbed
    #[default]
    Free,
    /// Hidden and locked to the window while looking around
    Captured,
}

/// Window abstraction used by the frame driver
pub trait WindowContext {
    /// Request the window to redraw
    fn request_redraw(&self);

    /// Apply a cursor mode to the OS pointer
    fn set_cursor_mode(&self, mode: CursorMode);

    /// Replace the window title
    fn set_title(&self, title: &str);
}
