/// Transition observed by an [`EdgeLatch`] on one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    #[default]
    None,
    /// Not held last frame, held now
    Pressed,
    /// Held last frame, not held now
    Released,
}

/// Two-state latch remembering whether an input was held on the previous frame
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeLatch {
    held: bool,
}

impl EdgeLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's held state, returns the transition since last frame
    pub fn update(&mut self, held: bool) -> Edge {
        let edge = match (self.held, held) {
            (false, true) => Edge::Pressed,
            (true, false) => Edge::Released,
            _ => Edge::None,
        };
        self.held = held;
        edge
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}
