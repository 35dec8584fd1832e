/// Movement keys sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
}

/// Controller - exposes held-button state to the render loop.
pub trait Controller {
    /// Check if a button is currently held down.
    fn is_down(&self, button: Button) -> bool;
}
