//! Rendering collaborator boundary.
//!
//! Rendering is a projection for human observation and never mutates
//! environment state. The core only defines the seam; an actual display
//! lives outside the crate and is handed in at construction.

/// A display for the current world configuration.
///
/// `current` is the engine's configuration symbol; `target` is the
/// active goal symbol, passed when the goal changes (on reset).
pub trait Renderer {
    /// Show a configuration, optionally with the active goal.
    fn update(&mut self, current: &str, target: Option<&str>);
}
