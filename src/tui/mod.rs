//! Terminal host for the demo binary (crossterm + ratatui).
//!
//! Kept apart from `widgets` and `runtime` so the state machine builds
//! without terminal crates.

pub mod crossterm;
pub mod hover;
pub mod terminal_guard;
pub mod view;

pub use hover::{HoverChange, HoverTracker};
pub use view::{DemoView, Flow};
