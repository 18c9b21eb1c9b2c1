//! The menu button widget pair.
//!
//! `MenuButton` owns its `Menu`; the menu reaches back to the trigger only
//! through the `MenuOwner` view handed to each call.

pub mod menu;
pub mod menu_button;
pub mod timer;

pub use menu::{Menu, MenuOwner};
pub use menu_button::{MenuButton, TriggerState};
pub use timer::CloseTimer;
