//! Keyboard commands

mod shortcuts;

pub use shortcuts::{handle_keyboard_shortcuts, key_from_keycode, Shortcuts};
