//! Keyboard shortcut handling

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use parallax_core::{Key, Modifiers, ShortcutTable};

use crate::ui::PendingAction;
use crate::EditorState;

/// The active key bindings
#[derive(Resource, Default)]
pub struct Shortcuts(pub ShortcutTable);

/// Translate a physical key into the shortcut table's key set
pub fn key_from_keycode(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyO => Key::O,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::BracketLeft => Key::BracketLeft,
        KeyCode::BracketRight => Key::BracketRight,
        _ => return None,
    })
}

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    shortcuts: Res<Shortcuts>,
    mut editor_state: ResMut<EditorState>,
    mut contexts: EguiContexts,
) {
    // Typing into a text field must not trigger plain-key shortcuts
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    let mods = Modifiers {
        ctrl: keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
        shift: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        alt: keyboard.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]),
    };

    for code in keyboard.get_just_pressed() {
        let Some(key) = key_from_keycode(*code) else {
            continue;
        };
        if let Some(command) = shortcuts.0.lookup(key, mods) {
            editor_state.pending_action = Some(PendingAction::from(command));
        }
    }
}
