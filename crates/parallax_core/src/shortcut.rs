//! Keyboard shortcut table
//!
//! Keys are physical positions; the editor translates its input backend's
//! key codes into [`Key`] before looking them up. Modifiers must match
//! exactly, so Ctrl+S and Ctrl+Shift+S never shadow each other.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    O,
    S,
    X,
    Y,
    Z,
    Digit1,
    Digit2,
    BracketLeft,
    BracketRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };
    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        alt: false,
    };
}

/// Everything a shortcut can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    OpenTilemap,
    OpenPaletteFolder,
    OpenPrimaryTileset,
    OpenSecondaryTileset,
    Save,
    SaveAs,
    Undo,
    Redo,
    ToggleFlipX,
    ToggleFlipY,
    PreviousPalette,
    NextPalette,
}

impl EditorCommand {
    /// Human-readable accelerator for menus, e.g. `Ctrl+Shift+S`
    pub fn label(self, table: &ShortcutTable) -> Option<String> {
        let (key, mods) = table.binding_for(self)?;
        let mut label = String::new();
        if mods.ctrl {
            label.push_str("Ctrl+");
        }
        if mods.alt {
            label.push_str("Alt+");
        }
        if mods.shift {
            label.push_str("Shift+");
        }
        label.push_str(match key {
            Key::O => "O",
            Key::S => "S",
            Key::X => "X",
            Key::Y => "Y",
            Key::Z => "Z",
            Key::Digit1 => "1",
            Key::Digit2 => "2",
            Key::BracketLeft => "[",
            Key::BracketRight => "]",
        });
        Some(label)
    }
}

#[derive(Debug, Clone)]
pub struct ShortcutTable {
    bindings: HashMap<(Key, Modifiers), EditorCommand>,
}

impl Default for ShortcutTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.bind(Key::O, Modifiers::CTRL, EditorCommand::OpenTilemap);
        table.bind(Key::O, Modifiers::CTRL_SHIFT, EditorCommand::OpenPaletteFolder);
        table.bind(Key::Digit1, Modifiers::CTRL_SHIFT, EditorCommand::OpenPrimaryTileset);
        table.bind(Key::Digit2, Modifiers::CTRL_SHIFT, EditorCommand::OpenSecondaryTileset);
        table.bind(Key::S, Modifiers::CTRL, EditorCommand::Save);
        table.bind(Key::S, Modifiers::CTRL_SHIFT, EditorCommand::SaveAs);
        table.bind(Key::Z, Modifiers::CTRL, EditorCommand::Undo);
        table.bind(Key::Y, Modifiers::CTRL, EditorCommand::Redo);
        table.bind(Key::Z, Modifiers::CTRL_SHIFT, EditorCommand::Redo);
        table.bind(Key::X, Modifiers::NONE, EditorCommand::ToggleFlipX);
        table.bind(Key::Y, Modifiers::NONE, EditorCommand::ToggleFlipY);
        table.bind(Key::BracketLeft, Modifiers::NONE, EditorCommand::PreviousPalette);
        table.bind(Key::BracketRight, Modifiers::NONE, EditorCommand::NextPalette);
        table
    }
}

impl ShortcutTable {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind a key combination, replacing any previous binding of the same combination
    pub fn bind(&mut self, key: Key, mods: Modifiers, command: EditorCommand) {
        self.bindings.insert((key, mods), command);
    }

    pub fn lookup(&self, key: Key, mods: Modifiers) -> Option<EditorCommand> {
        self.bindings.get(&(key, mods)).copied()
    }

    /// First binding for `command`, preferring the one with fewest modifiers
    pub fn binding_for(&self, command: EditorCommand) -> Option<(Key, Modifiers)> {
        self.bindings
            .iter()
            .filter(|(_, c)| **c == command)
            .map(|(binding, _)| *binding)
            .min_by_key(|(_, mods)| u8::from(mods.ctrl) + u8::from(mods.shift) + u8::from(mods.alt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_match_exactly() {
        let table = ShortcutTable::default();
        assert_eq!(table.lookup(Key::S, Modifiers::CTRL), Some(EditorCommand::Save));
        assert_eq!(table.lookup(Key::S, Modifiers::CTRL_SHIFT), Some(EditorCommand::SaveAs));
        assert_eq!(table.lookup(Key::S, Modifiers::NONE), None);

        let ctrl_alt = Modifiers {
            alt: true,
            ..Modifiers::CTRL
        };
        assert_eq!(table.lookup(Key::S, ctrl_alt), None);
    }

    #[test]
    fn test_redo_has_two_bindings() {
        let table = ShortcutTable::default();
        assert_eq!(table.lookup(Key::Y, Modifiers::CTRL), Some(EditorCommand::Redo));
        assert_eq!(table.lookup(Key::Z, Modifiers::CTRL_SHIFT), Some(EditorCommand::Redo));
        assert_eq!(table.lookup(Key::Z, Modifiers::CTRL), Some(EditorCommand::Undo));
    }

    #[test]
    fn test_plain_keys_toggle_brush() {
        let table = ShortcutTable::default();
        assert_eq!(table.lookup(Key::X, Modifiers::NONE), Some(EditorCommand::ToggleFlipX));
        assert_eq!(table.lookup(Key::Y, Modifiers::NONE), Some(EditorCommand::ToggleFlipY));
        assert_eq!(
            table.lookup(Key::BracketRight, Modifiers::NONE),
            Some(EditorCommand::NextPalette)
        );
        assert_eq!(table.lookup(Key::X, Modifiers::CTRL), None);
    }

    #[test]
    fn test_labels() {
        let table = ShortcutTable::default();
        assert_eq!(EditorCommand::SaveAs.label(&table).as_deref(), Some("Ctrl+Shift+S"));
        assert_eq!(
            EditorCommand::OpenPrimaryTileset.label(&table).as_deref(),
            Some("Ctrl+Shift+1")
        );
        // Ctrl+Y wins over Ctrl+Shift+Z
        assert_eq!(EditorCommand::Redo.label(&table).as_deref(), Some("Ctrl+Y"));
        assert_eq!(ShortcutTable::empty().binding_for(EditorCommand::Undo), None);
    }
}
