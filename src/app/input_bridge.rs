use crate::input::{ShortcutKey, ShortcutModifiers};

fn shortcut_character_from_keycode(keycode: u32) -> Option<char> {
    // Wayland/XKB keycodes are commonly evdev+8. Handle both to keep shortcuts
    // layout-agnostic under different backends/IME states.
    match keycode {
        44 | 52 => Some('z'),
        21 | 29 => Some('y'),
        31 | 39 => Some('s'),
        19 | 27 => Some('r'),
        _ => None,
    }
}

pub(super) fn normalize_shortcut_key(key: gtk4::gdk::Key, keycode: u32) -> Option<ShortcutKey> {
    if matches!(key, gtk4::gdk::Key::Return | gtk4::gdk::Key::KP_Enter) {
        return Some(ShortcutKey::Enter);
    }
    if matches!(key, gtk4::gdk::Key::space | gtk4::gdk::Key::KP_Space) {
        return Some(ShortcutKey::Space);
    }

    let keyval_shortcut = key
        .to_unicode()
        .filter(|character| !character.is_control())
        .map(|character| ShortcutKey::Character(character.to_ascii_lowercase()));
    match keyval_shortcut {
        Some(ShortcutKey::Character(character)) if character.is_ascii() => {
            Some(ShortcutKey::Character(character))
        }
        Some(_) | None => shortcut_character_from_keycode(keycode).map(ShortcutKey::Character),
    }
}

pub(super) fn shortcut_modifiers(modifier: gtk4::gdk::ModifierType) -> ShortcutModifiers {
    ShortcutModifiers::new(
        modifier.contains(gtk4::gdk::ModifierType::CONTROL_MASK),
        modifier.contains(gtk4::gdk::ModifierType::SHIFT_MASK),
    )
}
