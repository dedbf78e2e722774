#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Enter,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool) -> Self {
        Self { ctrl, shift }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    pub in_landing: bool,
    pub in_board: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    LandingEnter,
    BoardUndo,
    BoardRedo,
    BoardReset,
    BoardSave,
}

fn resolve_landing_shortcut(key: ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Enter | ShortcutKey::Space => Some(ShortcutAction::LandingEnter),
        _ => None,
    }
}

fn resolve_board_shortcut(key: ShortcutKey, modifiers: ShortcutModifiers) -> Option<ShortcutAction> {
    match (key, modifiers.ctrl, modifiers.shift) {
        (ShortcutKey::Character('z'), true, false) => Some(ShortcutAction::BoardUndo),
        (ShortcutKey::Character('z'), true, true) => Some(ShortcutAction::BoardRedo),
        (ShortcutKey::Character('y'), true, false) => Some(ShortcutAction::BoardRedo),
        (ShortcutKey::Character('s'), true, _) => Some(ShortcutAction::BoardSave),
        (ShortcutKey::Character('r'), true, false) => Some(ShortcutAction::BoardReset),
        _ => None,
    }
}

pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<ShortcutAction> {
    if context.in_landing {
        return resolve_landing_shortcut(key);
    }

    if context.in_board {
        return resolve_board_shortcut(key, modifiers);
    }

    None
}
