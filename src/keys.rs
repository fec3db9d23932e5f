use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Message};

/// A declarative keybinding map that can be composed and extended.
#[derive(Clone)]
pub struct Keymap {
    bindings: Vec<(KeyCode, KeyModifiers, Message)>,
}

impl Keymap {
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Add a key binding with no modifiers.
    pub fn bind(mut self, code: KeyCode, message: Message) -> Self {
        self.bindings.push((code, KeyModifiers::NONE, message));
        self
    }

    /// Add a key binding with Ctrl modifier.
    pub fn bind_ctrl(mut self, code: KeyCode, message: Message) -> Self {
        self.bindings.push((code, KeyModifiers::CONTROL, message));
        self
    }

    /// Look up a message for a key event.
    /// Later bindings take precedence over earlier ones.
    pub fn get(&self, event: &KeyEvent) -> Option<Message> {
        self.bindings
            .iter()
            .rev()
            .find(|(code, mods, _)| *code == event.code && event.modifiers.contains(*mods))
            .map(|(_, _, msg)| msg.clone())
    }

    /// Extend this keymap with another. The other keymap's bindings take
    /// precedence.
    pub fn extend(mut self, other: Self) -> Self {
        self.bindings.extend(other.bindings);
        self
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

/// Keybindings that work in all states.
pub fn global_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('q'), Message::Quit)
        .bind_ctrl(KeyCode::Char('c'), Message::Quit)
        .bind(KeyCode::Char('`'), Message::ToggleDebug)
        .bind(KeyCode::Char('?'), Message::ToggleHelp)
}

/// Keybindings for the gallery list.
pub fn gallery_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('j'), Message::SelectNext)
        .bind(KeyCode::Down, Message::SelectNext)
        .bind(KeyCode::Char('k'), Message::SelectPrev)
        .bind(KeyCode::Up, Message::SelectPrev)
        .bind(KeyCode::Char('g'), Message::SelectFirst)
        .bind(KeyCode::Home, Message::SelectFirst)
        .bind(KeyCode::Char('G'), Message::SelectLast)
        .bind(KeyCode::End, Message::SelectLast)
        .bind(KeyCode::PageDown, Message::PageDown)
        .bind_ctrl(KeyCode::Char('d'), Message::PageDown)
        .bind(KeyCode::PageUp, Message::PageUp)
        .bind_ctrl(KeyCode::Char('u'), Message::PageUp)
        .bind(KeyCode::Char('o'), Message::OpenUrl)
        .bind(KeyCode::Enter, Message::OpenUrl)
        .bind(KeyCode::Char('r'), Message::Refresh)
}

/// Keybindings while the help overlay is open.
fn help_overlay_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('?'), Message::ToggleHelp)
        .bind(KeyCode::Esc, Message::ToggleHelp)
        .bind(KeyCode::Char('q'), Message::ToggleHelp)
        .bind_ctrl(KeyCode::Char('c'), Message::Quit)
}

pub fn handle_key(key: KeyEvent, app: &App) -> Option<Message> {
    if app.show_help {
        return help_overlay_keymap().get(&key);
    }
    global_keymap().extend(gallery_keymap()).get(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestAppBuilder;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn gallery_bindings() {
        let app = TestAppBuilder::new().build();
        assert_eq!(
            handle_key(key(KeyCode::Char('j')), &app),
            Some(Message::SelectNext)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('r')), &app),
            Some(Message::Refresh)
        );
        assert_eq!(handle_key(key(KeyCode::Char('q')), &app), Some(Message::Quit));
        assert_eq!(handle_key(ctrl(KeyCode::Char('c')), &app), Some(Message::Quit));
        assert_eq!(handle_key(key(KeyCode::Char('x')), &app), None);
    }

    #[test]
    fn help_overlay_swallows_navigation() {
        let app = TestAppBuilder::new().show_help().build();
        assert_eq!(
            handle_key(key(KeyCode::Char('j')), &app),
            None
        );
        assert_eq!(
            handle_key(key(KeyCode::Esc), &app),
            Some(Message::ToggleHelp)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &app),
            Some(Message::ToggleHelp)
        );
    }

    #[test]
    fn later_bindings_take_precedence() {
        let map = Keymap::new()
            .bind(KeyCode::Char('x'), Message::Quit)
            .bind(KeyCode::Char('x'), Message::Refresh);
        assert_eq!(map.get(&key(KeyCode::Char('x'))), Some(Message::Refresh));
    }
}
