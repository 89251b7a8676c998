use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{FeedKeybindings, ModalKeybindings};

impl Default for FeedKeybindings {
    fn default() -> Self {
        Self {
            quit: KeyBinding::Multiple(vec![Key::char('q'), Key::with_ctrl(KeyCode::Char('c'))]),
            up: KeyBinding::Multiple(vec![Key::char('k'), Key::new(KeyCode::Up)]),
            down: KeyBinding::Multiple(vec![Key::char('j'), Key::new(KeyCode::Down)]),
            new_pulse: Key::char('n').into(),
            reply: Key::char('r').into(),
            report: Key::char('R').into(),
            report_creator: Key::char('u').into(),
        }
    }
}

impl Default for ModalKeybindings {
    fn default() -> Self {
        Self {
            close: Key::new(KeyCode::Esc).into(),
            submit: Key::new(KeyCode::Enter).into(),
            next_field: Key::new(KeyCode::Tab).into(),
            prev_field: Key::new(KeyCode::BackTab).into(),
            next_option: Key::new(KeyCode::Down).into(),
            prev_option: Key::new(KeyCode::Up).into(),
        }
    }
}
