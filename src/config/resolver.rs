use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{FeedAction, ModalAction};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events to the actions configured for them.
pub struct KeyResolver {
    keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn feed_binding(&self, action: FeedAction) -> &KeyBinding {
        let kb = &self.keybindings.feed;
        match action {
            FeedAction::Quit => &kb.quit,
            FeedAction::Up => &kb.up,
            FeedAction::Down => &kb.down,
            FeedAction::NewPulse => &kb.new_pulse,
            FeedAction::Reply => &kb.reply,
            FeedAction::Report => &kb.report,
            FeedAction::ReportCreator => &kb.report_creator,
        }
    }

    fn modal_binding(&self, action: ModalAction) -> &KeyBinding {
        let kb = &self.keybindings.modal;
        match action {
            ModalAction::Close => &kb.close,
            ModalAction::Submit => &kb.submit,
            ModalAction::NextField => &kb.next_field,
            ModalAction::PrevField => &kb.prev_field,
            ModalAction::NextOption => &kb.next_option,
            ModalAction::PrevOption => &kb.prev_option,
        }
    }

    pub fn feed_action(&self, event: &KeyEvent) -> Option<FeedAction> {
        FeedAction::ALL
            .into_iter()
            .find(|action| self.feed_binding(*action).matches(event))
    }

    pub fn modal_action(&self, event: &KeyEvent) -> Option<ModalAction> {
        ModalAction::ALL
            .into_iter()
            .find(|action| self.modal_binding(*action).matches(event))
    }

    pub fn display_feed(&self, action: FeedAction) -> String {
        self.feed_binding(action).display()
    }

    pub fn display_modal(&self, action: ModalAction) -> String {
        self.modal_binding(action).display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn resolver() -> KeyResolver {
        KeyResolver::new(Arc::new(KeybindingsConfig::default()))
    }

    #[test]
    fn test_feed_actions() {
        let resolver = resolver();
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(resolver.feed_action(&press(KeyCode::Char('r'))), Some(FeedAction::Reply));
        assert_eq!(
            resolver.feed_action(&KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Some(FeedAction::Report)
        );
        assert_eq!(resolver.feed_action(&press(KeyCode::Down)), Some(FeedAction::Down));
        assert_eq!(resolver.feed_action(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_modal_actions() {
        let resolver = resolver();
        assert_eq!(
            resolver.modal_action(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(ModalAction::Close)
        );
        assert_eq!(
            resolver.modal_action(&KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(ModalAction::PrevField)
        );
        assert_eq!(resolver.display_modal(ModalAction::NextField), "Tab");
    }
}
