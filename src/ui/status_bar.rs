use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{FeedAction, KeyResolver, ModalAction};
use crate::theme::Theme;

/// One-line keybinding hints for whatever currently has focus.
pub struct StatusBar {
    resolver: Arc<KeyResolver>,
}

impl StatusBar {
    pub const fn new(resolver: Arc<KeyResolver>) -> Self {
        Self { resolver }
    }

    /// `(keys, description)` pairs for the feed or for an open modal.
    pub fn hints(&self, modal_open: bool) -> Vec<(String, &'static str)> {
        if modal_open {
            ModalAction::ALL
                .into_iter()
                .map(|action| (self.resolver.display_modal(action), action.description()))
                .collect()
        } else {
            FeedAction::ALL
                .into_iter()
                .map(|action| (self.resolver.display_feed(action), action.description()))
                .collect()
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, modal_open: bool) {
        let key_style = Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(theme.subtext0);

        let mut spans = Vec::new();
        for (keys, description) in self.hints(modal_open) {
            if !spans.is_empty() {
                spans.push(Span::styled("  ", desc_style));
            }
            spans.push(Span::styled(keys, key_style));
            spans.push(Span::styled(format!(" {description}"), desc_style));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.surface0)),
            area,
        );
    }
}
