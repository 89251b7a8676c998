use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState};

use crate::config::{FeedAction, KeyResolver};
use crate::model::FeedEntry;
use crate::page::Page;
use crate::theme::Theme;
use crate::ui::{EventResult, PageView};

const UNKNOWN_REMAINING: &str = "--:--";

/// What the user asked for on the feed. Indices point into
/// [`Page::feed_entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEvent {
    Quit,
    NewPulse,
    Reply(usize),
    Report(usize),
    ReportCreator(usize),
}

/// Pulses and their reply threads with a movable selection.
pub struct FeedView {
    selected: usize,
    resolver: Arc<KeyResolver>,
}

impl FeedView {
    pub const fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            selected: 0,
            resolver,
        }
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    fn entry_item<'a>(
        entry: &FeedEntry<'a>,
        remaining: Option<&str>,
        theme: &Theme,
    ) -> Vec<Line<'a>> {
        let creator = Span::styled(
            format!("@{}", entry.creator),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        );

        let Some(remaining) = remaining else {
            let indent = "  ".repeat(entry.depth.saturating_sub(1));
            return vec![Line::from(vec![
                Span::styled(format!("{indent}↳ "), Style::default().fg(theme.overlay0)),
                creator,
                Span::raw("  "),
                Span::styled(entry.message, Style::default().fg(theme.subtext0)),
            ])];
        };

        vec![
            Line::from(vec![
                creator,
                Span::raw("  "),
                Span::styled(
                    format!("expires in {remaining}"),
                    Style::default().fg(theme.countdown()),
                ),
            ]),
            Line::from(Span::styled(entry.message, Style::default().fg(theme.text))),
        ]
    }
}

impl PageView for FeedView {
    type Output = FeedEvent;

    fn handle_key(&mut self, key: KeyEvent, page: &mut Page) -> EventResult<FeedEvent> {
        let Some(action) = self.resolver.feed_action(&key) else {
            return EventResult::Ignored;
        };
        let entry_count = page.feed_entries().len();
        let selected = (entry_count > 0).then_some(self.selected);

        match action {
            FeedAction::Quit => FeedEvent::Quit.into(),
            FeedAction::NewPulse => FeedEvent::NewPulse.into(),
            FeedAction::Up => {
                self.selected = self.selected.saturating_sub(1);
                EventResult::Consumed
            }
            FeedAction::Down => {
                if self.selected + 1 < entry_count {
                    self.selected += 1;
                }
                EventResult::Consumed
            }
            FeedAction::Reply => selected.map_or(EventResult::Consumed, |i| FeedEvent::Reply(i).into()),
            FeedAction::Report => {
                selected.map_or(EventResult::Consumed, |i| FeedEvent::Report(i).into())
            }
            FeedAction::ReportCreator => {
                selected.map_or(EventResult::Consumed, |i| FeedEvent::ReportCreator(i).into())
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, page: &Page) {
        let block = Block::default()
            .title(format!(" {} ", page.title()))
            .title_style(Style::default().fg(theme.mauve).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut items = Vec::new();
        for pulse in page.pulses() {
            let remaining = page
                .display(&pulse.countdown_target())
                .map(|display| display.text())
                .ok()
                .filter(|text| !text.is_empty())
                .unwrap_or(UNKNOWN_REMAINING);

            let entries = pulse.entries();
            let last = entries.len() - 1;
            for (index, entry) in entries.iter().enumerate() {
                let mut lines = Self::entry_item(entry, (index == 0).then_some(remaining), theme);
                // Blank line closes each thread.
                if index == last {
                    lines.push(Line::from(""));
                }
                items.push(ListItem::new(lines));
            }
        }

        let list = List::new(items)
            .highlight_style(Style::default().bg(theme.selection_bg()))
            .highlight_symbol("▌ ");
        let mut state = ListState::default().with_selected(Some(self.selected()));
        frame.render_stateful_widget(list, inner, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keybindings::KeybindingsConfig;
    use crate::page::PageKind;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn feed() -> FeedView {
        FeedView::new(Arc::new(KeyResolver::new(Arc::new(
            KeybindingsConfig::default(),
        ))))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut page = PageKind::Feed.build();
        let mut feed = feed();
        feed.handle_key(press(KeyCode::Up), &mut page);
        assert_eq!(feed.selected(), 0);
        for _ in 0..10 {
            feed.handle_key(press(KeyCode::Char('j')), &mut page);
        }
        assert_eq!(feed.selected(), page.feed_entries().len() - 1);
    }

    #[test]
    fn test_actions_carry_selected_entry() {
        let mut page = PageKind::Feed.build();
        let mut feed = feed();
        feed.handle_key(press(KeyCode::Down), &mut page);
        assert_eq!(
            feed.handle_key(press(KeyCode::Char('r')), &mut page),
            EventResult::Event(FeedEvent::Reply(1))
        );
        assert_eq!(
            feed.handle_key(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT), &mut page),
            EventResult::Event(FeedEvent::Report(1))
        );
        assert_eq!(
            feed.handle_key(press(KeyCode::Char('u')), &mut page),
            EventResult::Event(FeedEvent::ReportCreator(1))
        );
    }

    #[test]
    fn test_empty_feed_has_nothing_to_reply_to() {
        let mut page = Page::new("empty");
        let mut feed = feed();
        assert_eq!(
            feed.handle_key(press(KeyCode::Char('r')), &mut page),
            EventResult::Consumed
        );
        assert_eq!(
            feed.handle_key(press(KeyCode::Char('n')), &mut page),
            EventResult::Event(FeedEvent::NewPulse)
        );
    }

    #[test]
    fn test_render_lists_replies_under_their_pulse() {
        let page = PageKind::Feed.build();
        let feed = feed();
        let mut terminal = Terminal::new(TestBackend::new(64, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                feed.render(frame, area, &Theme::default(), &page);
            })
            .unwrap();

        let rows: Vec<String> = terminal
            .backend()
            .buffer()
            .content()
            .chunks(64)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect();
        let row_of = |needle: &str| rows.iter().position(|row| row.contains(needle)).unwrap();

        assert!(rows[row_of("@sam")].contains("expires in --:--"));
        assert!(row_of("Anyone up for a late game") < row_of("↳ @robin  Count me in"));
        assert!(row_of("Count me in") < row_of("  ↳ @sam  Court 2 at nine then"));
        assert!(row_of("Court 2 at nine then") < row_of("New café"));
    }
}
