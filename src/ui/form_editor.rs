//! Modal overlay: the backdrop plus the open modal's form.
//!
//! Visibility comes from the [`Page`]. The editor only tracks which
//! editable field has focus and turns key presses into field edits.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::config::{KeyResolver, ModalAction};
use crate::page::{Field, FieldKind, Form, ModalPanel, Page};
use crate::theme::Theme;
use crate::ui::{EventResult, PageView};

const PANEL_WIDTH: u16 = 64;
const MODIFIER_CHORDS: KeyModifiers = KeyModifiers::CONTROL.union(KeyModifiers::ALT);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Close,
}

pub struct FormEditor {
    /// Position among the form's editable fields.
    focus: usize,
    resolver: Arc<KeyResolver>,
}

impl FormEditor {
    pub const fn new(resolver: Arc<KeyResolver>) -> Self {
        Self { focus: 0, resolver }
    }

    /// Focus the first editable field. Call whenever a modal opens.
    pub const fn reset_focus(&mut self) {
        self.focus = 0;
    }

    fn focused_index(&self, form: &Form) -> Option<usize> {
        form.editable_indices().get(self.focus).copied()
    }

    /// Apply a key press to `form`, which should be the active modal's.
    pub fn edit(&mut self, key: KeyEvent, form: &mut Form) -> EventResult<FormEvent> {
        let editable = form.editable_indices().len();

        if let Some(action) = self.resolver.modal_action(&key) {
            match action {
                ModalAction::Close => return FormEvent::Close.into(),
                ModalAction::Submit => return FormEvent::Submit.into(),
                ModalAction::NextField if editable > 0 => {
                    self.focus = (self.focus + 1) % editable;
                }
                ModalAction::PrevField if editable > 0 => {
                    self.focus = (self.focus + editable - 1) % editable;
                }
                ModalAction::NextOption | ModalAction::PrevOption => {
                    let delta = if action == ModalAction::NextOption { 1 } else { -1 };
                    if let Some(field) = self
                        .focused_index(form)
                        .and_then(|index| form.field_at_mut(index))
                    {
                        field.cycle(delta);
                    }
                }
                ModalAction::NextField | ModalAction::PrevField => {}
            }
            return EventResult::Consumed;
        }

        let Some(field) = self
            .focused_index(form)
            .and_then(|index| form.field_at_mut(index))
        else {
            return EventResult::Ignored;
        };
        match key.code {
            KeyCode::Char(c) if !key.modifiers.intersects(MODIFIER_CHORDS) => {
                field.push_char(c);
                EventResult::Consumed
            }
            KeyCode::Backspace => {
                field.pop_char();
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect, theme: &Theme, panel: &ModalPanel) {
        let form = panel.form();
        let visible: Vec<(usize, &Field)> = form
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_editable())
            .collect();
        let focused = self.focused_index(form);

        let rows = u16::try_from(visible.len()).unwrap_or(u16::MAX);
        let height = rows.saturating_mul(3).saturating_add(4);
        let popup = area.centered(
            Constraint::Length(PANEL_WIDTH.min(area.width)),
            Constraint::Length(height.min(area.height)),
        );
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", panel.title()))
            .title_style(Style::default().fg(theme.mauve).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if panel.is_active() {
                theme.border_focused()
            } else {
                theme.border()
            }))
            .style(Style::default().bg(theme.base));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut constraints: Vec<Constraint> =
            visible.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Fill(1));
        constraints.push(Constraint::Length(1));
        let chunks = Layout::vertical(constraints).split(inner);

        for (chunk, (index, field)) in chunks.iter().zip(&visible) {
            render_field(frame, *chunk, theme, field, focused == Some(*index));
        }

        if let Some(hint_area) = chunks.last() {
            let hint = format!(
                "{} next field · {} submit · {} close",
                self.resolver.display_modal(ModalAction::NextField),
                self.resolver.display_modal(ModalAction::Submit),
                self.resolver.display_modal(ModalAction::Close),
            );
            frame.render_widget(
                Paragraph::new(hint).style(Style::default().fg(theme.overlay1)),
                *hint_area,
            );
        }
    }
}

impl PageView for FormEditor {
    type Output = FormEvent;

    /// Edit the active modal's form. Ignored while no modal is open.
    fn handle_key(&mut self, key: KeyEvent, page: &mut Page) -> EventResult<FormEvent> {
        let Some(modal) = page.active_modal().map(str::to_string) else {
            return EventResult::Ignored;
        };
        match page.modal_mut(&modal) {
            Ok(panel) => self.edit(key, panel.form_mut()),
            Err(_) => EventResult::Ignored,
        }
    }

    /// Dim the page behind the backdrop and draw every shown modal.
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, page: &Page) {
        if page.backdrop().is_shown() {
            frame.buffer_mut().set_style(
                area,
                Style::default()
                    .bg(theme.backdrop())
                    .add_modifier(Modifier::DIM),
            );
        }

        for panel in page
            .modal_names()
            .filter_map(|name| page.modal(name).ok())
            .filter(|panel| panel.is_shown())
        {
            self.render_panel(frame, area, theme, panel);
        }
    }
}

fn render_field(frame: &mut Frame, area: Rect, theme: &Theme, field: &Field, focused: bool) {
    let border = if focused {
        theme.border_focused()
    } else {
        theme.border()
    };
    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));

    let line = match field.kind() {
        FieldKind::Text { value, placeholder } if value.is_empty() => Line::from(Span::styled(
            placeholder.clone().unwrap_or_default(),
            Style::default().fg(theme.overlay0),
        )),
        FieldKind::Text { value, .. } => {
            let mut spans = vec![Span::styled(value.clone(), Style::default().fg(theme.text))];
            if focused {
                spans.push(Span::styled("▏", Style::default().fg(theme.lavender)));
            }
            Line::from(spans)
        }
        FieldKind::Choice { options, selected } => {
            let label = options
                .get(*selected)
                .map(|option| option.label.as_str())
                .unwrap_or_default();
            Line::from(vec![
                Span::styled(label.to_string(), Style::default().fg(theme.text)),
                Span::styled("  ▲▼", Style::default().fg(theme.overlay0)),
            ])
        }
        FieldKind::Hidden { .. } => Line::default(),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
