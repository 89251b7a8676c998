use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::Component;
use crate::theme::Theme;

const TOAST_LIFETIME: Duration = Duration::from_secs(3);
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Info,
}

#[derive(Debug)]
pub struct Toast {
    message: String,
    toast_type: ToastType,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Info)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_LIFETIME
    }
}

/// Stack of toasts in the bottom-right corner, newest at the bottom.
#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn show(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }
}

impl Component for ToastManager {
    type Output = ();

    fn handle_tick(&mut self) {
        self.toasts.retain(|toast| !toast.is_expired());
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let height = 3u16;
        let width = 48u16.min(area.width.saturating_sub(4));

        for (offset, toast) in (0u16..).zip(self.toasts.iter().rev()) {
            let bottom = area.bottom().saturating_sub(1 + offset * (height + 1));
            let Some(y) = bottom.checked_sub(height).filter(|y| *y >= area.y) else {
                break;
            };
            let x = area.right().saturating_sub(width + 2);
            let toast_area = Rect::new(x, y, width, height);

            let (color, icon) = match toast.toast_type {
                ToastType::Success => (theme.green, "✓"),
                ToastType::Info => (theme.blue, "ℹ"),
            };

            frame.render_widget(Clear, toast_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme.surface0));
            let paragraph = Paragraph::new(format!("{icon} {}", toast.message()))
                .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, toast_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_latest_toasts() {
        let mut toasts = ToastManager::default();
        for n in 0..5 {
            toasts.show(Toast::info(format!("toast {n}")));
        }
        let shown: Vec<_> = toasts.visible().map(Toast::message).collect();
        assert_eq!(shown, vec!["toast 2", "toast 3", "toast 4"]);
    }

    #[test]
    fn test_tick_keeps_fresh_toasts() {
        let mut toasts = ToastManager::default();
        toasts.show(Toast::success("Reply sent"));
        toasts.handle_tick();
        assert_eq!(toasts.visible().count(), 1);
    }
}
