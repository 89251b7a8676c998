//! Terminal rendering of the page.
//!
//! - [`FeedView`] - pulses with their reply threads and live countdowns
//! - [`FormEditor`] - the open modal drawn over the backdrop
//! - [`ToastManager`] - short-lived notifications
//! - [`ErrorDialog`] - blocking report of a failed page lookup
//! - [`StatusBar`] - keybinding hints for the current focus

mod error_dialog;
mod feed;
mod form_editor;
mod status_bar;
mod toast;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

pub use color_eyre::Result;

use crate::page::Page;
use crate::theme::Theme;

pub use error_dialog::{ErrorDialog, ErrorDialogEvent};
pub use feed::{FeedEvent, FeedView};
pub use form_editor::{FormEditor, FormEvent};
pub use status_bar::StatusBar;
pub use toast::{Toast, ToastManager, ToastType};

/// Result of handling an input event.
///
/// - `Ignored` - the handler didn't recognize this input
/// - `Consumed` - the input was handled but produced no message
/// - `Event(E)` - the input was handled and produced a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    Ignored,
    Consumed,
    Event(E),
}

impl<E> EventResult<E> {
    pub fn event(self) -> Option<E> {
        match self {
            Self::Event(event) => Some(event),
            _ => None,
        }
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Self-contained UI building block that owns everything it draws.
pub trait Component {
    type Output;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    /// Called on each tick for time-based updates.
    fn handle_tick(&mut self) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// View drawn from the app's [`Page`].
///
/// The page is owned by the app and shared with the dispatcher, so views
/// borrow it per call instead of holding it like a [`Component`] does.
pub trait PageView {
    type Output;

    fn handle_key(&mut self, key: KeyEvent, page: &mut Page) -> EventResult<Self::Output>;

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, page: &Page);
}
