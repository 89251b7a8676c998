use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::cli::Args;
use crate::config::{AppConfig, CountdownConfig, KeyResolver};
use crate::countdown::{CountdownEngine, CountdownFrame, CountdownHandle, LoopPolicy};
use crate::dispatcher::{FormSubmission, ModalDispatcher};
use crate::error::LookupError;
use crate::model::{FeedEntry, TargetRef};
use crate::page::Page;
use crate::page::catalog::{CREATE_PULSE_MODAL, CREATE_REPLY_MODAL, CREATE_REPORT_MODAL};
use crate::theme::Theme;
use crate::tui::{Event, Tui};
use crate::ui::{
    Component, ErrorDialog, FeedEvent, FeedView, FormEditor, FormEvent, PageView, StatusBar,
    Toast, ToastManager,
};

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 4.0;

/// Loop policy for the page's countdowns. `--no-loop` wins over the config.
pub const fn countdown_policy(config: &CountdownConfig, no_loop: bool) -> LoopPolicy {
    if no_loop {
        LoopPolicy::Stop
    } else {
        config.policy()
    }
}

enum Step {
    Terminal(Option<Event>),
    Countdown(CountdownFrame),
}

pub struct App {
    page: Page,
    dispatcher: ModalDispatcher,
    engine: CountdownEngine,
    frames_rx: UnboundedReceiver<CountdownFrame>,
    countdowns: Vec<CountdownHandle>,
    policy: LoopPolicy,
    submissions: Vec<FormSubmission>,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    feed: FeedView,
    editor: FormEditor,
    status_bar: StatusBar,
    toasts: ToastManager,
    error_dialog: Option<ErrorDialog>,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    /// Build the page and check that every modal schema matches it.
    pub fn new(config: &AppConfig, args: &Args, theme: Theme) -> color_eyre::Result<Self> {
        let kind = args.page.unwrap_or(config.page);
        let page = kind.build();
        let dispatcher = ModalDispatcher::new(config.modals.clone());
        dispatcher.validate(&page)?;

        let policy = countdown_policy(&config.countdown, args.no_loop);
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        let engine = CountdownEngine::new(frames_tx).with_policy(policy);

        let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));
        info!(?kind, ?policy, modals = config.modals.len(), "Built page");

        Ok(Self {
            page,
            dispatcher,
            engine,
            frames_rx,
            countdowns: Vec::new(),
            policy,
            submissions: Vec::new(),
            feed: FeedView::new(Arc::clone(&resolver)),
            editor: FormEditor::new(Arc::clone(&resolver)),
            status_bar: StatusBar::new(Arc::clone(&resolver)),
            resolver,
            theme,
            toasts: ToastManager::default(),
            error_dialog: None,
            should_quit: false,
            should_suspend: false,
        })
    }

    /// Start one countdown per registration the page declares.
    pub fn load(&mut self) {
        self.countdowns = self
            .page
            .countdowns()
            .iter()
            .map(|slot| self.engine.start(slot.duration_secs, slot.target.clone()))
            .collect();
        info!(countdowns = self.countdowns.len(), "Page loaded");
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;
        self.load();

        loop {
            let step = tokio::select! {
                event = tui.next_event() => Step::Terminal(event),
                Some(frame) = self.frames_rx.recv() => Step::Countdown(frame),
            };
            match step {
                Step::Terminal(Some(event)) => self.handle_event(&mut tui, event)?,
                Step::Terminal(None) => break,
                Step::Countdown(frame) => self.apply_frame(&frame),
            }

            if self.should_suspend {
                tui.suspend()?;
                self.should_suspend = false;
                tui.enter()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        self.engine.shutdown();
        tui.exit()?;
        let finished = self.countdowns.iter().filter(|h| h.is_finished()).count();
        info!(finished, total = self.countdowns.len(), "Page unloaded");
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> color_eyre::Result<()> {
        match event {
            Event::Init => debug!("Terminal ready"),
            Event::Quit => self.should_quit = true,
            Event::Suspend => self.should_suspend = true,
            Event::Tick => self.toasts.handle_tick(),
            Event::Render | Event::Resize(..) => self.render(tui)?,
            Event::Key(key) => self.handle_key(key)?,
            Event::Error(error) => warn!(%error, "Terminal input error"),
        }
        Ok(())
    }

    /// Write a countdown frame into its display target.
    ///
    /// A frame for a missing display cancels that registration and reports
    /// the missing element.
    pub fn apply_frame(&mut self, frame: &CountdownFrame) {
        match self.page.display_mut(&frame.target) {
            Ok(display) => display.set_text(frame.text()),
            Err(error) => {
                for handle in self
                    .countdowns
                    .iter()
                    .filter(|h| h.target() == frame.target && !h.is_cancelled())
                {
                    handle.cancel();
                }
                self.report(&error);
                return;
            }
        }

        if frame.remaining_secs == 0 && self.policy == LoopPolicy::Stop {
            let creator = self
                .page
                .pulses()
                .iter()
                .find(|pulse| pulse.countdown_target() == frame.target)
                .map(|pulse| pulse.creator.clone());
            if let Some(creator) = creator {
                self.toasts
                    .show(Toast::info(format!("Pulse by @{creator} expired")));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        if let Some(dialog) = &mut self.error_dialog {
            if dialog.handle_key(key)?.event().is_some() {
                self.error_dialog = None;
            }
            return Ok(());
        }

        let outcome = match self.page.active_modal().map(str::to_string) {
            Some(modal) => self.handle_modal_key(&modal, key),
            None => self.handle_feed_key(key),
        };
        if let Err(error) = outcome {
            self.report(&error);
        }
        Ok(())
    }

    fn handle_feed_key(&mut self, key: KeyEvent) -> Result<(), LookupError> {
        let Some(event) = self.feed.handle_key(key, &mut self.page).event() else {
            return Ok(());
        };

        let (modal, target) = match event {
            FeedEvent::Quit => {
                self.should_quit = true;
                return Ok(());
            }
            FeedEvent::NewPulse => return self.open_modal(CREATE_PULSE_MODAL, None),
            FeedEvent::Reply(index) => (
                CREATE_REPLY_MODAL,
                self.entry_target(index, |entry| entry.target()),
            ),
            FeedEvent::Report(index) => (
                CREATE_REPORT_MODAL,
                self.entry_target(index, |entry| entry.target()),
            ),
            FeedEvent::ReportCreator(index) => (
                CREATE_REPORT_MODAL,
                self.entry_target(index, |entry| entry.creator_target()),
            ),
        };
        match target {
            Some(target) => self.open_modal(modal, Some(&target)),
            None => Ok(()),
        }
    }

    /// Target of the feed entry at `index`, picked by `select`.
    fn entry_target(
        &self,
        index: usize,
        select: impl Fn(&FeedEntry<'_>) -> TargetRef,
    ) -> Option<TargetRef> {
        let entries = self.page.feed_entries();
        let entry = entries.get(index)?;
        debug!(kind = %entry.kind, id = entry.id, "Selected feed entry");
        Some(select(entry))
    }

    fn open_modal(&mut self, modal: &str, target: Option<&TargetRef>) -> Result<(), LookupError> {
        if let Some(target) = target {
            self.dispatcher.bind_target(&mut self.page, modal, target)?;
        }
        self.dispatcher.open(&mut self.page, modal)?;
        self.editor.reset_focus();
        Ok(())
    }

    fn handle_modal_key(&mut self, modal: &str, key: KeyEvent) -> Result<(), LookupError> {
        match self.editor.handle_key(key, &mut self.page).event() {
            Some(FormEvent::Close) => self.dispatcher.close(&mut self.page, modal),
            Some(FormEvent::Submit) => self.submit(modal),
            None => Ok(()),
        }
    }

    fn submit(&mut self, modal: &str) -> Result<(), LookupError> {
        let submission = self.dispatcher.submission(&self.page, modal)?;
        info!(modal, values = ?submission.values, "Submitted form");

        let message = match modal {
            CREATE_PULSE_MODAL => "Pulse posted",
            CREATE_REPLY_MODAL => "Reply sent",
            CREATE_REPORT_MODAL => "Report submitted",
            _ => "Submitted",
        };
        self.toasts.show(Toast::success(message));
        self.submissions.push(submission);
        self.dispatcher.close(&mut self.page, modal)
    }

    fn report(&mut self, error: &LookupError) {
        warn!(%error, "Page lookup failed");
        self.error_dialog = Some(ErrorDialog::new(
            error.to_string(),
            Arc::clone(&self.resolver),
        ));
    }

    fn render(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        tui.draw(|frame| {
            let area = frame.area();
            let [body, status] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
            let modal_open = self.page.active_modal().is_some();

            self.feed.render(frame, body, &self.theme, &self.page);
            self.status_bar
                .render(frame, status, &self.theme, modal_open);
            self.editor.render(frame, area, &self.theme, &self.page);
            self.toasts.render(frame, body, &self.theme);
            if let Some(dialog) = &mut self.error_dialog {
                dialog.render(frame, area, &self.theme);
            }
        })
    }
}
