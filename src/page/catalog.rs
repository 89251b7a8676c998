//! Built-in page declarations.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{ChoiceOption, Field, Form, ModalPanel, Page};
use crate::model::{Pulse, Reply, ReportCategory};

pub const CREATE_PULSE_MODAL: &str = "create-pulse-modal";
pub const CREATE_REPLY_MODAL: &str = "create-reply-modal";
pub const CREATE_REPORT_MODAL: &str = "create-report-modal";

/// Label of the blank first option in choice fields.
pub const BLANK_CHOICE: &str = "---------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// A single pulse with one expiry countdown.
    Pulse,
    /// A feed of pulses whose countdowns run side by side.
    #[default]
    Feed,
}

impl PageKind {
    pub fn build(self) -> Page {
        let page = match self {
            Self::Pulse => Page::new("Pulse").with_pulse(pulse(
                1,
                2,
                "sam",
                "Anyone up for a late game tonight?",
                500,
            )),
            Self::Feed => Page::new("Feed")
                .with_pulse(Pulse {
                    replies: vec![
                        reply(21, 3, "robin", "Count me in")
                            .with_reply(reply(22, 2, "sam", "Court 2 at nine then")),
                    ],
                    ..pulse(4, 2, "sam", "Anyone up for a late game tonight?", 600)
                })
                .with_pulse(Pulse {
                    replies: vec![reply(23, 7, "kai", "Their oat milk is good too")],
                    ..pulse(
                        5,
                        3,
                        "robin",
                        "New café on the corner does great flat whites",
                        264,
                    )
                })
                .with_pulse(pulse(6, 7, "kai", "Train delays again. Walking it.", 220)),
        };
        with_modals(page)
    }
}

fn pulse(id: u64, creator_id: u64, creator: &str, message: &str, expires_in: u64) -> Pulse {
    Pulse {
        id,
        creator_id,
        creator: creator.to_string(),
        message: message.to_string(),
        expires_in,
        replies: Vec::new(),
    }
}

fn reply(id: u64, creator_id: u64, creator: &str, message: &str) -> Reply {
    Reply {
        id,
        creator_id,
        creator: creator.to_string(),
        message: message.to_string(),
        replies: Vec::new(),
    }
}

fn with_modals(page: Page) -> Page {
    page.with_modal(ModalPanel::new(
        CREATE_PULSE_MODAL,
        "New Pulse",
        Form::new([Field::text("pulse_message", "Message")
            .with_placeholder("What are you thinking...?")]),
    ))
    .with_modal(ModalPanel::new(
        CREATE_REPLY_MODAL,
        "Reply",
        Form::new([
            Field::text("reply_message", "Message").with_placeholder("Reply message..."),
            Field::hidden("reply_content_type"),
            Field::hidden("reply_object_id"),
        ]),
    ))
    .with_modal(ModalPanel::new(
        CREATE_REPORT_MODAL,
        "Report",
        Form::new([
            Field::choice("report_category", "Category", report_category_options()),
            Field::text("report_reason", "Reason")
                .with_placeholder("Describe the reason for this report..."),
            Field::hidden("report_content_type"),
            Field::hidden("report_object_id"),
        ]),
    ))
}

fn report_category_options() -> Vec<ChoiceOption> {
    std::iter::once(ChoiceOption::new("", BLANK_CHOICE))
        .chain(
            ReportCategory::ALL
                .iter()
                .map(|category| ChoiceOption::new(category.code(), category.label())),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentKind;

    #[test]
    fn test_pulse_page_has_single_countdown() {
        let page = PageKind::Pulse.build();
        let durations: Vec<_> = page.countdowns().iter().map(|c| c.duration_secs).collect();
        assert_eq!(durations, vec![500]);
    }

    #[test]
    fn test_feed_page_countdowns() {
        let page = PageKind::Feed.build();
        let durations: Vec<_> = page.countdowns().iter().map(|c| c.duration_secs).collect();
        assert_eq!(durations, vec![600, 264, 220]);
        for slot in page.countdowns() {
            assert!(page.display(&slot.target).is_ok());
        }
    }

    #[test]
    fn test_feed_threads_replies_under_pulses() {
        let page = PageKind::Feed.build();
        let rows: Vec<_> = page
            .feed_entries()
            .iter()
            .map(|entry| (entry.kind, entry.id, entry.depth))
            .collect();
        assert_eq!(
            rows,
            vec![
                (ContentKind::Pulse, 4, 0),
                (ContentKind::Reply, 21, 1),
                (ContentKind::Reply, 22, 2),
                (ContentKind::Pulse, 5, 0),
                (ContentKind::Reply, 23, 1),
                (ContentKind::Pulse, 6, 0),
            ]
        );
    }

    #[test]
    fn test_every_page_declares_the_shared_modals() {
        for kind in [PageKind::Pulse, PageKind::Feed] {
            let page = kind.build();
            for name in [CREATE_PULSE_MODAL, CREATE_REPLY_MODAL, CREATE_REPORT_MODAL] {
                assert!(page.modal(name).is_ok(), "{kind:?} lacks {name}");
            }
        }
    }

    #[test]
    fn test_report_category_defaults_to_blank() {
        let page = PageKind::Feed.build();
        let category = page
            .modal(CREATE_REPORT_MODAL)
            .unwrap()
            .field("report_category")
            .unwrap();
        assert_eq!(category.value(), "");
    }
}
