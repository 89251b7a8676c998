//! Domain values the host page renders and routes into modals.

use std::fmt;

/// Content categories a modal action can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    User,
    Pulse,
    Reply,
}

impl ContentKind {
    /// Content-type identifier as written into hidden form fields by the
    /// render layer.
    pub const fn content_type_id(self) -> &'static str {
        match self {
            Self::User => "6",
            Self::Pulse => "12",
            Self::Reply => "13",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::User => "user",
            Self::Pulse => "pulse",
            Self::Reply => "reply",
        };
        f.write_str(name)
    }
}

/// The (content type, object id) pair identifying which entity a modal
/// action applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetRef {
    pub content_type: String,
    pub object_id: String,
}

impl TargetRef {
    pub fn new(content_type: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            object_id: object_id.into(),
        }
    }

    pub fn of(kind: ContentKind, object_id: u64) -> Self {
        Self::new(kind.content_type_id(), object_id.to_string())
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.content_type, self.object_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCategory {
    Spam,
    Sexual,
    Hate,
    Violence,
    IllegalGoods,
    Bullying,
    IntellectualProperty,
    SelfInjury,
    Scam,
    FalseInfo,
}

impl ReportCategory {
    pub const ALL: [Self; 10] = [
        Self::Spam,
        Self::Sexual,
        Self::Hate,
        Self::Violence,
        Self::IllegalGoods,
        Self::Bullying,
        Self::IntellectualProperty,
        Self::SelfInjury,
        Self::Scam,
        Self::FalseInfo,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Spam => "SPM",
            Self::Sexual => "SEX",
            Self::Hate => "HAT",
            Self::Violence => "VIO",
            Self::IllegalGoods => "ILG",
            Self::Bullying => "BUL",
            Self::IntellectualProperty => "INP",
            Self::SelfInjury => "INJ",
            Self::Scam => "SCM",
            Self::FalseInfo => "FLS",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Spam => "Spam",
            Self::Sexual => "Nudity or sexual activity",
            Self::Hate => "Hate speech or symbols",
            Self::Violence => "Violence or dangerous organisations",
            Self::IllegalGoods => "Sale of illegal or regulated goods",
            Self::Bullying => "Bullying or harassment",
            Self::IntellectualProperty => "Intellectual property violation or impersonation",
            Self::SelfInjury => "Suicide or self-injury",
            Self::Scam => "Scam or fraud",
            Self::FalseInfo => "False or misleading information",
        }
    }
}

/// A short-lived post shown on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pulse {
    pub id: u64,
    pub creator_id: u64,
    pub creator: String,
    pub message: String,
    /// Seconds until the pulse expires, driving its countdown display.
    pub expires_in: u64,
    pub replies: Vec<Reply>,
}

impl Pulse {
    /// Element id of the display target showing this pulse's countdown.
    pub fn countdown_target(&self) -> String {
        format!("pulse-{}-countdown", self.id)
    }

    /// The pulse followed by its reply thread, depth first.
    pub fn entries(&self) -> Vec<FeedEntry<'_>> {
        let mut entries = vec![FeedEntry {
            kind: ContentKind::Pulse,
            id: self.id,
            creator_id: self.creator_id,
            creator: &self.creator,
            message: &self.message,
            depth: 0,
        }];
        push_replies(&self.replies, 1, &mut entries);
        entries
    }
}

/// A reply to a pulse or to another reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub id: u64,
    pub creator_id: u64,
    pub creator: String,
    pub message: String,
    pub replies: Vec<Self>,
}

impl Reply {
    #[must_use]
    pub fn with_reply(mut self, reply: Self) -> Self {
        self.replies.push(reply);
        self
    }
}

fn push_replies<'a>(replies: &'a [Reply], depth: usize, entries: &mut Vec<FeedEntry<'a>>) {
    for reply in replies {
        entries.push(FeedEntry {
            kind: ContentKind::Reply,
            id: reply.id,
            creator_id: reply.creator_id,
            creator: &reply.creator,
            message: &reply.message,
            depth,
        });
        push_replies(&reply.replies, depth + 1, entries);
    }
}

/// One selectable feed row: a pulse, or a reply `depth` levels below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedEntry<'a> {
    pub kind: ContentKind,
    pub id: u64,
    pub creator_id: u64,
    pub creator: &'a str,
    pub message: &'a str,
    pub depth: usize,
}

impl FeedEntry<'_> {
    /// The pulse or reply itself.
    pub fn target(&self) -> TargetRef {
        TargetRef::of(self.kind, self.id)
    }

    pub fn creator_target(&self) -> TargetRef {
        TargetRef::of(ContentKind::User, self.creator_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_ref_of_kind() {
        let target = TargetRef::of(ContentKind::Pulse, 7);
        assert_eq!(target.content_type, "12");
        assert_eq!(target.object_id, "7");
        assert_eq!(target.to_string(), "12:7");
    }

    #[test]
    fn test_thread_entries_are_depth_first() {
        let reply = |id, message: &str| Reply {
            id,
            creator_id: 9,
            creator: "jo".to_string(),
            message: message.to_string(),
            replies: Vec::new(),
        };
        let pulse = Pulse {
            id: 1,
            creator_id: 2,
            creator: "sam".to_string(),
            message: "hi".to_string(),
            expires_in: 60,
            replies: vec![reply(10, "a").with_reply(reply(11, "b")), reply(12, "c")],
        };

        let rows: Vec<_> = pulse
            .entries()
            .iter()
            .map(|entry| (entry.kind.to_string(), entry.id, entry.depth))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("pulse".to_string(), 1, 0),
                ("reply".to_string(), 10, 1),
                ("reply".to_string(), 11, 2),
                ("reply".to_string(), 12, 1),
            ]
        );

        let entries = pulse.entries();
        assert_eq!(entries[2].target(), TargetRef::new("13", "11"));
        assert_eq!(entries[2].creator_target(), TargetRef::new("6", "9"));
    }

    #[test]
    fn test_report_category_codes_are_unique() {
        let mut codes: Vec<_> = ReportCategory::ALL.iter().map(|c| c.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ReportCategory::ALL.len());
    }
}
