#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedAction {
    Quit,
    Up,
    Down,
    NewPulse,
    Reply,
    Report,
    ReportCreator,
}

impl FeedAction {
    pub const ALL: [Self; 7] = [
        Self::Quit,
        Self::Up,
        Self::Down,
        Self::NewPulse,
        Self::Reply,
        Self::Report,
        Self::ReportCreator,
    ];

    pub const fn description(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Up => "up",
            Self::Down => "down",
            Self::NewPulse => "new pulse",
            Self::Reply => "reply",
            Self::Report => "report",
            Self::ReportCreator => "report creator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Close,
    Submit,
    NextField,
    PrevField,
    NextOption,
    PrevOption,
}

impl ModalAction {
    pub const ALL: [Self; 6] = [
        Self::Close,
        Self::Submit,
        Self::NextField,
        Self::PrevField,
        Self::NextOption,
        Self::PrevOption,
    ];

    pub const fn description(self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Submit => "submit",
            Self::NextField => "next field",
            Self::PrevField => "previous field",
            Self::NextOption => "next option",
            Self::PrevOption => "previous option",
        }
    }
}
