use serde::{Deserialize, Serialize};

use crate::config::key::KeyBinding;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedKeybindings {
    pub quit: KeyBinding,
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub new_pulse: KeyBinding,
    pub reply: KeyBinding,
    pub report: KeyBinding,
    pub report_creator: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalKeybindings {
    pub close: KeyBinding,
    pub submit: KeyBinding,
    pub next_field: KeyBinding,
    pub prev_field: KeyBinding,
    pub next_option: KeyBinding,
    pub prev_option: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeybindingsConfig {
    #[serde(default)]
    pub feed: FeedKeybindings,
    #[serde(default)]
    pub modal: ModalKeybindings,
}
