pub mod actions;
mod defaults;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

pub use actions::{FeedAction, ModalAction};
use keybindings::KeybindingsConfig;
pub use loader::load;
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

use crate::countdown::LoopPolicy;
use crate::dispatcher::{ModalSchema, default_schemas};
use crate::page::PageKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Restart countdowns from their full duration when they reach zero.
    pub loop_on_expiry: bool,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            loop_on_expiry: true,
        }
    }
}

impl CountdownConfig {
    pub const fn policy(&self) -> LoopPolicy {
        if self.loop_on_expiry {
            LoopPolicy::Loop
        } else {
            LoopPolicy::Stop
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub page: PageKind,
    /// Per-modal target bindings and fields reset on close. Modals not
    /// listed here are closed without touching their form.
    #[serde(default = "default_schemas")]
    pub modals: Vec<ModalSchema>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            keybindings: KeybindingsConfig::default(),
            countdown: CountdownConfig::default(),
            page: PageKind::default(),
            modals: default_schemas(),
        }
    }
}
