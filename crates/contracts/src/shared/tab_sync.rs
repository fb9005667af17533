//! Shared model for language tab synchronization.
//!
//! Holds the configuration read from the page and the label matching rule used
//! by both the restore and the broadcast paths.

use serde::Deserialize;

/// localStorage key holding the last selected tab label.
pub const DEFAULT_STORAGE_KEY: &str = "preferred-code-lang";

/// Tab headers rendered by MkDocs Material's `pymdownx.tabbed` extension.
pub const DEFAULT_LABEL_SELECTOR: &str = ".tabbed-labels label";

/// Id of the optional `<script type="application/json">` element with overrides.
pub const CONFIG_ELEMENT_ID: &str = "tab-sync-config";

const DEFAULT_LOG_LEVEL: &str = "info";
const KNOWN_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Trim the visible caption of a tab label.
pub fn normalize_label(raw: &str) -> &str {
    raw.trim()
}

/// Exact, case-sensitive comparison of two captions after trimming.
pub fn labels_match(candidate: &str, wanted: &str) -> bool {
    normalize_label(candidate) == normalize_label(wanted)
}

/// Page-level configuration. Every field has a default, so an empty object
/// (or no config element at all) gives the stock MkDocs Material behaviour.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct TabSyncConfig {
    pub storage_key: String,
    pub label_selector: String,
    /// Delay before re-broadcasting a click, in milliseconds.
    pub defer_ms: u32,
    pub log_level: String,
}

impl Default for TabSyncConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            label_selector: DEFAULT_LABEL_SELECTOR.to_string(),
            defer_ms: 0,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl TabSyncConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Lowercased level name, or `"info"` when the configured one is unknown.
    pub fn log_level_name(&self) -> &'static str {
        let wanted = self.log_level.trim().to_ascii_lowercase();
        KNOWN_LOG_LEVELS
            .iter()
            .find(|level| **level == wanted)
            .copied()
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
