// SnapSleuth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SnapSleuth";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "SnapSleuth";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Snapshot format
// =============================================================================

/// Leading marker of a comment line (checked after trimming).
pub const COMMENT_PREFIX: char = '#';

/// Required record shape: `uid=<token> <type> "<text>"` at the start of a line.
pub const RECORD_PATTERN: &str = r#"^uid=(\S+)\s+(\w+)\s+"([^"]*)""#;

/// Optional `description="..."` attribute, anywhere on the line.
pub const DESCRIPTION_PATTERN: &str = r#"description="([^"]*)""#;

/// Optional `url="..."` attribute, anywhere on the line.
pub const URL_PATTERN: &str = r#"url="([^"]*)""#;

/// Element type of the page root node.
pub const ROOT_WEB_AREA_TYPE: &str = "RootWebArea";

/// Element type of a list row (used to identify favorites folders).
pub const LIST_ITEM_TYPE: &str = "listitem";

/// Element type of a modal dialog node.
pub const DIALOG_TYPE: &str = "dialog";

/// Element types treated as clickable.
pub const CLICKABLE_TYPES: &[&str] = &["button", "link"];

/// Title text of the "add to favorites" dialog.
pub const FAVORITE_DIALOG_TITLE: &str = "添加到收藏夹";

// =============================================================================
// Parsing limits
// =============================================================================

/// Maximum snapshot file size in bytes. Larger files are refused rather
/// than read into memory.
pub const MAX_SNAPSHOT_FILE_SIZE: u64 = 64 * 1024 * 1024; // 64 MiB

/// Maximum characters of a rejected line included in trace output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Control rules
// =============================================================================

/// Rule id of the built-in "like" button rule.
pub const LIKE_BUTTON_RULE: &str = "like_button";

/// Rule id of the built-in "favorite" button rule.
pub const FAVORITE_BUTTON_RULE: &str = "favorite_button";

/// Rule id of the built-in favorites dialog confirm button rule.
pub const FAVORITE_CONFIRM_RULE: &str = "favorite_confirm";

/// Maximum number of control rules (built-in + user).
pub const MAX_RULES: usize = 100;

/// Maximum size of a single rule file in bytes.
pub const MAX_RULE_FILE_SIZE: u64 = 64 * 1024; // 64 KB

/// Directory name for user-defined rules under the config root.
pub const RULES_DIR_NAME: &str = "rules";

// =============================================================================
// Output
// =============================================================================

/// Default number of search matches printed.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Default text preview width (characters) for search matches.
pub const DEFAULT_PREVIEW_CHARS: usize = 50;

/// Default text preview width (characters) for the summary view.
pub const DEFAULT_SUMMARY_PREVIEW_CHARS: usize = 30;

/// Upper bound accepted for `[query] max_results`.
pub const ABSOLUTE_MAX_RESULTS: usize = 1_000;

/// Upper bound accepted for the preview width settings.
pub const ABSOLUTE_MAX_PREVIEW_CHARS: usize = 500;

/// Maximum number of elements written by a single export.
pub const MAX_EXPORT_ELEMENTS: usize = 1_000_000;

// =============================================================================
// Logging and config
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Config file name inside the config root.
pub const CONFIG_FILE_NAME: &str = "config.toml";
