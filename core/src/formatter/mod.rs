//! Command humanization.
//!
//! Turns raw command lines such as
//! `node /Users/me/Code/shop/node_modules/.bin/vite` into short labels
//! (`vite (shop)`). A [`FormatterChain`] tries its matchers in priority order;
//! the first one that claims the command and renders a non-empty label wins.
//! Anything left over goes through [`fallback_format`].
//!
//! Formatting is display-only and never affects record identity.

mod matchers;
mod paths;

use std::fmt;

pub use matchers::{
    AppBundleMatcher, BinSymlinkMatcher, HomebrewMatcher, NpmMatcher, PnpmMatcher, ProjectMatcher,
    SystemBinaryMatcher,
};
pub use paths::{base_name, extract_executable, extract_project_name, PROJECT_DIRS};

/// Raw commands longer than this are truncated by the fallback.
const MAX_RAW_LEN: usize = 30;

/// Executables that typically run a script given as first argument.
const SCRIPT_RUNNERS: &[&str] = &["node", "python", "python3", "ruby", "perl", "php"];

/// Script extensions stripped from the argument, applied in order.
const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".ts", ".py", ".rb"];

/// A rule that recognizes and renders a family of command lines.
pub trait CommandMatcher: Send + Sync {
    /// Matcher name (for debugging/logging).
    fn name(&self) -> &'static str;

    /// Whether this matcher claims the command.
    fn can_handle(&self, cmd: &str) -> bool;

    /// Render the label. `None` (or an empty string) passes the command on.
    fn render(&self, cmd: &str) -> Option<String>;
}

/// Ordered list of matchers with a total fallback.
pub struct FormatterChain {
    matchers: Vec<Box<dyn CommandMatcher>>,
}

impl FormatterChain {
    /// Create the default chain.
    ///
    /// The bin-symlink matcher must come before pnpm/npm, which both also see
    /// `node_modules/`.
    pub fn new() -> Self {
        Self {
            matchers: vec![
                Box::new(BinSymlinkMatcher::new()),
                Box::new(PnpmMatcher::new()),
                Box::new(NpmMatcher::new()),
                Box::new(HomebrewMatcher::new()),
                Box::new(AppBundleMatcher::new()),
                Box::new(ProjectMatcher),
                Box::new(SystemBinaryMatcher),
            ],
        }
    }

    /// Create a chain with no matchers; everything goes to the fallback.
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Add a matcher with the highest priority.
    pub fn register(&mut self, matcher: impl CommandMatcher + 'static) {
        self.matchers.insert(0, Box::new(matcher));
    }

    /// Matcher names in priority order.
    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Produce a readable label for a raw command line.
    ///
    /// Returns an empty string only for an empty command.
    pub fn format(&self, cmd: &str) -> String {
        if cmd.is_empty() {
            return String::new();
        }

        self.matchers
            .iter()
            .filter(|m| m.can_handle(cmd))
            .find_map(|m| m.render(cmd).filter(|label| !label.is_empty()))
            .unwrap_or_else(|| fallback_format(cmd))
    }
}

impl Default for FormatterChain {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormatterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterChain")
            .field("matchers", &self.matcher_names())
            .finish()
    }
}

/// Fallback when no matcher applies.
///
/// Script runners get their script name appended (`node (server)`); other
/// commands reduce to the executable name.
pub fn fallback_format(cmd: &str) -> String {
    let Some(executable) = extract_executable(cmd) else {
        return truncate_raw(cmd);
    };

    if SCRIPT_RUNNERS.contains(&executable) {
        if let Some(arg) = cmd.split_whitespace().nth(1) {
            // Flags and already-annotated arguments are left alone
            if !arg.starts_with('-') && !arg.starts_with('(') {
                let script = strip_script_extensions(base_name(arg));
                if !script.is_empty() && script != executable {
                    return format!("{} ({})", executable, script);
                }
            }
        }
    }

    executable.to_string()
}

fn strip_script_extensions(name: &str) -> &str {
    SCRIPT_EXTENSIONS
        .iter()
        .fold(name, |acc, ext| acc.strip_suffix(ext).unwrap_or(acc))
}

fn truncate_raw(cmd: &str) -> String {
    if cmd.chars().count() > MAX_RAW_LEN {
        let head: String = cmd.chars().take(MAX_RAW_LEN - 3).collect();
        format!("{}...", head)
    } else {
        cmd.to_string()
    }
}
