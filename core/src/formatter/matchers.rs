//! Built-in command matchers.

use regex::Regex;

use super::paths::{
    extract_executable, extract_project_name, npm_package_name, pnpm_package_name, with_project,
    PROJECT_DIRS,
};
use super::CommandMatcher;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("built-in matcher pattern is valid")
}

/// Label for package-manager matchers: package if known, else executable,
/// both with the project name when there is one.
fn package_label(cmd: &str, package: Option<&str>) -> Option<String> {
    let project = extract_project_name(cmd);
    match (package.filter(|p| !p.is_empty()), project) {
        (Some(pkg), project) => Some(with_project(pkg, project)),
        (None, Some(project)) => {
            extract_executable(cmd).map(|exe| with_project(exe, Some(project)))
        }
        (None, None) => None,
    }
}

// =============================================================================
// Package managers
// =============================================================================

/// Commands running from `node_modules/.bin/` symlinks.
///
/// `node /path/to/project/node_modules/.bin/vite` -> `vite (project)`
pub struct BinSymlinkMatcher {
    re: Regex,
}

impl BinSymlinkMatcher {
    pub fn new() -> Self {
        Self {
            re: pattern(r"node_modules/\.bin/([^/\s]+)"),
        }
    }
}

impl CommandMatcher for BinSymlinkMatcher {
    fn name(&self) -> &'static str {
        "bin-symlink"
    }

    fn can_handle(&self, cmd: &str) -> bool {
        cmd.contains("node_modules/.bin/")
    }

    fn render(&self, cmd: &str) -> Option<String> {
        let bin = self.re.captures(cmd)?.get(1)?.as_str();
        Some(with_project(bin, extract_project_name(cmd)))
    }
}

/// Commands running from pnpm's content-addressed store.
pub struct PnpmMatcher {
    re: Regex,
}

impl PnpmMatcher {
    pub fn new() -> Self {
        Self {
            re: pattern(r"node_modules/\.pnpm/([^/]+)"),
        }
    }
}

impl CommandMatcher for PnpmMatcher {
    fn name(&self) -> &'static str {
        "pnpm"
    }

    fn can_handle(&self, cmd: &str) -> bool {
        cmd.contains("node_modules/.pnpm/")
    }

    fn render(&self, cmd: &str) -> Option<String> {
        let package = self
            .re
            .captures(cmd)
            .and_then(|c| c.get(1))
            .map(|m| pnpm_package_name(m.as_str()));
        package_label(cmd, package)
    }
}

/// Commands running from a flat npm `node_modules` tree.
pub struct NpmMatcher {
    re: Regex,
}

impl NpmMatcher {
    pub fn new() -> Self {
        Self {
            re: pattern(r"node_modules/([^/]+(?:/[^/]+)?)"),
        }
    }
}

impl CommandMatcher for NpmMatcher {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn can_handle(&self, cmd: &str) -> bool {
        cmd.contains("node_modules/") && !cmd.contains("node_modules/.pnpm/")
    }

    fn render(&self, cmd: &str) -> Option<String> {
        let package = self
            .re
            .captures(cmd)
            .and_then(|c| c.get(1))
            .map(|m| npm_package_name(m.as_str()));
        package_label(cmd, package)
    }
}

/// Commands installed through Homebrew (Apple Silicon or Intel prefix).
pub struct HomebrewMatcher {
    re: Regex,
}

impl HomebrewMatcher {
    pub fn new() -> Self {
        Self {
            re: pattern(r"/(?:opt/homebrew|usr/local)/Cellar/([^/]+)/"),
        }
    }
}

impl CommandMatcher for HomebrewMatcher {
    fn name(&self) -> &'static str {
        "homebrew"
    }

    fn can_handle(&self, cmd: &str) -> bool {
        cmd.contains("/opt/homebrew/Cellar/") || cmd.contains("/usr/local/Cellar/")
    }

    fn render(&self, cmd: &str) -> Option<String> {
        let formula = self.re.captures(cmd)?.get(1)?.as_str();
        Some(formula.to_string())
    }
}

// =============================================================================
// Locations
// =============================================================================

/// macOS `.app` bundles.
pub struct AppBundleMatcher {
    re: Regex,
}

impl AppBundleMatcher {
    pub fn new() -> Self {
        Self {
            re: pattern(r"/([^/]+)\.app/Contents/"),
        }
    }
}

impl CommandMatcher for AppBundleMatcher {
    fn name(&self) -> &'static str {
        "app-bundle"
    }

    fn can_handle(&self, cmd: &str) -> bool {
        cmd.contains(".app/Contents/")
    }

    fn render(&self, cmd: &str) -> Option<String> {
        let app = self.re.captures(cmd)?.get(1)?.as_str();
        Some(app.to_string())
    }
}

/// Commands running from common project directories.
pub struct ProjectMatcher;

impl CommandMatcher for ProjectMatcher {
    fn name(&self) -> &'static str {
        "project"
    }

    fn can_handle(&self, cmd: &str) -> bool {
        PROJECT_DIRS.iter().any(|dir| cmd.contains(dir))
    }

    fn render(&self, cmd: &str) -> Option<String> {
        let project = extract_project_name(cmd)?;
        let exe = extract_executable(cmd)?;
        Some(with_project(exe, Some(project)))
    }
}

/// System binary prefixes.
const SYSTEM_PATHS: &[&str] = &[
    "/usr/bin/",
    "/usr/sbin/",
    "/usr/libexec/",
    "/bin/",
    "/sbin/",
    "/System/",
];

/// System binaries, reduced to the binary name.
pub struct SystemBinaryMatcher;

impl CommandMatcher for SystemBinaryMatcher {
    fn name(&self) -> &'static str {
        "system"
    }

    fn can_handle(&self, cmd: &str) -> bool {
        SYSTEM_PATHS.iter().any(|prefix| cmd.starts_with(prefix))
    }

    fn render(&self, cmd: &str) -> Option<String> {
        extract_executable(cmd).map(str::to_string)
    }
}
