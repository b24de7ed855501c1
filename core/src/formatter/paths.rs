//! Path helpers shared by the matchers and the fallback.

/// Common project directory indicators, in lookup order.
pub const PROJECT_DIRS: &[&str] = &[
    "/Code/",
    "/Projects/",
    "/Developer/",
    "/Sites/",
    "/src/",
    "/repos/",
    "/git/",
    "/workspace/",
    "/Cloudflare/",
    "/OSS/",
];

/// Last component of a `/`-separated path. Trailing slashes are ignored.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return path;
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Base name of the executable (first whitespace-separated token).
pub fn extract_executable(cmd: &str) -> Option<&str> {
    cmd.split_whitespace().next().map(base_name)
}

/// Project name: first path segment after a known project directory.
pub fn extract_project_name(path: &str) -> Option<&str> {
    PROJECT_DIRS.iter().find_map(|dir| {
        let idx = path.find(dir)?;
        let remaining = &path[idx + dir.len()..];
        remaining.split('/').next().filter(|s| !s.is_empty())
    })
}

/// Package name from a pnpm store segment.
///
/// `@cloudflare+workerd@1.2.3` -> `workerd`, `vite@5.0.0` -> `vite`.
pub fn pnpm_package_name(segment: &str) -> &str {
    if segment.starts_with('@') {
        if let Some((_, after_plus)) = segment.split_once('+') {
            return strip_version(after_plus);
        }
    }
    strip_version(segment)
}

/// Package name from an npm `node_modules` path (segment plus optional second).
///
/// `@cloudflare/workers-sdk` -> `workers-sdk`, `vite/bin` -> `vite`.
pub fn npm_package_name(path: &str) -> &str {
    let mut parts = path.split('/');
    let first = parts.next().unwrap_or(path);
    if first.starts_with('@') {
        if let Some(name) = parts.next() {
            return name;
        }
    }
    first
}

fn strip_version(name: &str) -> &str {
    name.split_once('@').map_or(name, |(pkg, _)| pkg)
}

/// Join a label with its project, if any.
pub fn with_project(label: &str, project: Option<&str>) -> String {
    match project {
        Some(project) => format!("{} ({})", label, project),
        None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("/usr/bin/node"), "node");
        assert_eq!(base_name("node"), "node");
        assert_eq!(base_name("/opt/app/"), "app");
        assert_eq!(base_name("/"), "/");
    }

    #[test]
    fn test_extract_executable() {
        assert_eq!(extract_executable("/usr/bin/ssh-agent -l"), Some("ssh-agent"));
        assert_eq!(extract_executable("nginx"), Some("nginx"));
        assert_eq!(extract_executable("   "), None);
    }

    #[test]
    fn test_extract_project_name() {
        assert_eq!(
            extract_project_name("/Users/jilles/Code/my-project/src/index.js"),
            Some("my-project")
        );
        assert_eq!(
            extract_project_name("/Users/jilles/Projects/webapp/server.js"),
            Some("webapp")
        );
        assert_eq!(
            extract_project_name("/Users/jilles/Cloudflare/workers-sdk/packages"),
            Some("workers-sdk")
        );
        assert_eq!(extract_project_name("/usr/bin/node"), None);
    }

    #[test]
    fn test_project_dir_order_wins_over_position() {
        // "/Code/" is listed before "/src/" even though "/src/" comes first
        assert_eq!(
            extract_project_name("/home/me/src/tools/Code/app/main.js"),
            Some("app")
        );
    }

    #[test]
    fn test_empty_segment_tries_next_dir() {
        assert_eq!(extract_project_name("/x/Code//y/repos/api/run"), Some("api"));
    }

    #[test]
    fn test_pnpm_package_name() {
        assert_eq!(pnpm_package_name("@cloudflare+workerd@1.2.3"), "workerd");
        assert_eq!(pnpm_package_name("vite@5.0.0"), "vite");
        assert_eq!(pnpm_package_name("@types+node@20.0.0"), "node");
        assert_eq!(pnpm_package_name("plain"), "plain");
    }

    #[test]
    fn test_npm_package_name() {
        assert_eq!(npm_package_name("vite/bin"), "vite");
        assert_eq!(npm_package_name("@cloudflare/workers-sdk"), "workers-sdk");
        assert_eq!(npm_package_name("express"), "express");
    }
}
