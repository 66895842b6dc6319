//! Request Scope - Key Namespacing
//!
//! Derives the key prefix that isolates one deployed application instance
//! from another when several of them share a single cache store.

/// Request context used to namespace cache keys
///
/// Carries the two ambient values a web deployment has: the request host and
/// the path of the executing script. Both are optional; a CLI or worker
/// process simply uses [`RequestScope::detached`] and logical names pass
/// through unprefixed.
///
/// # Example
///
/// ```rust
/// use scoped_cache::RequestScope;
///
/// let scope = RequestScope::new(Some("example.com"), Some("/app/public/index.php"));
/// assert_eq!(scope.key("settings"), "example_com_app_public_settings");
///
/// let detached = RequestScope::detached();
/// assert_eq!(detached.key("settings"), "settings");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestScope {
    host: Option<String>,
    script_path: Option<String>,
}

impl RequestScope {
    /// Create a scope from optional host and script path
    pub fn new(host: Option<&str>, script_path: Option<&str>) -> Self {
        Self {
            host: host.map(str::to_owned),
            script_path: script_path.map(str::to_owned),
        }
    }

    /// Scope with no ambient context
    ///
    /// Logical names are used as cache keys unchanged.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// The host this scope was built from, if any
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The script path this scope was built from, if any
    #[must_use]
    pub fn script_path(&self) -> Option<&str> {
        self.script_path.as_deref()
    }

    /// Derive the namespaced cache key for a logical name
    ///
    /// The base path is the script path with its final segment (the script
    /// file name) removed and surrounding slashes trimmed. `.` and `/` in
    /// host and base path are replaced with `_` so the resulting key is a
    /// flat identifier:
    ///
    /// - host and script path present: `host_base_name`
    /// - only script path present: `base_name`
    /// - neither present: `name` unchanged
    ///
    /// A script path without any directory component yields an empty base
    /// path rather than an error.
    #[must_use]
    pub fn key(&self, logical_name: &str) -> String {
        let base = self.script_path.as_deref().map(base_path);

        match (&self.host, base) {
            (Some(host), base) => format!(
                "{}_{}_{}",
                sanitize(host),
                sanitize(base.unwrap_or_default()),
                logical_name
            ),
            (None, Some(base)) => format!("{}_{logical_name}", sanitize(base)),
            (None, None) => logical_name.to_owned(),
        }
    }
}

/// Strip the final path segment, then trim leading/trailing slashes
fn base_path(script_path: &str) -> &str {
    let dir = match script_path.rfind('/') {
        Some(idx) => script_path.get(..idx).unwrap_or_default(),
        None => "",
    };
    dir.trim_matches('/')
}

/// Replace `.` and `/` so host/path material becomes a flat key segment
fn sanitize(segment: &str) -> String {
    segment.replace(['.', '/'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_scope_passes_name_through() {
        let scope = RequestScope::detached();
        assert_eq!(scope.key("settings"), "settings");
        assert_eq!(scope.key("user.profile"), "user.profile");
    }

    #[test]
    fn host_and_path_prefix_both_segments() {
        let scope = RequestScope::new(Some("example.com"), Some("/app/public/index.php"));
        assert_eq!(scope.key("settings"), "example_com_app_public_settings");
    }

    #[test]
    fn path_only_prefixes_base_path() {
        let scope = RequestScope::new(None, Some("/public/index.php"));
        assert_eq!(scope.key("settings"), "public_settings");
    }

    #[test]
    fn key_is_deterministic() {
        let scope = RequestScope::new(Some("shop.example.org"), Some("/var/www/app.php"));
        assert_eq!(scope.key("carts"), scope.key("carts"));
    }

    #[test]
    fn no_dots_or_slashes_survive_from_context() {
        let scope = RequestScope::new(Some("a.b.c.example.com"), Some("/deep/ly/nested/run.php"));
        let prefix_len = scope.key("").len();
        let prefix = scope.key("x");
        let context_part = prefix.get(..prefix_len).unwrap_or(&prefix);
        assert!(!context_part.contains('.'));
        assert!(!context_part.contains('/'));
    }

    #[test]
    fn path_without_directory_yields_empty_base() {
        let scope = RequestScope::new(None, Some("index.php"));
        assert_eq!(scope.key("settings"), "_settings");

        let scope = RequestScope::new(Some("example.com"), Some("index.php"));
        assert_eq!(scope.key("settings"), "example_com__settings");
    }

    #[test]
    fn host_without_path_uses_empty_base() {
        let scope = RequestScope::new(Some("example.com"), None);
        assert_eq!(scope.key("settings"), "example_com__settings");
    }

    #[test]
    fn root_script_trims_to_empty_base() {
        let scope = RequestScope::new(None, Some("/index.php"));
        assert_eq!(scope.key("settings"), "_settings");
    }
}
