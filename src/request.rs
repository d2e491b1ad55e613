//! Release requests embedded in issue titles, and the set of users allowed to
//! make them.

use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

// Line terminators as JavaScript's `.` treats them
static RELEASE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!release ([^\r\n\x{2028}\x{2029}]*)").expect("release pattern is valid")
});

/// A `!release <version>` directive parsed from an issue title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub version: String,
}

impl ReleaseRequest {
    /// Extracts a release request from an issue title.
    ///
    /// The directive may appear anywhere in the title. The version is the
    /// rest of that line, taken verbatim (it may be empty).
    ///
    /// # Example
    /// ```rust
    /// # use release_gate::request::ReleaseRequest;
    /// let request = ReleaseRequest::parse("!release 2.3.1").unwrap();
    /// assert_eq!(request.version, "2.3.1");
    /// assert!(ReleaseRequest::parse("Please release").is_none());
    /// ```
    pub fn parse(title: &str) -> Option<Self> {
        let captures = RELEASE_PATTERN.captures(title)?;
        let version = captures.get(1)?.as_str().to_string();
        Some(ReleaseRequest { version })
    }

    /// Whether the version parses as semantic version, allowing a `v` prefix
    pub fn is_semver(&self) -> bool {
        let clean = self
            .version
            .strip_prefix('v')
            .or_else(|| self.version.strip_prefix('V'))
            .unwrap_or(&self.version);
        semver::Version::parse(clean).is_ok()
    }
}

/// Identities permitted to request a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    users: BTreeSet<String>,
}

impl AllowList {
    /// Parses a comma-separated list, trimming entries and dropping empty ones
    pub fn parse(raw: &str) -> Self {
        raw.split(',').collect()
    }

    pub fn contains(&self, login: &str) -> bool {
        self.users.contains(login)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let users = iter
            .into_iter()
            .map(|user| user.as_ref().trim().to_string())
            .filter(|user| !user.is_empty())
            .collect();
        AllowList { users }
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let users: Vec<&str> = self.users.iter().map(String::as_str).collect();
        write!(f, "{}", users.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_title() {
        let request = ReleaseRequest::parse("!release 2.3.1").unwrap();
        assert_eq!(request.version, "2.3.1");
    }

    #[test]
    fn test_non_matching_titles() {
        for title in ["Please release", "release 2.3.1", "!release", "!Release 1.0.0", ""] {
            assert!(
                ReleaseRequest::parse(title).is_none(),
                "'{}' should not match",
                title
            );
        }
    }

    #[test]
    fn test_directive_is_not_anchored() {
        let request = ReleaseRequest::parse("deploy: !release v1.0.0-rc.1").unwrap();
        assert_eq!(request.version, "v1.0.0-rc.1");
    }

    #[test]
    fn test_version_is_taken_verbatim() {
        let versions = [
            "2.3.1",
            "v10.0.0",
            "1.0.0 with notes",
            "`1.2.3`",
            " padded ",
            "",
            "ünïcode-🚀",
        ];
        for version in versions {
            let title = format!("!release {}", version);
            let request = ReleaseRequest::parse(&title).unwrap();
            assert_eq!(request.version, version);
        }
    }

    #[test]
    fn test_version_stops_at_newline() {
        let request = ReleaseRequest::parse("!release 1.2.3\nsecond line").unwrap();
        assert_eq!(request.version, "1.2.3");
    }

    #[test]
    fn test_version_stops_at_carriage_return() {
        let request = ReleaseRequest::parse("!release 1.2.3\r").unwrap();
        assert_eq!(request.version, "1.2.3");

        let request = ReleaseRequest::parse("!release 1.2.3\r\nbody").unwrap();
        assert_eq!(request.version, "1.2.3");
    }

    #[test]
    fn test_version_stops_at_unicode_line_separators() {
        let request = ReleaseRequest::parse("!release 4.5.6\u{2028}tail").unwrap();
        assert_eq!(request.version, "4.5.6");

        let request = ReleaseRequest::parse("!release 4.5.6\u{2029}tail").unwrap();
        assert_eq!(request.version, "4.5.6");
    }

    #[test]
    fn test_semver_check() {
        let valid = ReleaseRequest {
            version: "v1.2.3".to_string(),
        };
        assert!(valid.is_semver());

        let prerelease = ReleaseRequest {
            version: "1.2.3-beta.1".to_string(),
        };
        assert!(prerelease.is_semver());

        let loose = ReleaseRequest {
            version: "1.2".to_string(),
        };
        assert!(!loose.is_semver());
    }

    #[test]
    fn test_allow_list_parse_trims_and_drops_empty() {
        let list = AllowList::parse("alice, bob,,carol ,");
        assert_eq!(list.len(), 3);
        assert!(list.contains("alice"));
        assert!(list.contains("bob"));
        assert!(list.contains("carol"));
        assert!(!list.contains(""));
    }

    #[test]
    fn test_allow_list_is_case_sensitive() {
        let list = AllowList::parse("Alice");
        assert!(list.contains("Alice"));
        assert!(!list.contains("alice"));
    }

    #[test]
    fn test_allow_list_empty() {
        let list = AllowList::parse("");
        assert!(list.is_empty());
        assert!(!list.contains("anyone"));
    }

    #[test]
    fn test_allow_list_display() {
        let list: AllowList = ["bob", "alice"].into_iter().collect();
        assert_eq!(list.to_string(), "alice,bob");
    }
}
