//! Allow-list loading
//!
//! The allow-list is a flat JSON object mapping usernames to a boolean flag:
//!
//! ```json
//! {"alice": true, "bob": false}
//! ```
//!
//! Loading is all-or-nothing. Any read failure, any value that is not a
//! boolean, any nesting, and any empty username rejects the whole resource.
//! Nothing here logs or exits; callers decide what a failure means.

use crate::error::{AllowGateError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Immutable username -> flag mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowList {
    entries: HashMap<String, bool>,
}

impl AllowList {
    /// Read and parse an allow-list from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AllowGateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|err| match err {
            AllowGateError::Parse { source, .. } => AllowGateError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Parse an allow-list from its JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::parse(content)
    }

    fn parse(content: &str) -> Result<Self> {
        let entries: HashMap<String, bool> = serde_json::from_str(content)
            .map_err(|source| AllowGateError::Parse { path: None, source })?;

        if entries.contains_key("") {
            return Err(AllowGateError::InvalidEntry(
                "usernames must not be empty".to_string(),
            ));
        }

        Ok(AllowList { entries })
    }

    /// Exact-match key presence
    pub fn contains(&self, username: &str) -> bool {
        self.entries.contains_key(username)
    }

    /// Flag stored for `username`, if present
    pub fn flag(&self, username: &str) -> Option<bool> {
        self.entries.get(username).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the usernames in unspecified order
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flat_object() {
        let list = AllowList::from_json_str(r#"{"alice": true, "bob": false}"#).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("alice"));
        assert!(list.contains("bob"));
        assert_eq!(list.flag("alice"), Some(true));
        assert_eq!(list.flag("bob"), Some(false));
        assert_eq!(list.flag("carol"), None);
    }

    #[test]
    fn test_empty_object_is_valid() {
        let list = AllowList::from_json_str("{}").unwrap();
        assert!(list.is_empty());
        assert!(!list.contains(""));
    }

    #[test]
    fn test_keys_are_case_and_whitespace_sensitive() {
        let list = AllowList::from_json_str(r#"{"Alice": true, " bob ": true}"#).unwrap();
        assert!(list.contains("Alice"));
        assert!(!list.contains("alice"));
        assert!(list.contains(" bob "));
        assert!(!list.contains("bob"));
    }

    #[test]
    fn test_rejects_non_boolean_values() {
        for content in [
            r#"{"alice": 1}"#,
            r#"{"alice": "true"}"#,
            r#"{"alice": null}"#,
            r#"{"alice": {"flag": true}}"#,
            r#"{"alice": [true]}"#,
        ] {
            let err = AllowList::from_json_str(content).unwrap_err();
            assert!(
                matches!(err, AllowGateError::Parse { path: None, .. }),
                "{} should be a parse error, got {:?}",
                content,
                err
            );
        }
    }

    #[test]
    fn test_rejects_wrong_top_level_shape() {
        for content in ["[]", r#"["alice"]"#, "true", r#""alice""#, "", "{"] {
            assert!(AllowList::from_json_str(content).is_err(), "{:?}", content);
        }
    }

    #[test]
    fn test_rejects_trailing_content() {
        let err = AllowList::from_json_str(r#"{"alice": true} {"bob": true}"#).unwrap_err();
        assert!(matches!(err, AllowGateError::Parse { .. }));
    }

    #[test]
    fn test_rejects_empty_username() {
        let err = AllowList::from_json_str(r#"{"": true, "alice": true}"#).unwrap_err();
        assert!(matches!(err, AllowGateError::InvalidEntry(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{\n  \"alice\": true,\n  \"mallory\": false\n}}").unwrap();
        file.flush().unwrap();

        let list = AllowList::from_path(file.path()).unwrap();
        let mut names: Vec<_> = list.usernames().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["alice", "mallory"]);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let err = AllowList::from_path(&path).unwrap_err();
        match err {
            AllowGateError::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected IO error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_path_malformed_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"alice\": yes}}").unwrap();
        file.flush().unwrap();

        let err = AllowList::from_path(file.path()).unwrap_err();
        match err {
            AllowGateError::Parse { path, .. } => {
                assert_eq!(path.as_deref(), Some(file.path()));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_serializes_back_to_flat_object() {
        let list = AllowList::from_json_str(r#"{"alice": true}"#).unwrap();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json, serde_json::json!({"alice": true}));
    }
}
