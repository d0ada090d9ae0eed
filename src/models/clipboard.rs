//! Cut/copy clipboard record.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardMode {
    Copy,
    Cut,
}

impl ClipboardMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClipboardMode::Copy => "copy",
            ClipboardMode::Cut => "cut",
        }
    }
}

/// The staged clipboard. Persisted as `{"mode": "cut" | "copy" | null, "files": [..]}`.
///
/// Invariant: `paths` is empty iff `mode` is `None`, and no path repeats.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClipboardRecord {
    pub mode: Option<ClipboardMode>,
    #[serde(rename = "files", default)]
    pub paths: Vec<String>,
}

impl ClipboardRecord {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a record from staged paths, keeping the first occurrence of each path.
    /// An empty path list yields the empty record.
    pub fn new(mode: ClipboardMode, paths: impl IntoIterator<Item = String>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for path in paths {
            if !unique.contains(&path) {
                unique.push(path);
            }
        }
        if unique.is_empty() {
            return Self::empty();
        }
        Self {
            mode: Some(mode),
            paths: unique,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Re-establish the invariant on a record that came from outside (e.g. storage).
    pub fn normalized(self) -> Self {
        match self.mode {
            Some(mode) => Self::new(mode, self.paths),
            None => Self::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dedupes_preserving_first_occurrence() {
        let record = ClipboardRecord::new(
            ClipboardMode::Cut,
            vec!["b".to_string(), "a".to_string(), "b".to_string()],
        );
        assert_eq!(record.mode, Some(ClipboardMode::Cut));
        assert_eq!(record.paths, vec!["b", "a"]);
    }

    #[test]
    fn test_new_with_no_paths_is_empty() {
        let record = ClipboardRecord::new(ClipboardMode::Copy, Vec::new());
        assert!(record.is_empty());
        assert!(record.paths.is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let record = ClipboardRecord::new(ClipboardMode::Copy, vec!["docs/a.txt".to_string()]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["mode"], "copy");
        assert_eq!(json["files"][0], "docs/a.txt");

        let empty = serde_json::to_value(ClipboardRecord::empty()).unwrap();
        assert!(empty["mode"].is_null());
        assert_eq!(empty["files"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_normalized_repairs_inconsistent_records() {
        let orphan_paths = ClipboardRecord {
            mode: None,
            paths: vec!["a".to_string()],
        };
        assert_eq!(orphan_paths.normalized(), ClipboardRecord::empty());

        let modeless = ClipboardRecord {
            mode: Some(ClipboardMode::Cut),
            paths: Vec::new(),
        };
        assert_eq!(modeless.normalized(), ClipboardRecord::empty());
    }
}
