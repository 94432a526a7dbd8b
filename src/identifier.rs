//! Dotted package/bundle identifiers (`com.example.app`).
//!
//! The same value is used two ways: as a text token inside build
//! descriptors and as a relative directory path under the Android source
//! base. Both uses rely on every segment being non-empty and free of path
//! separators, so that is checked on every construction.

use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a string was rejected as a package identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("segment {index} is empty")]
    EmptySegment { index: usize },

    #[error("segment `{segment}` contains a path separator")]
    PathSeparator { segment: String },

    #[error("segment `{segment}` must start with a letter")]
    BadStart { segment: String },

    #[error("segment `{segment}` contains `{ch}` (only ASCII letters, digits and `_` are allowed)")]
    BadChar { segment: String, ch: char },

    #[error("expected at least {min} segments, got {got}")]
    TooFewSegments { min: usize, got: usize },
}

/// Minimum number of segments Android accepts for an application id
pub const MIN_SEGMENTS: usize = 2;

/// A dot-delimited identifier whose segments double as directory names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageIdentifier {
    raw: String,
}

impl PackageIdentifier {
    /// Parse a user-supplied identifier with the full rule set.
    ///
    /// At least two segments; each starts with an ASCII letter and holds only
    /// ASCII letters, digits and underscores.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let id = Self::from_existing(value)?;

        let count = id.segments().count();
        if count < MIN_SEGMENTS {
            return Err(IdentifierError::TooFewSegments {
                min: MIN_SEGMENTS,
                got: count,
            });
        }

        for segment in id.segments() {
            let mut chars = segment.chars();
            if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
                return Err(IdentifierError::BadStart {
                    segment: segment.to_string(),
                });
            }
            if let Some(ch) = segment
                .chars()
                .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
            {
                return Err(IdentifierError::BadChar {
                    segment: segment.to_string(),
                    ch,
                });
            }
        }

        Ok(id)
    }

    /// Accept an identifier already present in a project file.
    ///
    /// Only the path-safety invariant is enforced: segments are non-empty
    /// and contain no separators. Naming rules are left to whoever wrote
    /// the file.
    pub fn from_existing(value: &str) -> Result<Self, IdentifierError> {
        if value.is_empty() {
            return Err(IdentifierError::Empty);
        }

        for (index, segment) in value.split('.').enumerate() {
            if segment.is_empty() {
                return Err(IdentifierError::EmptySegment { index });
            }
            if segment.contains(['/', '\\']) {
                return Err(IdentifierError::PathSeparator {
                    segment: segment.to_string(),
                });
            }
        }

        Ok(Self {
            raw: value.to_string(),
        })
    }

    /// The dotted form, exactly as parsed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }

    /// First segment (`com` in `com.example.app`)
    pub fn first_segment(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    /// Segments joined with the platform separator: `com/example/app`
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for PackageIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PackageIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse_valid() {
        let id = PackageIdentifier::parse("com.new.app2").unwrap();
        assert_eq!(id.as_str(), "com.new.app2");
        assert_eq!(id.segments().collect::<Vec<_>>(), vec!["com", "new", "app2"]);
        assert_eq!(id.first_segment(), "com");
        assert_eq!(id.to_relative_path(), Path::new("com").join("new").join("app2"));
    }

    #[test]
    fn test_parse_allows_underscores() {
        assert!(PackageIdentifier::parse("com.my_company.app_name").is_ok());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert_eq!(PackageIdentifier::parse(""), Err(IdentifierError::Empty));
        assert_eq!(
            PackageIdentifier::parse("com..app"),
            Err(IdentifierError::EmptySegment { index: 1 })
        );
        assert_eq!(
            PackageIdentifier::parse("com.app."),
            Err(IdentifierError::EmptySegment { index: 2 })
        );
    }

    #[test]
    fn test_parse_rejects_path_separators() {
        assert!(matches!(
            PackageIdentifier::parse("com.evil/../x.app"),
            Err(IdentifierError::PathSeparator { .. })
        ));
        assert!(matches!(
            PackageIdentifier::parse("com.a\\b"),
            Err(IdentifierError::PathSeparator { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_segments() {
        assert!(matches!(
            PackageIdentifier::parse("com.1app"),
            Err(IdentifierError::BadStart { .. })
        ));
        assert!(matches!(
            PackageIdentifier::parse("com.my-app"),
            Err(IdentifierError::BadChar { ch: '-', .. })
        ));
        assert_eq!(
            PackageIdentifier::parse("app"),
            Err(IdentifierError::TooFewSegments { min: 2, got: 1 })
        );
    }

    #[test]
    fn test_from_existing_is_lenient() {
        // Single segment and dashes are tolerated for ids found on disk
        let id = PackageIdentifier::from_existing("legacy-app").unwrap();
        assert_eq!(id.to_relative_path(), PathBuf::from("legacy-app"));

        assert!(PackageIdentifier::from_existing("com..x").is_err());
        assert!(PackageIdentifier::from_existing("com/x").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = PackageIdentifier::parse("com.example.app").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"com.example.app\"");
    }
}
