use thiserror::Error as ThisError;

///
/// ApplyError
///
/// Structured failures for checked difference application.
/// A rejected difference always leaves the receiver unchanged.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ApplyError {
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("stale element at index {index}: recorded removal does not match the sequence")]
    StaleElement { index: usize },

    #[error("duplicate key for {operation}")]
    DuplicateKey { operation: &'static str },

    #[error("missing key for {operation}")]
    MissingKey { operation: &'static str },

    #[error("stale value: recorded old value does not match the receiver")]
    StaleValue,

    #[error("difference application failed at {path}: {source}")]
    Context {
        path: String,
        #[source]
        source: Box<Self>,
    },
}

impl ApplyError {
    /// Prepend a field segment to the application error path.
    #[must_use]
    pub fn with_field(self, field: impl AsRef<str>) -> Self {
        self.with_path_segment(field.as_ref())
    }

    /// Prepend an index segment to the application error path.
    #[must_use]
    pub fn with_index(self, index: usize) -> Self {
        self.with_path_segment(format!("[{index}]"))
    }

    /// Return the full contextual path, if available.
    #[must_use]
    pub const fn path(&self) -> Option<&str> {
        match self {
            Self::Context { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Return the innermost, non-context error variant.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.leaf(),
            _ => self,
        }
    }

    #[must_use]
    fn with_path_segment(self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        match self {
            Self::Context { path, source } => Self::Context {
                path: Self::join_segments(segment.as_str(), path.as_str()),
                source,
            },
            source => Self::Context {
                path: segment,
                source: Box::new(source),
            },
        }
    }

    #[must_use]
    fn join_segments(prefix: &str, suffix: &str) -> String {
        if suffix.starts_with('[') {
            format!("{prefix}{suffix}")
        } else {
            format!("{prefix}.{suffix}")
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_field_wraps_the_root_cause() {
        let err = ApplyError::StaleValue.with_field("profile");

        assert_eq!(err.path(), Some("profile"));
        assert!(matches!(err.leaf(), ApplyError::StaleValue));
    }

    #[test]
    fn index_segments_join_without_a_separator() {
        let err = ApplyError::StaleElement { index: 2 }
            .with_index(2)
            .with_field("names");

        assert_eq!(err.path(), Some("names[2]"));
    }

    #[test]
    fn field_segments_join_with_a_dot() {
        let err = ApplyError::StaleValue.with_field("inner").with_field("outer");

        assert_eq!(err.path(), Some("outer.inner"));
        assert!(matches!(err.leaf(), ApplyError::StaleValue));
    }
}
