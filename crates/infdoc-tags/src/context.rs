//! Tag resolution context.
//!
//! Carries source location information so that build errors point at the
//! offending tag.

use std::fmt;
use std::path::{Path, PathBuf};

/// Context provided by the document renderer for each tag it resolves.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use infdoc_tags::ResolveContext;
///
/// let ctx = ResolveContext {
///     source_path: Some(Path::new("docs/workflows.md")),
///     line: 42,
/// };
///
/// assert_eq!(ctx.location().to_string(), "docs/workflows.md:42");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveContext<'a> {
    /// Path to the source document being built (if known).
    pub source_path: Option<&'a Path>,
    /// Line number where the tag appears (1-indexed, 0 if unknown).
    pub line: usize,
}

impl ResolveContext<'_> {
    /// Context for a tag at `line` of an unnamed document.
    #[must_use]
    pub fn at_line(line: usize) -> Self {
        Self {
            source_path: None,
            line,
        }
    }

    /// Same source document, different line.
    #[must_use]
    pub fn with_line(self, line: usize) -> Self {
        Self { line, ..self }
    }

    /// Owned location for embedding in errors.
    #[must_use]
    pub fn location(&self) -> Location {
        Location {
            path: self.source_path.map(Path::to_path_buf),
            line: self.line,
        }
    }
}

/// Owned source location attached to errors and diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub path: Option<PathBuf>,
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}:{}", path.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_with_path() {
        let ctx = ResolveContext {
            source_path: Some(Path::new("docs/guide.md")),
            line: 10,
        };
        assert_eq!(ctx.location().to_string(), "docs/guide.md:10");
    }

    #[test]
    fn test_location_without_path() {
        assert_eq!(ResolveContext::at_line(7).location().to_string(), "line 7");
    }

    #[test]
    fn test_with_line_keeps_path() {
        let ctx = ResolveContext {
            source_path: Some(Path::new("a.md")),
            line: 1,
        }
        .with_line(5);
        assert_eq!(ctx.source_path, Some(Path::new("a.md")));
        assert_eq!(ctx.line, 5);
    }
}
