//! The A2L parse error taxonomy (spec.md §7).

use crate::base::Position;
use std::path::PathBuf;

/// The stack of enclosing block keyword names at the point an error was
/// raised, innermost last — e.g. `["PROJECT", "MODULE", "CHARACTERISTIC"]`.
/// Stands in for the teacher's `ParseContext` enum: a plain name stack
/// covers every keyword without a matching variant per keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumb(pub Vec<String>);

impl Breadcrumb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, keyword: impl Into<String>) {
        self.0.push(keyword.into());
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }
}

impl std::fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0.join(" > "))
        }
    }
}

/// A single fatal parse error. The first one raised stops the parse —
/// spec.md §7 specifies no local recovery, so there is exactly one of these
/// per failed parse, not a collection. Variants stay flat structs rather than
/// boxed detail records: a parse either succeeds cheaply or fails once, so
/// the extra Result size on the hot path here doesn't matter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("{at}: invalid token `{text}` in {context}")]
    LexError {
        at: Position,
        text: String,
        context: Breadcrumb,
    },

    #[error("{at}: unexpected token {found}, expected {expected} in {context}")]
    UnexpectedToken {
        at: Position,
        found: String,
        expected: String,
        context: Breadcrumb,
    },

    #[error("{at}: unknown keyword `{keyword}` in {context}")]
    UnknownKeyword {
        at: Position,
        keyword: String,
        context: Breadcrumb,
    },

    #[error("{at}: `/end {found}` does not match the open block `{expected}` in {context}")]
    MismatchedEnd {
        at: Position,
        expected: String,
        found: String,
        context: Breadcrumb,
    },

    #[error("{at}: attribute `{field}` of `{keyword}` expected a {expected} but found `{found}` in {context}")]
    AttributeTypeMismatch {
        at: Position,
        keyword: String,
        field: String,
        expected: String,
        found: String,
        context: Breadcrumb,
    },

    #[error("{at}: `{found}` is not a legal value for `{field}` of `{keyword}` in {context}")]
    EnumValueOutOfRange {
        at: Position,
        keyword: String,
        field: String,
        found: String,
        context: Breadcrumb,
    },

    #[error("{at}: `{found}` does not fit in the {expected} range required by `{field}` of `{keyword}` in {context}")]
    IntegerOutOfRange {
        at: Position,
        keyword: String,
        field: String,
        expected: String,
        found: String,
        context: Breadcrumb,
    },

    #[error("{at}: `{child}` is not a legal child of `{parent}` in {context}")]
    IllegalChild {
        at: Position,
        parent: String,
        child: String,
        context: Breadcrumb,
    },

    #[error("{at}: `{keyword}` already occurred once in {context} and does not repeat")]
    DuplicateSingleton {
        at: Position,
        keyword: String,
        context: Breadcrumb,
    },

    #[error("{at}: `{keyword}` is missing required attribute `{field}` in {context}")]
    MissingRequiredAttribute {
        at: Position,
        keyword: String,
        field: String,
        context: Breadcrumb,
    },

    #[error("{at}: `{parent}` is missing required child `{child}` in {context}")]
    MissingRequiredChild {
        at: Position,
        parent: String,
        child: String,
        context: Breadcrumb,
    },

    #[error("{at}: unexpected end of input while parsing {context}")]
    UnexpectedEof { at: Position, context: Breadcrumb },

    #[error("include cycle detected: {0:?}")]
    IncludeCycle(Vec<PathBuf>),

    #[error("cannot read include file {path}: {source}")]
    IncludeIo {
        path: PathBuf,
        #[source]
        source: std::sync::Arc<std::io::Error>,
    },

    #[error("include nesting exceeds the configured maximum depth of {max_depth}")]
    IncludeDepthExceeded { max_depth: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breadcrumb_formats_as_path() {
        let mut crumb = Breadcrumb::new();
        crumb.push("PROJECT");
        crumb.push("MODULE");
        assert_eq!(crumb.to_string(), "PROJECT > MODULE");
    }

    #[test]
    fn empty_breadcrumb_is_root() {
        assert_eq!(Breadcrumb::new().to_string(), "<root>");
    }

    #[test]
    fn error_message_includes_position_and_context() {
        let mut context = Breadcrumb::new();
        context.push("PROJECT");
        let err = ParseError::UnknownKeyword {
            at: Position::new(3, 4),
            keyword: "BOGUS".into(),
            context,
        };
        let message = err.to_string();
        assert!(message.contains("3:4"));
        assert!(message.contains("BOGUS"));
        assert!(message.contains("PROJECT"));
    }
}
