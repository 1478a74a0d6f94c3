//! Parser configuration (A4): include search paths and nesting limits.

use std::path::PathBuf;

/// Options controlling how a parse resolves `/include` directives.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Directories searched, in order, for an include target that isn't
    /// found relative to the including file.
    pub include_search_paths: Vec<PathBuf>,
    /// Maximum `/include` nesting depth before the parse gives up with
    /// [`crate::parser::ParseError::IncludeDepthExceeded`] — a backstop for
    /// includes that don't form a cycle `FileId` tracking would catch but
    /// still nest unreasonably deep.
    pub max_include_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            include_search_paths: Vec::new(),
            max_include_depth: 64,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_search_paths.push(path.into());
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }
}
