//! `/include` resolution (A3): splices included files' text in place of the
//! directive before lexing, so the parser proper never has to special-case
//! multi-file input. Cycle detection uses [`FileId`]/[`FileTable`] to avoid
//! re-reading (and re-splicing) a file already on the include stack.

use crate::base::{FileId, FileTable};
use crate::parser::{ParseError, ParserConfig};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error};

/// Reads include target files. A trait so tests can substitute an in-memory
/// filesystem instead of writing fixtures through [`tempfile`].
pub trait FileResolver {
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// The default resolver: reads straight from disk.
#[derive(Debug, Default)]
pub struct FsResolver;

impl FileResolver for FsResolver {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Finds the next `/include "target"` directive in `text` at or after
/// `from`, returning its byte range and the decoded target path. Scans at
/// the character level rather than through the full lexer — include
/// expansion runs before tokenization, so there is no token stream yet.
fn find_next_include(text: &str, from: usize) -> Option<(std::ops::Range<usize>, String)> {
    let search_from = &text[from..];
    let rel_start = search_from.find("/include")?;
    let directive_start = from + rel_start;
    let after_keyword = directive_start + "/include".len();
    let rest = &text[after_keyword..];
    let ws_len = rest.len() - rest.trim_start_matches([' ', '\t', '\r', '\n']).len();
    let quote_start = after_keyword + ws_len;
    if text.as_bytes().get(quote_start) != Some(&b'"') {
        // Not actually a directive (e.g. appears inside a comment or string
        // the caller already spliced around); keep scanning past it.
        return find_next_include(text, directive_start + 1);
    }
    let body = &text[quote_start + 1..];
    let mut consumed = 0usize;
    let mut value = String::new();
    let bytes = body.as_bytes();
    loop {
        match bytes.get(consumed) {
            None => return None, // unterminated string; let the lexer report it
            Some(b'"') => {
                if bytes.get(consumed + 1) == Some(&b'"') {
                    value.push('"');
                    consumed += 2;
                } else {
                    consumed += 1;
                    break;
                }
            }
            Some(_) => {
                let ch = body[consumed..].chars().next().unwrap();
                value.push(ch);
                consumed += ch.len_utf8();
            }
        }
    }
    let end = quote_start + 1 + consumed;
    Some((directive_start..end, value))
}

fn resolve_path(dir: &Path, target: &str, config: &ParserConfig) -> Option<PathBuf> {
    let relative = dir.join(target);
    if relative.is_file() {
        return Some(relative);
    }
    for search_path in &config.include_search_paths {
        let candidate = search_path.join(target);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

struct Expander<'a> {
    resolver: &'a dyn FileResolver,
    config: &'a ParserConfig,
    files: FileTable,
    stack: Vec<FileId>,
}

impl<'a> Expander<'a> {
    fn expand(&mut self, path: &Path, depth: usize) -> Result<String, ParseError> {
        debug!(path = %path.display(), depth, "expanding include");
        if depth > self.config.max_include_depth {
            return Err(ParseError::IncludeDepthExceeded {
                max_depth: self.config.max_include_depth,
            });
        }
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let id = self.files.intern(&canonical);
        if self.stack.contains(&id) {
            let mut cycle: Vec<PathBuf> = self.stack.iter().map(|id| self.files.path(*id).to_path_buf()).collect();
            cycle.push(canonical);
            error!(?cycle, "include cycle detected");
            return Err(ParseError::IncludeCycle(cycle));
        }
        self.stack.push(id);

        let text = self
            .resolver
            .read(&canonical)
            .map_err(|e| ParseError::IncludeIo {
                path: canonical.clone(),
                source: Arc::new(e),
            })?;
        let dir = canonical.parent().map(Path::to_path_buf).unwrap_or_default();

        let mut result = String::with_capacity(text.len());
        let mut cursor = 0usize;
        while let Some((range, target)) = find_next_include(&text, cursor) {
            result.push_str(&text[cursor..range.start]);
            let resolved = resolve_path(&dir, &target, self.config).ok_or_else(|| ParseError::IncludeIo {
                path: dir.join(&target),
                source: Arc::new(io::Error::new(io::ErrorKind::NotFound, "include target not found")),
            })?;
            result.push_str(&self.expand(&resolved, depth + 1)?);
            cursor = range.end;
        }
        result.push_str(&text[cursor..]);

        self.stack.pop();
        Ok(result)
    }
}

/// Reads `path` and recursively splices in every `/include`d file's text,
/// depth-first, left to right. Returns the fully expanded source.
pub fn expand_includes(
    path: &Path,
    config: &ParserConfig,
    resolver: &dyn FileResolver,
) -> Result<String, ParseError> {
    let mut expander = Expander {
        resolver,
        config,
        files: FileTable::new(),
        stack: Vec::new(),
    };
    expander.expand(path, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_quoted_include_target() {
        let text = r#"/begin PROJECT /include "child.a2l" /end PROJECT"#;
        let (range, target) = find_next_include(text, 0).unwrap();
        assert_eq!(target, "child.a2l");
        assert_eq!(&text[range], r#"/include "child.a2l""#);
    }

    #[test]
    fn handles_doubled_quote_in_include_target() {
        let text = r#"/include "a""b.a2l""#;
        let (_, target) = find_next_include(text, 0).unwrap();
        assert_eq!(target, r#"a"b.a2l"#);
    }
}
