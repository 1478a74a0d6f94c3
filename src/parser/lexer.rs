//! `logos`-based lexer for A2L source text.
//!
//! Fast tokenization using the `logos` crate, the same approach the teacher
//! crate uses for SysML v2 — a `logos::Logos` enum drives matching, and a
//! thin hand-written iterator converts its output into positioned tokens and
//! discards trivia (whitespace, comments).

use logos::Logos;
use text_size::TextSize;

/// The semantic kind of a lexed token (C1's "token scalar" shapes, at the
/// lexical level — [`crate::parser::registry::AttrKind`] is the analogous
/// type one layer up, for what an *attribute* may hold).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Begin,
    End,
    Include,
    Asap2VersionKw,
    Int,
    Hex,
    Float,
    String,
    Ident,
    Error,
}

/// A single lexed token: its kind, raw lexeme, and byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Iterator wrapping the logos-generated tokenizer; skips whitespace and
/// comments so the parser only ever sees meaningful tokens.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let logos_token = self.inner.next()?;
            let text = self.inner.slice();
            let offset = TextSize::new(self.inner.span().start as u32);

            let kind = match logos_token {
                Ok(LogosToken::LineComment) | Ok(LogosToken::BlockComment) => continue,
                Ok(t) => t.into(),
                Err(()) => TokenKind::Error,
            };

            return Some(Token { kind, text, offset });
        }
    }
}

pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Consumes a doubled-quote-escaped string body (`""` is a literal `"`),
/// matching spec.md's string shape rather than backslash escaping.
fn lex_string(lexer: &mut logos::Lexer<LogosToken>) -> bool {
    let remainder = lexer.remainder();
    let mut consumed = 0usize;
    let bytes = remainder.as_bytes();
    loop {
        match bytes.get(consumed) {
            None => return false, // unterminated
            Some(b'"') => {
                if bytes.get(consumed + 1) == Some(&b'"') {
                    consumed += 2;
                    continue;
                }
                lexer.bump(consumed + 1);
                return true;
            }
            Some(_) => consumed += 1,
        }
    }
}

/// Consumes a nestable `/* ... */` block comment.
fn lex_block_comment(lexer: &mut logos::Lexer<LogosToken>) -> bool {
    let remainder = lexer.remainder();
    let mut depth = 1usize;
    let mut consumed = 0usize;
    let bytes = remainder.as_bytes();
    while depth > 0 {
        match (bytes.get(consumed), bytes.get(consumed + 1)) {
            (Some(b'/'), Some(b'*')) => {
                depth += 1;
                consumed += 2;
            }
            (Some(b'*'), Some(b'/')) => {
                depth -= 1;
                consumed += 2;
            }
            (Some(_), _) => consumed += 1,
            (None, _) => return false, // unterminated
        }
    }
    lexer.bump(consumed);
    true
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum LogosToken {
    #[token("/begin")]
    Begin,

    #[token("/end")]
    End,

    #[token("/include")]
    Include,

    #[token("ASAP2_VERSION", priority = 20)]
    Asap2VersionKw,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", lex_block_comment)]
    BlockComment,

    #[token("\"", lex_string)]
    String,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    Hex,

    #[regex(r"[+-]?[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[+-]?\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[+-]?[0-9]+[eE][+-]?[0-9]+")]
    Float,

    #[regex(r"[+-]?[0-9]+")]
    Int,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.\[\]]*")]
    Ident,
}

impl From<LogosToken> for TokenKind {
    fn from(t: LogosToken) -> Self {
        match t {
            LogosToken::Begin => TokenKind::Begin,
            LogosToken::End => TokenKind::End,
            LogosToken::Include => TokenKind::Include,
            LogosToken::Asap2VersionKw => TokenKind::Asap2VersionKw,
            LogosToken::Hex => TokenKind::Hex,
            LogosToken::Float => TokenKind::Float,
            LogosToken::Int => TokenKind::Int,
            LogosToken::String => TokenKind::String,
            LogosToken::Ident => TokenKind::Ident,
            LogosToken::LineComment | LogosToken::BlockComment => unreachable!("filtered by Lexer::next"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn recognizes_begin_end_include() {
        assert_eq!(
            kinds("/begin PROJECT /end PROJECT /include \"x.a2l\""),
            vec![
                TokenKind::Begin,
                TokenKind::Ident,
                TokenKind::End,
                TokenKind::Ident,
                TokenKind::Include,
                TokenKind::String,
            ]
        );
    }

    #[test]
    fn begin_is_not_swallowed_by_ident() {
        // `begin` alone (no slash) is a legal identifier, per spec.md §4.2.
        assert_eq!(kinds("begin"), vec![TokenKind::Ident]);
    }

    #[test]
    fn asap2_version_is_distinguished_from_ident() {
        assert_eq!(kinds("ASAP2_VERSION"), vec![TokenKind::Asap2VersionKw]);
        assert_eq!(kinds("ASAP2_VERSIONX"), vec![TokenKind::Ident]);
    }

    #[test]
    fn numeric_disambiguation() {
        assert_eq!(kinds("42"), vec![TokenKind::Int]);
        assert_eq!(kinds("-7"), vec![TokenKind::Int]);
        assert_eq!(kinds("0x1F"), vec![TokenKind::Hex]);
        assert_eq!(kinds("3.14"), vec![TokenKind::Float]);
        assert_eq!(kinds("1e10"), vec![TokenKind::Float]);
    }

    #[test]
    fn string_with_doubled_quote_escape() {
        let toks = tokenize(r#""a ""quoted"" b""#);
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::String);
        assert_eq!(toks[0].text, r#""a ""quoted"" b""#);
    }

    #[test]
    fn string_spans_lines() {
        let toks = tokenize("\"line one\nline two\"");
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::String);
    }

    #[test]
    fn nested_block_comments_are_discarded() {
        assert_eq!(kinds("/* outer /* inner */ still-in-comment */ IDENT_AFTER"), vec![TokenKind::Ident]);
    }

    #[test]
    fn line_comment_discarded() {
        assert_eq!(kinds("// whole line\nIDENT"), vec![TokenKind::Ident]);
    }

    #[test]
    fn invalid_character_is_error_kind() {
        assert_eq!(kinds("#"), vec![TokenKind::Error]);
    }

    #[test]
    fn offsets_track_byte_position() {
        let toks = tokenize("A B");
        assert_eq!(u32::from(toks[0].offset), 0);
        assert_eq!(u32::from(toks[1].offset), 2);
    }
}
