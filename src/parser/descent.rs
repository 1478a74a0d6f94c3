//! The schema-driven recursive-descent parser (C4): one generic state
//! machine — EXPECT_BEGIN → EXPECT_NAME → CONSUME_ATTRS → CONSUME_VARIADIC?
//! → LOOP_CHILDREN → EXPECT_END → EXPECT_NAME_MATCH — driven entirely by
//! [`crate::parser::registry::lookup`], rather than one hand-written parse
//! function per keyword (spec.md §4.3).

use crate::base::{LineIndex, Name, Position};
use crate::parser::errors::{Breadcrumb, ParseError};
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::parser::registry::{self, AttrDescriptor, AttrKind, KeywordDescriptor, TabularShape, TextShape};
use crate::parser::tree::{Node, ScalarValue, TabularBody, TextBody};
use tracing::{debug, trace};

/// Strips the surrounding quotes from a lexed string token and collapses
/// `""` escapes to a literal `"`, per spec.md §4.2.
pub(crate) fn decode_string(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    inner.replace("\"\"", "\"")
}

/// The inverse of [`decode_string`], used by the emitter.
pub(crate) fn encode_string(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn kind_accepts(kind: AttrKind, token: TokenKind) -> bool {
    match kind {
        AttrKind::Uint | AttrKind::Int | AttrKind::Ulong | AttrKind::Long => {
            matches!(token, TokenKind::Int | TokenKind::Hex)
        }
        AttrKind::Float => matches!(token, TokenKind::Float | TokenKind::Int),
        AttrKind::String => matches!(token, TokenKind::String),
        AttrKind::Ident => matches!(token, TokenKind::Ident),
        AttrKind::Enum(_)
        | AttrKind::Datatype
        | AttrKind::Datasize
        | AttrKind::Addrtype
        | AttrKind::Byteorder
        | AttrKind::Indexorder => matches!(token, TokenKind::Ident),
    }
}

pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    source: &'a str,
    line_index: LineIndex,
    breadcrumb: Breadcrumb,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            tokens: Lexer::new(source).collect(),
            pos: 0,
            source,
            line_index: LineIndex::new(source),
            breadcrumb: Breadcrumb::new(),
        }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn position_at(&self, token: &Token<'_>) -> Position {
        self.line_index.position(token.offset)
    }

    fn current_position(&self) -> Position {
        match self.peek() {
            Some(t) => self.position_at(t),
            None => self
                .tokens
                .last()
                .map(|t| self.line_index.position(t.offset))
                .unwrap_or(Position::new(1, 0)),
        }
    }

    fn eof_error(&self) -> ParseError {
        ParseError::UnexpectedEof {
            at: self.current_position(),
            context: self.breadcrumb.clone(),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'a>, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => Ok(self.bump().unwrap()),
            Some(token) => Err(ParseError::UnexpectedToken {
                at: self.position_at(token),
                found: format!("{:?} `{}`", token.kind, token.text),
                expected: expected.to_string(),
                context: self.breadcrumb.clone(),
            }),
            None => Err(self.eof_error()),
        }
    }

    fn coerce(&self, kind: AttrKind, token: &Token<'_>, keyword: &str, field: &str) -> Result<ScalarValue, ParseError> {
        if !kind_accepts(kind, token.kind) {
            return Err(ParseError::AttributeTypeMismatch {
                at: self.position_at(token),
                keyword: keyword.to_string(),
                field: field.to_string(),
                expected: format!("{:?}", kind),
                found: token.text.to_string(),
                context: self.breadcrumb.clone(),
            });
        }
        match kind {
            AttrKind::Uint => self.parse_int(token, keyword, field, 0, u16::MAX as i64).map(|v| ScalarValue::Uint(v as u16)),
            AttrKind::Int => self.parse_int(token, keyword, field, i16::MIN as i64, i16::MAX as i64).map(|v| ScalarValue::Int(v as i16)),
            AttrKind::Ulong => self.parse_int(token, keyword, field, 0, u32::MAX as i64).map(|v| ScalarValue::Ulong(v as u32)),
            AttrKind::Long => self.parse_int(token, keyword, field, i32::MIN as i64, i32::MAX as i64).map(|v| ScalarValue::Long(v as i32)),
            AttrKind::Float => Ok(ScalarValue::Float(token.text.parse().unwrap_or(f64::NAN))),
            AttrKind::String => Ok(ScalarValue::Str(decode_string(token.text))),
            AttrKind::Ident => Ok(ScalarValue::Ident(Name::new(token.text))),
            AttrKind::Enum(choices) => self.check_choice(choices, token, keyword, field).map(ScalarValue::Enum),
            AttrKind::Datatype => self.check_choice(registry::DATATYPE_CHOICES, token, keyword, field).map(ScalarValue::Enum),
            AttrKind::Datasize => self.check_choice(registry::DATASIZE_CHOICES, token, keyword, field).map(ScalarValue::Enum),
            AttrKind::Addrtype => self.check_choice(registry::ADDRTYPE_CHOICES, token, keyword, field).map(ScalarValue::Enum),
            AttrKind::Byteorder => self.check_choice(registry::BYTEORDER_CHOICES, token, keyword, field).map(ScalarValue::Enum),
            AttrKind::Indexorder => self.check_choice(registry::INDEXORDER_CHOICES, token, keyword, field).map(ScalarValue::Enum),
        }
    }

    fn parse_int(&self, token: &Token<'_>, keyword: &str, field: &str, min: i64, max: i64) -> Result<i64, ParseError> {
        let value = if let Some(hex) = token.text.strip_prefix("0x").or_else(|| token.text.strip_prefix("0X")) {
            i64::from_str_radix(hex, 16).unwrap_or(0)
        } else {
            token.text.parse::<i64>().unwrap_or(0)
        };
        if value < min || value > max {
            return Err(ParseError::IntegerOutOfRange {
                at: self.position_at(token),
                keyword: keyword.to_string(),
                field: field.to_string(),
                expected: format!("{min}..={max}"),
                found: token.text.to_string(),
                context: self.breadcrumb.clone(),
            });
        }
        Ok(value)
    }

    fn check_choice(&self, choices: &'static [&'static str], token: &Token<'_>, keyword: &str, field: &str) -> Result<Name, ParseError> {
        if choices.contains(&token.text) {
            Ok(Name::new(token.text))
        } else {
            Err(ParseError::EnumValueOutOfRange {
                at: self.position_at(token),
                keyword: keyword.to_string(),
                field: field.to_string(),
                found: token.text.to_string(),
                context: self.breadcrumb.clone(),
            })
        }
    }

    fn parse_fixed_attrs(&mut self, descriptor: &KeywordDescriptor, node: &mut Node) -> Result<(), ParseError> {
        for attr in descriptor.attrs {
            let token = self.peek().cloned().ok_or_else(|| self.eof_error())?;
            self.bump();
            let value = self.coerce(attr.kind, &token, descriptor.name, attr.field)?;
            node.set_attr(attr.field, value);
        }
        Ok(())
    }

    fn parse_variadic(&mut self, descriptor: &KeywordDescriptor, node: &mut Node) -> Result<(), ParseError> {
        let Some(AttrDescriptor { kind, field }) = descriptor.variadic else {
            return Ok(());
        };
        let mut values = Vec::new();
        while let Some(token) = self.peek() {
            if !kind_accepts(kind, token.kind) {
                break;
            }
            let token = token.clone();
            self.bump();
            values.push(self.coerce(kind, &token, descriptor.name, field)?);
        }
        node.set_variadic(field, values);
        Ok(())
    }

    fn parse_tabular(&mut self, descriptor: &KeywordDescriptor, node: &mut Node) -> Result<(), ParseError> {
        let Some(shape) = descriptor.tabular else {
            return Ok(());
        };
        let count_field = match shape {
            TabularShape::Pairs { count_field }
            | TabularShape::LabeledPairs { count_field }
            | TabularShape::Triples { count_field } => count_field,
        };
        let count = node
            .attr(count_field)
            .and_then(ScalarValue::as_uint)
            .unwrap_or(0) as usize;

        match shape {
            TabularShape::Pairs { .. } => {
                let mut pairs = Vec::with_capacity(count);
                for _ in 0..count {
                    let a = self.expect_float(descriptor.name, "in")?;
                    let b = self.expect_float(descriptor.name, "out")?;
                    pairs.push((a, b));
                }
                node.set_tabular(TabularBody::Pairs(pairs));
            }
            TabularShape::LabeledPairs { .. } => {
                let mut pairs = Vec::with_capacity(count);
                for _ in 0..count {
                    let a = self.expect_float(descriptor.name, "in")?;
                    let label = self.expect_string(descriptor.name, "label")?;
                    pairs.push((a, label));
                }
                node.set_tabular(TabularBody::LabeledPairs(pairs));
            }
            TabularShape::Triples { .. } => {
                let mut triples = Vec::with_capacity(count);
                for _ in 0..count {
                    let min = self.expect_float(descriptor.name, "min")?;
                    let max = self.expect_float(descriptor.name, "max")?;
                    let label = self.expect_string(descriptor.name, "label")?;
                    triples.push((min, max, label));
                }
                node.set_tabular(TabularBody::Triples(triples));
            }
        }
        Ok(())
    }

    fn expect_float(&mut self, keyword: &str, field: &str) -> Result<f64, ParseError> {
        let token = self.peek().cloned().ok_or_else(|| self.eof_error())?;
        if !kind_accepts(AttrKind::Float, token.kind) {
            return Err(ParseError::AttributeTypeMismatch {
                at: self.position_at(&token),
                keyword: keyword.to_string(),
                field: field.to_string(),
                expected: "Float".to_string(),
                found: token.text.to_string(),
                context: self.breadcrumb.clone(),
            });
        }
        self.bump();
        Ok(token.text.parse().unwrap_or(f64::NAN))
    }

    fn expect_string(&mut self, keyword: &str, field: &str) -> Result<String, ParseError> {
        let token = self.expect(TokenKind::String, &format!("a string for `{field}` of `{keyword}`"))?;
        Ok(decode_string(token.text))
    }

    fn parse_text(&mut self, descriptor: &KeywordDescriptor, node: &mut Node) -> Result<(), ParseError> {
        let Some(shape) = descriptor.text else {
            return Ok(());
        };
        match shape {
            TextShape::Lines => {
                let mut lines = Vec::new();
                while let Some(token) = self.peek() {
                    if token.kind != TokenKind::String {
                        break;
                    }
                    lines.push(decode_string(token.text));
                    self.bump();
                }
                node.set_text(TextBody::Lines(lines));
            }
            TextShape::Opaque => {
                let start = self.peek().map(|t| u32::from(t.offset) as usize).unwrap_or(self.source.len());
                // Scan forward for this block's matching `/end NAME`, treating
                // every other token (however it lexes) as opaque payload.
                let mut end = start;
                loop {
                    match self.peek() {
                        None => return Err(self.eof_error()),
                        Some(token) if token.kind == TokenKind::End => {
                            if self.tokens.get(self.pos + 1).map(|t| t.text) == Some(descriptor.name) {
                                break;
                            }
                            end = u32::from(token.offset) as usize + token.text.len();
                            self.bump();
                        }
                        Some(token) => {
                            end = u32::from(token.offset) as usize + token.text.len();
                            self.bump();
                        }
                    }
                }
                node.set_text(TextBody::Opaque(self.source[start..end].trim().to_string()));
            }
        }
        Ok(())
    }

    /// Parses one `/begin NAME ... /end NAME` block or `NAME ...` inline
    /// keyword occurrence, given its already-looked-up descriptor.
    fn parse_keyword_body(&mut self, descriptor: &'static KeywordDescriptor) -> Result<Node, ParseError> {
        let position = self.current_position();
        let _span = tracing::trace_span!("keyword", name = descriptor.name, %position).entered();
        trace!("entering block");
        let mut node = Node::new(descriptor.name, position);
        self.breadcrumb.push(descriptor.name);

        self.parse_fixed_attrs(descriptor, &mut node)?;
        self.parse_variadic(descriptor, &mut node)?;
        self.parse_tabular(descriptor, &mut node)?;
        self.parse_text(descriptor, &mut node)?;

        if descriptor.block {
            while let Some(token) = self.peek() {
                if token.kind == TokenKind::End {
                    break;
                }
                // A child is either a `/begin NAME` block or a bare `NAME`
                // inline keyword (e.g. `VERSION`, `COEFFS`) — which shape is
                // legal for a given name is the registry's call, not a
                // property of the call site.
                let error_at = self.position_at(token);
                let (child_name, is_block_start): (&str, bool) = match token.kind {
                    TokenKind::Begin => {
                        let name_token = self.tokens.get(self.pos + 1).cloned();
                        match &name_token {
                            Some(t) if t.kind == TokenKind::Ident => (t.text, true),
                            _ => return Err(self.eof_error()),
                        }
                    }
                    TokenKind::Ident => (token.text, false),
                    _ => {
                        return Err(ParseError::UnexpectedToken {
                            at: error_at,
                            found: format!("{:?} `{}`", token.kind, token.text),
                            expected: "a child keyword or `/end`".to_string(),
                            context: self.breadcrumb.clone(),
                        });
                    }
                };
                if !descriptor.children.contains(&child_name) {
                    return Err(ParseError::IllegalChild {
                        at: error_at,
                        parent: descriptor.name.to_string(),
                        child: child_name.to_string(),
                        context: self.breadcrumb.clone(),
                    });
                }
                let child_descriptor = registry::lookup(child_name).expect("validated against registry above");
                if child_descriptor.block != is_block_start {
                    return Err(ParseError::UnexpectedToken {
                        at: error_at,
                        found: child_name.to_string(),
                        expected: if child_descriptor.block { "`/begin`".to_string() } else { "no `/begin`".to_string() },
                        context: self.breadcrumb.clone(),
                    });
                }
                let child = self.parse_node()?;
                let already_present = !node.children(child_descriptor.name).is_empty();
                if already_present && !child_descriptor.multiple {
                    return Err(ParseError::DuplicateSingleton {
                        at: child.position,
                        keyword: child_name.to_string(),
                        context: self.breadcrumb.clone(),
                    });
                }
                debug!(child = child_descriptor.name, "accepted child");
                node.push_child(child);
            }

            let end_at = self.current_position();
            self.expect(TokenKind::End, &format!("`/end {}`", descriptor.name))?;
            let name_token = self.expect(TokenKind::Ident, descriptor.name)?;
            if name_token.text != descriptor.name {
                return Err(ParseError::MismatchedEnd {
                    at: end_at,
                    expected: descriptor.name.to_string(),
                    found: name_token.text.to_string(),
                    context: self.breadcrumb.clone(),
                });
            }
        }

        self.breadcrumb.pop();
        trace!("leaving block");
        Ok(node)
    }

    /// Consumes `/begin NAME` (or a bare inline `NAME`) and dispatches to
    /// [`Self::parse_keyword_body`]. The entry point for both the document's
    /// children and recursive nested blocks.
    fn parse_node(&mut self) -> Result<Node, ParseError> {
        let is_block = matches!(self.peek(), Some(t) if t.kind == TokenKind::Begin);
        if is_block {
            self.bump();
        }
        let name_token = self.expect(TokenKind::Ident, "a keyword name")?;
        let descriptor = registry::lookup(name_token.text).ok_or_else(|| ParseError::UnknownKeyword {
            at: self.position_at(&name_token),
            keyword: name_token.text.to_string(),
            context: self.breadcrumb.clone(),
        })?;
        self.parse_keyword_body(descriptor)
    }

    /// Parses a full document: the `ASAP2_VERSION` prologue, an optional
    /// `A2ML_VERSION`, and the root `PROJECT` block (spec.md §4.3).
    pub fn parse_document(&mut self) -> Result<Node, ParseError> {
        let position = self.current_position();
        let mut root = Node::new("A2L_FILE", position);

        let version_token = self.expect(TokenKind::Asap2VersionKw, "`ASAP2_VERSION`")?;
        let _ = version_token;
        let version_descriptor = registry::lookup("ASAP2_VERSION").expect("registered");
        self.parse_fixed_attrs(version_descriptor, &mut root)?;

        if matches!(self.peek(), Some(t) if t.kind == TokenKind::Ident && t.text == "A2ML_VERSION") {
            let child = self.parse_node()?;
            root.push_child(child);
        }

        let project = self.parse_node()?;
        if project.keyword.as_str() != "PROJECT" {
            return Err(ParseError::UnexpectedToken {
                at: project.position,
                found: project.keyword.to_string(),
                expected: "`/begin PROJECT`".to_string(),
                context: self.breadcrumb.clone(),
            });
        }
        root.push_child(project);

        if self.peek().is_some() {
            let token = self.peek().unwrap().clone();
            return Err(ParseError::UnexpectedToken {
                at: self.position_at(&token),
                found: format!("{:?} `{}`", token.kind, token.text),
                expected: "end of input".to_string(),
                context: self.breadcrumb.clone(),
            });
        }

        Ok(root)
    }
}

/// Parses an in-memory A2L document with no `/include` expansion.
pub fn parse_str(source: &str) -> Result<Node, ParseError> {
    Parser::new(source).parse_document().inspect_err(|err| {
        tracing::error!(%err, "parse failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_version_prologue_and_empty_project() {
        let source = r#"ASAP2_VERSION 1 71 /begin PROJECT my_project "a minimal project" /end PROJECT"#;
        let doc = parse_str(source).unwrap();
        assert_eq!(doc.attr("VersionNo").and_then(ScalarValue::as_uint), Some(1));
        assert_eq!(doc.attr("UpgradeNo").and_then(ScalarValue::as_uint), Some(71));
        let project = doc.child("PROJECT").unwrap();
        assert_eq!(project.attr("Name").and_then(ScalarValue::as_str), Some("my_project"));
    }

    #[test]
    fn mismatched_end_name_is_reported() {
        let source = r#"ASAP2_VERSION 1 71 /begin PROJECT p "d" /begin MODULE m "d" /end WRONG /end PROJECT"#;
        let err = parse_str(source).unwrap_err();
        assert!(matches!(err, ParseError::MismatchedEnd { .. }), "{err:?}");
    }

    #[test]
    fn enum_attribute_out_of_range_is_reported() {
        let source = r#"ASAP2_VERSION 1 71 /begin PROJECT p "d"
            /begin MODULE m "d"
                /begin CHARACTERISTIC c "d" NOT_A_TYPE 0 DEP 0.1 CONV 0 100 /end CHARACTERISTIC
            /end MODULE
        /end PROJECT"#;
        let err = parse_str(source).unwrap_err();
        assert!(matches!(err, ParseError::EnumValueOutOfRange { .. }), "{err:?}");
    }

    #[test]
    fn variadic_attribute_is_captured() {
        let source = r#"ASAP2_VERSION 1 71 /begin PROJECT p "d"
            /begin MODULE m "d"
                /begin CHARACTERISTIC c "d" VALUE 0 DEP 0.1 CONV 0 100
                    /begin FUNCTION_LIST fn_a fn_b fn_c /end FUNCTION_LIST
                /end CHARACTERISTIC
            /end MODULE
        /end PROJECT"#;
        let doc = parse_str(source).unwrap();
        let function_list = doc
            .child("PROJECT")
            .unwrap()
            .child("MODULE")
            .unwrap()
            .child("CHARACTERISTIC")
            .unwrap()
            .child("FUNCTION_LIST")
            .unwrap();
        let (field, values) = function_list.variadic().unwrap();
        assert_eq!(field, "Name");
        assert_eq!(values.len(), 3);
        assert_eq!(values[0].as_str(), Some("fn_a"));
    }

    #[test]
    fn illegal_child_is_reported() {
        let source = r#"ASAP2_VERSION 1 71 /begin PROJECT p "d" /begin COMPU_METHOD cm "d" LINEAR "%6.2" "U" /end COMPU_METHOD /end PROJECT"#;
        let err = parse_str(source).unwrap_err();
        assert!(matches!(err, ParseError::IllegalChild { .. }), "{err:?}");
    }

    #[test]
    fn text_node_block_captures_opaque_body() {
        let source = r#"ASAP2_VERSION 1 71 /begin PROJECT p "d"
            /begin MODULE m "d"
                /begin A2ML struct { uint; } /end A2ML
            /end MODULE
        /end PROJECT"#;
        let doc = parse_str(source).unwrap();
        let a2ml = doc.child("PROJECT").unwrap().child("MODULE").unwrap().child("A2ML").unwrap();
        match a2ml.text().unwrap() {
            TextBody::Opaque(text) => assert!(text.contains("struct")),
            other => panic!("expected opaque text, got {other:?}"),
        }
    }

    #[test]
    fn annotation_text_captures_string_lines() {
        let source = r#"ASAP2_VERSION 1 71 /begin PROJECT p "d"
            /begin MODULE m "d"
                /begin CHARACTERISTIC c "d" VALUE 0 DEP 0.1 CONV 0 100
                    /begin ANNOTATION
                        /begin ANNOTATION_TEXT "line one" "line two" /end ANNOTATION_TEXT
                    /end ANNOTATION
                /end CHARACTERISTIC
            /end MODULE
        /end PROJECT"#;
        let doc = parse_str(source).unwrap();
        let text_node = doc
            .child("PROJECT").unwrap()
            .child("MODULE").unwrap()
            .child("CHARACTERISTIC").unwrap()
            .child("ANNOTATION").unwrap()
            .child("ANNOTATION_TEXT").unwrap();
        match text_node.text().unwrap() {
            TextBody::Lines(lines) => assert_eq!(lines, &["line one".to_string(), "line two".to_string()]),
            other => panic!("expected line-mode text, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_non_multiple_child_is_rejected() {
        let source = r#"ASAP2_VERSION 1 71 /begin PROJECT p "d"
            /begin HEADER "h" /end HEADER
            /begin HEADER "h2" /end HEADER
        /end PROJECT"#;
        let err = parse_str(source).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateSingleton { .. }), "{err:?}");
    }
}
