//! The parsed tree model (C5): a typed `Node` per keyword occurrence, built
//! from the registry's shape rather than a generic lossless syntax tree —
//! spec.md §9 trades the teacher's rowan `GreenNode`/`SyntaxNode` pair (built
//! for incremental reparse and editor tooling this reader doesn't need) for
//! a plain owned struct per parsed keyword.

use crate::base::{Name, Position};
use indexmap::IndexMap;

/// A single attribute's scalar value, typed per [`crate::parser::registry::AttrKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Uint(u16),
    Int(i16),
    Ulong(u32),
    Long(i32),
    Float(f64),
    Str(String),
    Ident(Name),
    Enum(Name),
}

impl ScalarValue {
    pub fn as_uint(&self) -> Option<u16> {
        match self {
            ScalarValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ScalarValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Str(v) => Some(v),
            ScalarValue::Ident(v) | ScalarValue::Enum(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// The body of a `text_node` keyword (spec.md §4.1): either a sequence of
/// strings (`ANNOTATION_TEXT`) or one opaque, un-tokenized blob (`A2ML`).
#[derive(Debug, Clone, PartialEq)]
pub enum TextBody {
    Lines(Vec<String>),
    Opaque(String),
}

/// The tabular body of a `COMPU_TAB`/`COMPU_VTAB`/`COMPU_VTAB_RANGE` block
/// (spec.md §4.1's explicitly-specified pair/triple shapes).
#[derive(Debug, Clone, PartialEq)]
pub enum TabularBody {
    Pairs(Vec<(f64, f64)>),
    LabeledPairs(Vec<(f64, String)>),
    Triples(Vec<(f64, f64, String)>),
}

/// One or more children parsed under the same keyword name.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildSlot {
    One(Box<Node>),
    Many(Vec<Node>),
}

impl ChildSlot {
    pub fn as_slice(&self) -> &[Node] {
        match self {
            ChildSlot::One(node) => std::slice::from_ref(node),
            ChildSlot::Many(nodes) => nodes,
        }
    }
}

/// A single parsed A2L keyword occurrence: its fixed attributes, optional
/// trailing variadic tuple, optional text or tabular body, and children
/// keyed by keyword name in the order the registry lists them.
#[derive(Debug, Clone)]
pub struct Node {
    pub keyword: Name,
    pub position: Position,
    attrs: IndexMap<Name, ScalarValue>,
    variadic: Option<(Name, Vec<ScalarValue>)>,
    text: Option<TextBody>,
    tabular: Option<TabularBody>,
    children: IndexMap<Name, ChildSlot>,
}

/// Equality ignores `position`: two trees are the same document if their
/// content matches, regardless of where in their (possibly different)
/// source text each node came from — this is what makes round-trip tests
/// meaningful after re-parsing emitted text.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.keyword == other.keyword
            && self.attrs == other.attrs
            && self.variadic == other.variadic
            && self.text == other.text
            && self.tabular == other.tabular
            && self.children == other.children
    }
}

impl Node {
    pub fn new(keyword: impl Into<Name>, position: Position) -> Self {
        Self {
            keyword: keyword.into(),
            position,
            attrs: IndexMap::new(),
            variadic: None,
            text: None,
            tabular: None,
            children: IndexMap::new(),
        }
    }

    pub fn set_attr(&mut self, field: impl Into<Name>, value: ScalarValue) {
        self.attrs.insert(field.into(), value);
    }

    pub fn set_variadic(&mut self, field: impl Into<Name>, values: Vec<ScalarValue>) {
        self.variadic = Some((field.into(), values));
    }

    pub fn set_text(&mut self, body: TextBody) {
        self.text = Some(body);
    }

    pub fn set_tabular(&mut self, body: TabularBody) {
        self.tabular = Some(body);
    }

    pub fn push_child(&mut self, child: Node) {
        let keyword = child.keyword.clone();
        match self.children.get_mut(&keyword) {
            Some(ChildSlot::One(existing)) => {
                let existing = std::mem::replace(existing.as_mut(), Node::new(keyword.clone(), child.position));
                self.children
                    .insert(keyword, ChildSlot::Many(vec![existing, child]));
            }
            Some(ChildSlot::Many(nodes)) => nodes.push(child),
            None => {
                self.children.insert(keyword, ChildSlot::One(Box::new(child)));
            }
        }
    }

    pub fn attr(&self, field: &str) -> Option<&ScalarValue> {
        self.attrs.get(field)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&Name, &ScalarValue)> {
        self.attrs.iter()
    }

    pub fn variadic(&self) -> Option<(&str, &[ScalarValue])> {
        self.variadic.as_ref().map(|(field, values)| (field.as_str(), values.as_slice()))
    }

    pub fn text(&self) -> Option<&TextBody> {
        self.text.as_ref()
    }

    pub fn tabular(&self) -> Option<&TabularBody> {
        self.tabular.as_ref()
    }

    /// All children of the given keyword, in parse order; empty if none.
    pub fn children(&self, keyword: &str) -> &[Node] {
        self.children.get(keyword).map(ChildSlot::as_slice).unwrap_or(&[])
    }

    /// The single child of the given keyword, for non-`multiple` keywords.
    pub fn child(&self, keyword: &str) -> Option<&Node> {
        self.children(keyword).first()
    }

    /// All direct children across every keyword, in parse order.
    pub fn all_children(&self) -> impl Iterator<Item = &Node> {
        self.children.values().flat_map(ChildSlot::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_children_accumulate_in_order() {
        let mut parent = Node::new("MODULE", Position::new(1, 0));
        parent.push_child(Node::new("CHARACTERISTIC", Position::new(2, 0)));
        parent.push_child(Node::new("CHARACTERISTIC", Position::new(3, 0)));
        assert_eq!(parent.children("CHARACTERISTIC").len(), 2);
        assert_eq!(parent.children("CHARACTERISTIC")[0].position, Position::new(2, 0));
        assert_eq!(parent.children("CHARACTERISTIC")[1].position, Position::new(3, 0));
    }

    #[test]
    fn single_child_promotes_to_many_on_second_insert() {
        let mut parent = Node::new("PROJECT", Position::new(1, 0));
        parent.push_child(Node::new("MODULE", Position::new(2, 0)));
        assert_eq!(parent.children("MODULE").len(), 1);
        parent.push_child(Node::new("MODULE", Position::new(3, 0)));
        assert_eq!(parent.children("MODULE").len(), 2);
    }

    #[test]
    fn attr_lookup_by_field_name() {
        let mut node = Node::new("CHARACTERISTIC", Position::new(1, 0));
        node.set_attr("Name", ScalarValue::Ident(Name::new("MyChar")));
        assert_eq!(node.attr("Name").and_then(ScalarValue::as_str), Some("MyChar"));
        assert!(node.attr("Missing").is_none());
    }
}
