use std::cell::RefCell;
use std::rc::Rc;
use log::debug;
use crate::path::Path;
use crate::value::{Object, Value};
use crate::watcher::Watcher;

/// A minimal view tree to bind text into.
#[derive(Debug, Clone)]
pub enum Node {
    Element {
        tag: String,
        children: Vec<Node>
    },
    Text(TextNode)
}

/// Shared, mutable text. Bindings keep a handle and rewrite it when their value changes.
#[derive(Debug, Clone, Default)]
pub struct TextNode(Rc<RefCell<String>>);

/// Markers around an interpolated path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String
}

/// Binds every interpolation in a view tree to the data it names.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    delimiters: Delimiters
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Binding(Path)
}

impl Node {
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.into(),
            children
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode::new(text))
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element { .. } => None
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) => &[]
        }
    }

    /// All descendant text, concatenated in document order
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.get(),
            Node::Element { children, .. } => children.iter().map(Node::text_content).collect()
        }
    }
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        TextNode(Rc::new(RefCell::new(text.into())))
    }

    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn set(&self, text: String) {
        *self.0.borrow_mut() = text;
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters {
            open: "{{".to_owned(),
            close: "}}".to_owned()
        }
    }
}

impl Compiler {
    pub fn new(delimiters: Delimiters) -> Self {
        debug_assert!(!delimiters.open.is_empty() && !delimiters.close.is_empty(), "empty delimiter");
        Compiler { delimiters }
    }

    /// Walk `node` depth-first and bind each text node which contains interpolations.
    ///
    /// Each interpolation becomes one [Watcher] on `data`. The text is rendered immediately and
    /// re-rendered whenever any of its watchers fires.
    pub fn compile(&self, node: &Node, data: &Object) {
        match node {
            Node::Element { children, .. } => {
                for child in children {
                    self.compile(child, data);
                }
            }
            Node::Text(text) => self.compile_text(text, data)
        }
    }

    fn compile_text(&self, text: &TextNode, data: &Object) {
        let segments = self.parse(&text.get());
        if !segments.iter().any(|segment| matches!(segment, Segment::Binding(_))) {
            return;
        }

        let parts = Rc::new(RefCell::new(segments.iter().map(|segment| match segment {
            Segment::Literal(literal) => literal.clone(),
            Segment::Binding(_) => String::new()
        }).collect::<Vec<_>>()));
        for (index, segment) in segments.into_iter().enumerate() {
            let Segment::Binding(path) = segment else {
                continue;
            };
            debug!("bound interpolation {}", path);
            let node = text.clone();
            let parts2 = Rc::clone(&parts);
            let watcher = Watcher::new(data, path, move |value, _| {
                parts2.borrow_mut()[index] = render(value);
                node.set(parts2.borrow().concat());
            });
            parts.borrow_mut()[index] = render(&watcher.value());
        }
        text.set(parts.borrow().concat());
    }

    /// Split text into literals and interpolated paths. An unterminated marker is literal.
    fn parse(&self, text: &str) -> Vec<Segment> {
        let Delimiters { open, close } = &self.delimiters;
        let mut segments = Vec::new();
        let mut rest = text;
        while let Some(start) = rest.find(open.as_str()) {
            let after_open = &rest[start + open.len()..];
            let Some(end) = after_open.find(close.as_str()) else {
                break;
            };
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_owned()));
            }
            segments.push(Segment::Binding(Path::parse(after_open[..end].trim())));
            rest = &after_open[end + close.len()..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }
        segments
    }
}

/// How a value is written into text. `Undefined` and `Null` are blank.
fn render(value: &Value) -> String {
    match value {
        Value::Undefined | Value::Null => String::new(),
        value => value.to_string()
    }
}
