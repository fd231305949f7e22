//! In-memory document tree.
//!
//! `Document` stands in for the browser DOM: an arena of element nodes with
//! classes, attributes, inline styles, text and (for file inputs) selected
//! file names. Detached nodes stay in the arena so handles never dangle; a
//! node is "in the page" only while its ancestor chain reaches the root.

mod selector;

pub use selector::Selector;

use std::collections::BTreeMap;
use std::fmt::Write as _;

use thiserror::Error;
use tracing::warn;

use selector::{AttrCondition, Combinator, SelectorPart, SelectorStep};

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index, useful for logging.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Vertical layout box, supplied by the host for scroll calculations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Structural DOM misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
    #[error("the document root cannot be moved or removed")]
    Root,
    #[error("unsupported selector '{0}'")]
    Selector(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: Vec<(String, String)>,
    text: String,
    files: Vec<String>,
    rect: Option<Rect>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            style: Vec::new(),
            text: String::new(),
            files: Vec::new(),
            rect: None,
        }
    }
}

/// Arena-backed element tree with a fixed root, `<head>` and `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node::new("#document")],
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
        };
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.attach(doc.root, doc.head, false);
        doc.attach(doc.root, doc.body, false);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of nodes ever created, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    /// Create an element with the given classes and append it to `parent`.
    pub fn create_child(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let id = self.create_element(tag);
        for class in classes {
            self.add_class(id, class);
        }
        if self.append_child(parent, id).is_err() {
            warn!("create_child: parent {:?} does not exist", parent);
        }
        id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn exists(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        for id in [parent, child] {
            if !self.exists(id) {
                return Err(DomError::UnknownNode(id));
            }
        }
        if child == self.root {
            return Err(DomError::Root);
        }
        // The parent must not live inside the child's subtree.
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(DomError::Cycle { parent, child });
            }
            cursor = self.parent(node);
        }
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, first: bool) {
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.nodes[old_parent.0].children.retain(|id| *id != child);
        }
        self.nodes[child.0].parent = Some(parent);
        let children = &mut self.nodes[parent.0].children;
        if first {
            children.insert(0, child);
        } else {
            children.push(child);
        }
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.attach(parent, child, false);
        Ok(())
    }

    /// Move `child` to the front of `parent`'s children.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.attach(parent, child, true);
        Ok(())
    }

    /// Detach `child` from `parent`; it must be a direct child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if !self.exists(child) {
            return Err(DomError::UnknownNode(child));
        }
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.nodes[parent.0].children.retain(|id| *id != child);
        self.nodes[child.0].parent = None;
        Ok(())
    }

    /// Detach a node from whatever parent it has. Already-detached nodes are fine.
    pub fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        if node == self.root {
            return Err(DomError::Root);
        }
        match self.parent(node) {
            Some(parent) => self.remove_child(parent, node),
            None if self.exists(node) => Ok(()),
            None => Err(DomError::UnknownNode(node)),
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Whether the node's ancestor chain reaches the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.tag.as_str())
    }

    // ----- classes -----

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node)
            && !n.classes.iter().any(|c| c == class)
        {
            n.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.retain(|c| c != class);
        }
    }

    /// Toggle a class, returning whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            self.has_class(node, class)
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.node(node).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    // ----- attributes -----

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attrs.insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)
            .and_then(|n| n.attrs.get(&name.to_ascii_lowercase()))
            .map(String::as_str)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attrs.remove(&name.to_ascii_lowercase());
        }
    }

    // ----- inline style -----

    /// Set an inline style property; an empty value removes it.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(n) = self.node_mut(node) else {
            return;
        };
        let position = n.style.iter().position(|(prop, _)| prop == property);
        match (position, value.is_empty()) {
            (Some(pos), true) => {
                n.style.remove(pos);
            }
            (Some(pos), false) => n.style[pos].1 = value.to_string(),
            (None, false) => n.style.push((property.to_string(), value.to_string())),
            (None, true) => {}
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).and_then(|n| {
            n.style
                .iter()
                .find(|(prop, _)| prop == property)
                .map(|(_, value)| value.as_str())
        })
    }

    /// Serialized inline style, e.g. `opacity: 0; transform: translateX(100%)`.
    pub fn style_attr(&self, node: NodeId) -> String {
        self.node(node)
            .map(|n| {
                n.style
                    .iter()
                    .map(|(prop, value)| format!("{prop}: {value}"))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_default()
    }

    // ----- text -----

    /// Replace the node's content with plain text, detaching all children.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        let children = self.children(node).to_vec();
        for child in children {
            self.nodes[child.0].parent = None;
        }
        if let Some(n) = self.node_mut(node) {
            n.children.clear();
            n.text = text.to_string();
        }
    }

    /// Append to the node's own text.
    pub fn append_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            n.text.push_str(text);
        }
    }

    /// The node's own text plus that of its descendants, in tree order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(n) = self.node(node) {
            out.push_str(&n.text);
            for child in &n.children {
                self.collect_text(*child, out);
            }
        }
    }

    // ----- form controls -----

    pub fn set_files(&mut self, node: NodeId, files: Vec<String>) {
        if let Some(n) = self.node_mut(node) {
            n.files = files;
        }
    }

    pub fn files(&self, node: NodeId) -> &[String] {
        self.node(node).map(|n| n.files.as_slice()).unwrap_or(&[])
    }

    /// Current value of a form control.
    ///
    /// File inputs report their first selected file name, like a browser's
    /// `value` does; other controls report the `value` attribute.
    pub fn value(&self, node: NodeId) -> String {
        if self.attr(node, "type") == Some("file") {
            return self.files(node).first().cloned().unwrap_or_default();
        }
        self.attr(node, "value").unwrap_or_default().to_string()
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.set_attr(node, "value", value);
    }

    // ----- layout -----

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(n) = self.node_mut(node) {
            n.rect = Some(rect);
        }
    }

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.node(node).and_then(|n| n.rect)
    }

    // ----- queries -----

    /// All connected elements matching `selector`, in document order.
    ///
    /// An unsupported selector is logged and matches nothing.
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_selector_all_from(self.root, selector)
    }

    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Descendants of `scope` (excluding `scope` itself) matching `selector`.
    pub fn query_selector_all_from(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Ok(parsed) => self.select_all_from(scope, &parsed),
            Err(e) => {
                warn!("query_selector_all: {}", e);
                Vec::new()
            }
        }
    }

    pub fn select_all_from(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in self.children(scope) {
            self.collect_matches(*child, selector, &mut out);
        }
        out
    }

    fn collect_matches(&self, node: NodeId, selector: &Selector, out: &mut Vec<NodeId>) {
        if self.matches(node, selector) {
            out.push(node);
        }
        for child in self.children(node) {
            self.collect_matches(*child, selector, out);
        }
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let parsed = Selector::parse(selector)
            .inspect_err(|e| warn!("closest: {}", e))
            .ok()?;
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current != self.root && self.matches(current, &parsed) {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        selector
            .groups
            .iter()
            .any(|chain| self.matches_chain(node, chain))
    }

    fn matches_chain(&self, node: NodeId, parts: &[SelectorPart]) -> bool {
        let Some((last, rest)) = parts.split_last() else {
            return false;
        };
        if !self.matches_step(node, &last.step) {
            return false;
        }
        let Some(combinator) = last.combinator else {
            return rest.is_empty();
        };

        match combinator {
            Combinator::Child => self
                .parent(node)
                .is_some_and(|parent| self.matches_chain(parent, rest)),
            Combinator::Descendant => {
                let mut cursor = self.parent(node);
                while let Some(ancestor) = cursor {
                    if self.matches_chain(ancestor, rest) {
                        return true;
                    }
                    cursor = self.parent(ancestor);
                }
                false
            }
        }
    }

    fn matches_step(&self, node: NodeId, step: &SelectorStep) -> bool {
        let Some(n) = self.node(node) else {
            return false;
        };
        if node == self.root {
            return false;
        }
        if let Some(tag) = &step.tag
            && &n.tag != tag
        {
            return false;
        }
        if let Some(id) = &step.id
            && n.attrs.get("id") != Some(id)
        {
            return false;
        }
        if !step
            .classes
            .iter()
            .all(|class| n.classes.iter().any(|c| c == class))
        {
            return false;
        }
        step.attrs.iter().all(|condition| match condition {
            AttrCondition::Exists(name) => n.attrs.contains_key(name),
            AttrCondition::Equals(name, value) => n.attrs.get(name) == Some(value),
        })
    }

    // ----- rendering -----

    /// Serialize a node and its subtree as HTML.
    pub fn render_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.render_into(node, &mut out);
        out
    }

    fn render_into(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.node(node) else {
            return;
        };
        if node == self.root {
            for child in &n.children {
                self.render_into(*child, out);
            }
            return;
        }

        let _ = write!(out, "<{}", n.tag);
        if !n.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&n.classes.join(" ")));
        }
        for (name, value) in &n.attrs {
            if name == "class" || name == "style" {
                continue;
            }
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if !n.style.is_empty() {
            let _ = write!(out, " style=\"{}\"", escape(&self.style_attr(node)));
        }
        out.push('>');
        out.push_str(&escape(&n.text));
        for child in &n.children {
            self.render_into(*child, out);
        }
        let _ = write!(out, "</{}>", n.tag);
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
