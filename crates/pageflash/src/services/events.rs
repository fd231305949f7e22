//! DOM-style events and listener registration.
//!
//! Listeners are a closed set of handler descriptions rather than closures;
//! the page runtime interprets them when an event reaches their node.

use std::collections::HashMap;
use std::fmt;

use crate::dom::{Document, NodeId};
use crate::widgets::notification_toast::ToastId;

/// Event types the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseEnter,
    MouseLeave,
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
    Change,
    Submit,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::DragEnter => "dragenter",
            EventKind::DragOver => "dragover",
            EventKind::DragLeave => "dragleave",
            EventKind::Drop => "drop",
            EventKind::Change => "change",
            EventKind::Submit => "submit",
        }
    }

    /// Mouse enter/leave do not bubble in browsers.
    pub fn bubbles(self) -> bool {
        !matches!(self, EventKind::MouseEnter | EventKind::MouseLeave)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    /// Dropped or selected file names (drop / change on file inputs).
    pub files: Vec<String>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            files: Vec::new(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn with_files(kind: EventKind, files: Vec<String>) -> Self {
        Self {
            files,
            ..Self::new(kind)
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Number of listeners that ran.
    pub handled: usize,
    pub default_prevented: bool,
}

/// Handlers the page helpers register.
#[derive(Debug, Clone, PartialEq)]
pub enum Listener {
    /// Mobile menu button: toggle the navigation list.
    MenuToggle { menu: NodeId },
    /// Cancel the browser's default drag/drop handling.
    PreventDefault,
    DragHighlight,
    DragUnhighlight,
    /// Drop on a `.file-input` container: hand the files to `input`.
    FileDrop { input: NodeId },
    /// Selection change on a file input inside `container`.
    FileChange { container: NodeId },
    ValidateForm,
    HoverLift,
    HoverSettle,
    CloseHoverEnter,
    CloseHoverLeave,
    DismissToast(ToastId),
}

/// Listeners per node, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ListenerStore {
    by_node: HashMap<NodeId, Vec<(EventKind, Listener)>>,
}

impl ListenerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: NodeId, kind: EventKind, listener: Listener) {
        self.by_node.entry(node).or_default().push((kind, listener));
    }

    /// Listeners on `node` for `kind`, cloned so handlers can mutate the page.
    pub fn listeners_for(&self, node: NodeId, kind: EventKind) -> Vec<Listener> {
        self.by_node
            .get(&node)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, listener)| listener.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn count(&self, node: NodeId, kind: EventKind) -> usize {
        self.by_node
            .get(&node)
            .map(|entries| entries.iter().filter(|(k, _)| *k == kind).count())
            .unwrap_or(0)
    }

    /// Total registered listeners.
    pub fn len(&self) -> usize {
        self.by_node.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Nodes an event visits: the target, then each ancestor (for bubbling kinds).
pub fn propagation_path(doc: &Document, target: NodeId, kind: EventKind) -> Vec<NodeId> {
    let mut path = vec![target];
    if kind.bubbles() {
        let mut cursor = doc.parent(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = doc.parent(node);
        }
    }
    path
}
