//! Rendering surface abstraction.
//!
//! Page helpers never reach for globals: they get a `Surface` that can build
//! and rearrange elements, schedule deferred work and register listeners.
//! `PageSurface` is the in-memory implementation used by the runtime and the
//! tests.

use std::time::Duration;

use crate::dom::{Document, DomError, NodeId};
use crate::widgets::notification_toast::ToastTask;

use super::events::{EventKind, Listener, ListenerStore};
use super::timers::TimerQueue;

/// Deferred actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Step of a notification's lifecycle.
    Toast(ToastTask),
    /// Set an inline style property (second half of an animation restart).
    SetStyle {
        node: NodeId,
        property: &'static str,
        value: String,
    },
    /// Type the next character of a typewriter reveal.
    Typewriter {
        node: NodeId,
        text: String,
        index: usize,
    },
    /// Remove a finished particle.
    RemoveNode(NodeId),
}

impl Task {
    /// Short human-readable label for timelines and logs.
    pub fn label(&self) -> String {
        match self {
            Task::Toast(task) => format!("toast {} {}", task.id, task.step.as_str()),
            Task::SetStyle {
                node,
                property,
                value,
            } => format!("style #{} {}: {}", node.index(), property, value),
            Task::Typewriter { node, index, .. } => {
                format!("typewriter #{} char {}", node.index(), index)
            }
            Task::RemoveNode(node) => format!("remove #{}", node.index()),
        }
    }
}

/// What page helpers need from their environment.
pub trait Surface {
    fn document(&self) -> &Document;

    fn document_mut(&mut self) -> &mut Document;

    /// Current virtual time.
    fn now(&self) -> Duration;

    /// Run `task` once `after` has elapsed.
    fn schedule(&mut self, after: Duration, task: Task);

    fn listen(&mut self, node: NodeId, kind: EventKind, listener: Listener);

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.document_mut().create_element(tag)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.document_mut().append_child(parent, child)
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.document_mut().prepend_child(parent, child)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.document_mut().remove_child(parent, child)
    }
}

/// In-memory surface: a document, a virtual clock and a listener table.
#[derive(Debug, Clone, Default)]
pub struct PageSurface {
    document: Document,
    timers: TimerQueue<Task>,
    listeners: ListenerStore,
}

impl PageSurface {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            timers: TimerQueue::new(),
            listeners: ListenerStore::new(),
        }
    }

    pub fn timers(&self) -> &TimerQueue<Task> {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerQueue<Task> {
        &mut self.timers
    }

    pub fn listeners(&self) -> &ListenerStore {
        &self.listeners
    }
}

impl Surface for PageSurface {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    fn now(&self) -> Duration {
        self.timers.now()
    }

    fn schedule(&mut self, after: Duration, task: Task) {
        self.timers.schedule(after, task);
    }

    fn listen(&mut self, node: NodeId, kind: EventKind, listener: Listener) {
        self.listeners.add(node, kind, listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_uses_virtual_clock() {
        let mut surface = PageSurface::default();
        surface.timers_mut().set_now(Duration::from_millis(100));
        let node = surface.create_element("div");
        surface.schedule(Duration::from_millis(50), Task::RemoveNode(node));
        assert_eq!(surface.now(), Duration::from_millis(100));
        assert_eq!(surface.timers().next_due(), Some(Duration::from_millis(150)));
    }

    #[test]
    fn test_structural_helpers_delegate_to_document() {
        let mut surface = PageSurface::default();
        let body = surface.document().body();
        let a = surface.create_element("p");
        let b = surface.create_element("p");
        surface.append_child(body, a).unwrap();
        surface.prepend_child(body, b).unwrap();
        assert_eq!(surface.document().children(body), &[b, a]);
        surface.remove_child(body, a).unwrap();
        assert!(surface.remove_child(body, a).is_err());
    }

    #[test]
    fn test_task_labels() {
        let node = PageSurface::default().document().body();
        assert_eq!(
            Task::SetStyle {
                node,
                property: "animation",
                value: "pulse 0.6s ease".into()
            }
            .label(),
            format!("style #{} animation: pulse 0.6s ease", node.index())
        );
        assert_eq!(Task::RemoveNode(node).label(), format!("remove #{}", node.index()));
    }
}
