//! Flash message lifecycle.
//!
//! Toasts are either shown at runtime (`show`) or discovered in the page
//! markup (`attach_auto_discovered`). Each one walks a one-way state machine:
//!
//! ```text
//! Created -> Visible -> Fading -> Removed
//!     \____________________/
//!       (dismissed early)
//! ```
//!
//! Every transition is driven by a `ToastTask` on the surface's timer queue.
//! Tasks for a toast that has moved on are no-ops, so an auto-dismiss that
//! fires after a manual dismissal needs no cancellation.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tracing::{debug, trace, warn};

use pageflash_core::config::NotificationsConfig;

use crate::dom::NodeId;
use crate::services::events::{EventKind, Listener};
use crate::services::surface::{Surface, Task};
use crate::styles::flash;

use super::notification_common::{
    CLOSE_GLYPH, CLOSE_HOVER_TRANSFORM, CLOSE_REST_TRANSFORM, HIDDEN_TRANSFORM, Kind,
    SHOWN_TRANSFORM,
};

/// Handle to a managed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a toast came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Created through `show`.
    Programmatic,
    /// Rendered with the page and picked up at load.
    Discovered,
}

/// Lifecycle state of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Visible,
    Fading,
    Removed,
}

/// Lifecycle step carried by a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStep {
    /// Run the enter transition.
    Enter,
    /// Timeout elapsed: start fading if still shown.
    AutoDismiss,
    /// Exit transition finished: detach the node.
    Detach,
}

impl ToastStep {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastStep::Enter => "enter",
            ToastStep::AutoDismiss => "auto-dismiss",
            ToastStep::Detach => "detach",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTask {
    pub id: ToastId,
    pub step: ToastStep,
}

/// Read-only view of a managed toast.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub node: NodeId,
    pub kind: Kind,
    pub message: String,
    pub origin: Origin,
    pub phase: Phase,
    /// Virtual time the toast was created or discovered.
    pub created_at: Duration,
}

/// Owns every live toast and the container they stack in.
#[derive(Debug, Clone)]
pub struct NotificationManager {
    config: NotificationsConfig,
    toasts: HashMap<ToastId, Toast>,
    next_id: u64,
    container: Option<NodeId>,
}

impl NotificationManager {
    pub fn new(config: NotificationsConfig) -> Self {
        Self {
            config,
            toasts: HashMap::new(),
            next_id: 1,
            container: None,
        }
    }

    pub fn config(&self) -> &NotificationsConfig {
        &self.config
    }

    fn allocate_id(&mut self) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Show a notification. The container is created on first use.
    pub fn show(&mut self, surface: &mut impl Surface, message: &str, kind: Kind) -> ToastId {
        let id = self.allocate_id();
        let container = self.ensure_container(surface);

        let node = surface.create_element("div");
        let doc = surface.document_mut();
        doc.add_class(node, flash::MESSAGE);
        doc.add_class(node, &kind.css_class());
        doc.set_style(node, "opacity", "0");
        doc.set_style(node, "transform", HIDDEN_TRANSFORM);

        let icon = doc.create_child(node, "i", &[flash::ICON]);
        doc.set_text(icon, kind.icon());
        let text = doc.create_child(node, "span", &[flash::TEXT]);
        doc.set_text(text, message);

        if let Err(e) = surface.append_child(container, node) {
            warn!("NotificationToast: failed to insert id={}: {}", id, e);
        }
        Self::add_close_button(surface, id, node, false);

        // Enter is queued before the auto-dismiss timer.
        let enter_delay = self.config.enter_delay();
        let timeout = self.config.timeout();
        surface.schedule(enter_delay, Task::Toast(ToastTask { id, step: ToastStep::Enter }));
        surface.schedule(
            timeout,
            Task::Toast(ToastTask {
                id,
                step: ToastStep::AutoDismiss,
            }),
        );

        debug!(
            "NotificationToast: id={} kind={} timeout_ms={} node={}",
            id,
            kind,
            timeout.as_millis(),
            node.index()
        );

        self.toasts.insert(
            id,
            Toast {
                node,
                kind,
                message: message.to_string(),
                origin: Origin::Programmatic,
                phase: Phase::Created,
                created_at: surface.now(),
            },
        );
        id
    }

    /// Manage flash messages already present in the page.
    ///
    /// Each unmanaged `.flash-message` gets a close button and the longer
    /// auto-dismiss timeout. Messages seen before are skipped.
    pub fn attach_auto_discovered(&mut self, surface: &mut impl Surface) -> Vec<ToastId> {
        let candidates = surface
            .document()
            .query_selector_all(flash::MESSAGE_SELECTOR);
        let mut attached = Vec::new();

        for node in candidates {
            if self.toasts.values().any(|toast| toast.node == node) {
                continue;
            }

            let doc = surface.document();
            let kind = Kind::from_classes(doc.classes(node)).unwrap_or_default();
            let message = doc.text_content(node).trim().to_string();
            let existing_close = doc
                .query_selector_all_from(node, flash::CLOSE_SELECTOR)
                .first()
                .copied();

            let id = self.allocate_id();
            match existing_close {
                Some(button) => Self::wire_close_button(surface, id, button, true),
                None => Self::add_close_button(surface, id, node, true),
            }

            let timeout = self.config.discovered_timeout();
            surface.schedule(
                timeout,
                Task::Toast(ToastTask {
                    id,
                    step: ToastStep::AutoDismiss,
                }),
            );

            debug!(
                "NotificationToast: discovered id={} kind={} timeout_ms={}",
                id,
                kind,
                timeout.as_millis()
            );

            self.toasts.insert(
                id,
                Toast {
                    node,
                    kind,
                    message,
                    origin: Origin::Discovered,
                    phase: Phase::Visible,
                    created_at: surface.now(),
                },
            );
            attached.push(id);
        }

        attached
    }

    fn add_close_button(surface: &mut impl Surface, id: ToastId, node: NodeId, hover: bool) {
        let button = surface.create_element("button");
        let doc = surface.document_mut();
        doc.add_class(button, flash::CLOSE);
        doc.set_attr(button, "type", "button");
        doc.set_text(button, CLOSE_GLYPH);
        if let Err(e) = surface.append_child(node, button) {
            warn!("NotificationToast: failed to add close button for id={}: {}", id, e);
            return;
        }
        Self::wire_close_button(surface, id, button, hover);
    }

    /// Make `button` dismiss toast `id` on click, with optional hover transforms.
    fn wire_close_button(surface: &mut impl Surface, id: ToastId, button: NodeId, hover: bool) {
        surface.listen(button, EventKind::Click, Listener::DismissToast(id));
        if hover {
            surface.listen(button, EventKind::MouseEnter, Listener::CloseHoverEnter);
            surface.listen(button, EventKind::MouseLeave, Listener::CloseHoverLeave);
        }
    }

    /// Apply the close button hover transform.
    pub fn hover_close(surface: &mut impl Surface, button: NodeId, hovered: bool) {
        let transform = if hovered {
            CLOSE_HOVER_TRANSFORM
        } else {
            CLOSE_REST_TRANSFORM
        };
        surface.document_mut().set_style(button, "transform", transform);
    }

    /// Existing container, or a new one prepended to the configured root
    /// (falling back to `<body>`).
    fn ensure_container(&mut self, surface: &mut impl Surface) -> NodeId {
        if let Some(container) = self.container
            && surface.document().is_connected(container)
        {
            return container;
        }

        if let Some(existing) = surface.document().query_selector(flash::CONTAINER_SELECTOR) {
            self.container = Some(existing);
            return existing;
        }

        let container = surface.create_element("div");
        surface.document_mut().add_class(container, flash::CONTAINER);

        let root = surface
            .document()
            .query_selector(&self.config.container_root)
            .unwrap_or_else(|| {
                debug!(
                    "NotificationToast: '{}' not found, using body",
                    self.config.container_root
                );
                surface.document().body()
            });
        if let Err(e) = surface.prepend_child(root, container) {
            warn!("NotificationToast: failed to insert container: {}", e);
        }

        debug!("NotificationToast: created container node={}", container.index());
        self.container = Some(container);
        container
    }

    /// Start fading a toast now. Unknown, fading or removed toasts are left alone.
    pub fn dismiss(&mut self, surface: &mut impl Surface, id: ToastId) -> bool {
        match self.phase(id) {
            Phase::Created | Phase::Visible => {
                self.begin_fade(surface, id);
                true
            }
            Phase::Fading | Phase::Removed => {
                trace!("NotificationToast: dismiss ignored for id={}", id);
                false
            }
        }
    }

    fn begin_fade(&mut self, surface: &mut impl Surface, id: ToastId) {
        let Some(toast) = self.toasts.get_mut(&id) else {
            return;
        };
        let doc = surface.document_mut();
        doc.set_style(toast.node, "opacity", "0");
        doc.set_style(toast.node, "transform", HIDDEN_TRANSFORM);
        toast.phase = Phase::Fading;

        surface.schedule(
            self.config.exit_transition(),
            Task::Toast(ToastTask {
                id,
                step: ToastStep::Detach,
            }),
        );
        debug!("NotificationToast: id={} fading", id);
    }

    /// Advance a toast's lifecycle.
    pub fn handle_task(&mut self, surface: &mut impl Surface, task: ToastTask) {
        let ToastTask { id, step } = task;
        let Some(toast) = self.toasts.get_mut(&id) else {
            trace!("NotificationToast: {} for untracked id={}", step.as_str(), id);
            return;
        };

        match step {
            ToastStep::Enter => {
                if toast.phase == Phase::Created {
                    let doc = surface.document_mut();
                    doc.set_style(toast.node, "opacity", "1");
                    doc.set_style(toast.node, "transform", SHOWN_TRANSFORM);
                    toast.phase = Phase::Visible;
                    debug!("NotificationToast: id={} visible", id);
                }
            }
            ToastStep::AutoDismiss => {
                if !matches!(toast.phase, Phase::Created | Phase::Visible) {
                    return;
                }
                if surface.document().parent(toast.node).is_none() {
                    debug!("NotificationToast: id={} already detached", id);
                    self.toasts.remove(&id);
                    return;
                }
                debug!("NotificationToast: timeout fired for id={}", id);
                self.begin_fade(surface, id);
            }
            ToastStep::Detach => {
                if toast.phase != Phase::Fading {
                    return;
                }
                let node = toast.node;
                if let Some(parent) = surface.document().parent(node)
                    && let Err(e) = surface.remove_child(parent, node)
                {
                    warn!("NotificationToast: failed to detach id={}: {}", id, e);
                }
                self.toasts.remove(&id);
                debug!("NotificationToast: id={} removed", id);
            }
        }
    }

    /// Lifecycle phase; `Removed` for ids no longer tracked.
    pub fn phase(&self, id: ToastId) -> Phase {
        self.toasts
            .get(&id)
            .map(|toast| toast.phase)
            .unwrap_or(Phase::Removed)
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.get(&id)
    }

    pub fn node(&self, id: ToastId) -> Option<NodeId> {
        self.toasts.get(&id).map(|toast| toast.node)
    }

    /// Ids of every toast not yet removed, oldest first.
    pub fn active_ids(&self) -> Vec<ToastId> {
        let mut ids: Vec<_> = self.toasts.keys().copied().collect();
        ids.sort();
        ids
    }

    /// The notification container, once one has been found or created.
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }
}
