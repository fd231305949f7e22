//! Page runtime.
//!
//! `Page` plays the role of the browser event loop for one document: it
//! wires the helpers up on load, dispatches events to the registered
//! listeners and runs deferred tasks as the virtual clock advances. It is
//! also the integration surface other scripts use (`show_notification`,
//! `format_number`, `create_confetti`).

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace, warn};

use pageflash_core::{Config, NumberLocale, Result, format_number};

use crate::dom::{Document, NodeId, Rect};
use crate::services::events::{DispatchOutcome, Event, EventKind, Listener, propagation_path};
use crate::services::surface::{PageSurface, Surface, Task};
use crate::services::timers::STEP_LIMIT;
use crate::widgets::notification_toast::{NotificationManager, Phase, ToastId};
use crate::widgets::reveal::{RevealOptions, ScrollReveal};
use crate::widgets::upload::FileField;
use crate::widgets::{
    Kind, background, confetti, css, form_validation, hover, menu, restart_animation, typewriter,
    upload,
};

/// A task that ran, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub at: Duration,
    pub task: Task,
}

/// One document plus everything that happens to it.
#[derive(Debug)]
pub struct Page {
    surface: PageSurface,
    config: Config,
    locale: NumberLocale,
    notifications: NotificationManager,
    reveal: ScrollReveal,
    rng: StdRng,
    loaded: bool,
}

impl Page {
    /// Wrap `document` with an entropy-seeded particle RNG.
    pub fn new(document: Document, config: Config) -> Result<Self> {
        Self::with_rng(document, config, StdRng::from_os_rng())
    }

    /// Wrap `document` with a seeded particle RNG.
    pub fn with_seed(document: Document, config: Config, seed: u64) -> Result<Self> {
        Self::with_rng(document, config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(document: Document, config: Config, rng: StdRng) -> Result<Self> {
        let locale = config.locale.number_locale()?;
        let notifications = NotificationManager::new(config.notifications.clone());
        Ok(Self {
            surface: PageSurface::new(document),
            config,
            locale,
            notifications,
            reveal: ScrollReveal::default(),
            rng,
            loaded: false,
        })
    }

    /// Run page initialization once, like `DOMContentLoaded`.
    pub fn load(&mut self) {
        if self.loaded {
            debug!("Page: already loaded");
            return;
        }
        self.loaded = true;

        css::install(self.surface.document_mut());
        let effects = &self.config.effects;
        background::init(&mut self.surface, effects.bubble_count);
        menu::init(&mut self.surface);
        let file_fields = upload::init(&mut self.surface);
        let forms = form_validation::init(&mut self.surface);
        self.reveal = ScrollReveal::init(&mut self.surface);
        let cards = hover::init(&mut self.surface);
        typewriter::init(
            &mut self.surface,
            Duration::from_millis(effects.typewriter_start_delay_ms),
        );
        info!("Chart animations ready");
        let discovered = self.notifications.attach_auto_discovered(&mut self.surface);

        info!(
            "Page loaded: {} file inputs, {} forms, {} hover cards, {} flash messages",
            file_fields.len(),
            forms.len(),
            cards.len(),
            discovered.len()
        );
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn document(&self) -> &Document {
        self.surface.document()
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.surface.document_mut()
    }

    pub fn surface(&self) -> &PageSurface {
        &self.surface
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    /// Current virtual time since load.
    pub fn now(&self) -> Duration {
        self.surface.now()
    }

    /// Number of tasks waiting on the clock.
    pub fn pending_tasks(&self) -> usize {
        self.surface.timers().len()
    }

    /// When the next pending task falls due.
    pub fn next_due(&self) -> Option<Duration> {
        self.surface.timers().next_due()
    }

    // ----- integration surface -----

    /// Show a notification toast.
    pub fn show_notification(&mut self, message: &str, kind: Kind) -> ToastId {
        self.notifications.show(&mut self.surface, message, kind)
    }

    /// Start fading a notification. Returns false if it was already going.
    pub fn dismiss_notification(&mut self, id: ToastId) -> bool {
        self.notifications.dismiss(&mut self.surface, id)
    }

    pub fn notification_phase(&self, id: ToastId) -> Phase {
        self.notifications.phase(id)
    }

    /// Format a number with the configured locale.
    pub fn format_number(&self, value: f64) -> String {
        format_number(value, self.locale)
    }

    /// Burst confetti out of `element`.
    pub fn create_confetti(&mut self, element: NodeId) -> Vec<NodeId> {
        confetti::burst(
            &mut self.surface,
            &mut self.rng,
            element,
            &self.config.effects,
        )
    }

    // ----- events -----

    /// Deliver `event` to `target`, bubbling through its ancestors.
    pub fn dispatch(&mut self, target: NodeId, mut event: Event) -> DispatchOutcome {
        let path = propagation_path(self.surface.document(), target, event.kind);
        let mut handled = 0;

        for node in path {
            let listeners = self.surface.listeners().listeners_for(node, event.kind);
            for listener in listeners {
                trace!("Page: {} on #{} -> {:?}", event.kind, node.index(), listener);
                self.run_listener(node, listener, &mut event);
                handled += 1;
            }
            if event.propagation_stopped() {
                break;
            }
        }

        DispatchOutcome {
            handled,
            default_prevented: event.default_prevented(),
        }
    }

    pub fn click(&mut self, target: NodeId) -> DispatchOutcome {
        self.dispatch(target, Event::new(EventKind::Click))
    }

    pub fn submit(&mut self, form: NodeId) -> DispatchOutcome {
        self.dispatch(form, Event::new(EventKind::Submit))
    }

    pub fn mouse_enter(&mut self, target: NodeId) -> DispatchOutcome {
        self.dispatch(target, Event::new(EventKind::MouseEnter))
    }

    pub fn mouse_leave(&mut self, target: NodeId) -> DispatchOutcome {
        self.dispatch(target, Event::new(EventKind::MouseLeave))
    }

    /// Drag files over `target` and drop them.
    pub fn drop_files(&mut self, target: NodeId, files: Vec<String>) -> DispatchOutcome {
        self.dispatch(target, Event::new(EventKind::DragEnter));
        self.dispatch(target, Event::new(EventKind::DragOver));
        self.dispatch(target, Event::with_files(EventKind::Drop, files))
    }

    /// Pick files in a file input, as the browser's file dialog would.
    pub fn select_files(&mut self, input: NodeId, files: Vec<String>) -> DispatchOutcome {
        self.surface.document_mut().set_files(input, files.clone());
        self.dispatch(input, Event::with_files(EventKind::Change, files))
    }

    /// Scroll so `viewport` is visible. Returns elements revealed by it.
    pub fn scroll(&mut self, viewport: Rect) -> Vec<NodeId> {
        let effects = &self.config.effects;
        let options = RevealOptions {
            threshold: effects.reveal_threshold,
            bottom_margin: effects.reveal_bottom_margin_px,
            card_stagger: Duration::from_millis(effects.card_stagger_ms),
        };
        self.reveal.on_scroll(&mut self.surface, viewport, options)
    }

    fn run_listener(&mut self, current: NodeId, listener: Listener, event: &mut Event) {
        let placeholder = self.config.messages.file_placeholder.clone();

        match listener {
            Listener::MenuToggle { menu } => {
                let stagger = Duration::from_millis(self.config.effects.menu_stagger_ms);
                menu::toggle(&mut self.surface, current, menu, stagger);
            }
            Listener::PreventDefault => {
                event.prevent_default();
                event.stop_propagation();
            }
            Listener::DragHighlight => upload::highlight(&mut self.surface, current),
            Listener::DragUnhighlight => upload::unhighlight(&mut self.surface, current),
            Listener::FileDrop { input } => {
                let field = FileField {
                    input,
                    container: current,
                };
                if upload::handle_drop(&mut self.surface, field, &event.files, &placeholder) {
                    self.create_confetti(current);
                }
            }
            Listener::FileChange { container } => {
                let field = FileField {
                    input: current,
                    container,
                };
                if upload::handle_change(&mut self.surface, field, &placeholder) {
                    self.create_confetti(container);
                }
            }
            Listener::ValidateForm => self.validate_form(current, event),
            Listener::HoverLift => hover::lift(&mut self.surface, current),
            Listener::HoverSettle => hover::settle(&mut self.surface, current),
            Listener::CloseHoverEnter => {
                NotificationManager::hover_close(&mut self.surface, current, true)
            }
            Listener::CloseHoverLeave => {
                NotificationManager::hover_close(&mut self.surface, current, false)
            }
            Listener::DismissToast(id) => {
                self.notifications.dismiss(&mut self.surface, id);
            }
        }
    }

    fn validate_form(&mut self, form: NodeId, event: &mut Event) {
        let report = form_validation::validate(
            &mut self.surface,
            form,
            &self.config.validation,
            &self.config.messages,
        );

        if report.is_valid() {
            let message = self.config.messages.form_valid.clone();
            self.show_notification(&message, Kind::Success);
        } else {
            event.prevent_default();
            let message = self.config.messages.form_invalid.clone();
            self.show_notification(&message, Kind::Error);
            restart_animation(&mut self.surface, form, "shake 0.5s ease");
        }
    }

    // ----- clock -----

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Toast(task) => self.notifications.handle_task(&mut self.surface, task),
            Task::SetStyle {
                node,
                property,
                value,
            } => self.surface.document_mut().set_style(node, property, &value),
            Task::Typewriter { node, text, index } => {
                let char_delay =
                    Duration::from_millis(self.config.effects.typewriter_char_delay_ms);
                typewriter::tick(&mut self.surface, node, text, index, char_delay);
            }
            Task::RemoveNode(node) => {
                if let Err(e) = self.surface.document_mut().detach(node) {
                    debug!("Page: particle #{} already gone: {}", node.index(), e);
                }
            }
        }
    }

    fn pop_and_run(&mut self, limit: Duration) -> Option<Step> {
        let (at, task) = self.surface.timers_mut().pop_due(limit)?;
        trace!("Page: t={}ms {}", at.as_millis(), task.label());
        self.run_task(task.clone());
        Some(Step { at, task })
    }

    /// Run the next pending task, whenever it is due.
    pub fn run_next(&mut self) -> Option<Step> {
        self.pop_and_run(Duration::MAX)
    }

    /// Move the clock forward by `by`, running everything that falls due.
    pub fn advance(&mut self, by: Duration) -> Vec<Step> {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Move the clock to `t`, running everything due by then.
    pub fn advance_to(&mut self, t: Duration) -> Vec<Step> {
        let mut steps = Vec::new();
        while steps.len() < STEP_LIMIT {
            match self.pop_and_run(t) {
                Some(step) => steps.push(step),
                None => break,
            }
        }
        if steps.len() == STEP_LIMIT {
            warn!("Page: step limit reached while advancing to {:?}", t);
        } else {
            self.surface.timers_mut().set_now(t);
        }
        steps
    }

    /// Run tasks until none are left (or the step limit is hit).
    pub fn flush(&mut self) -> Vec<Step> {
        let mut steps = Vec::new();
        while steps.len() < STEP_LIMIT {
            match self.run_next() {
                Some(step) => steps.push(step),
                None => return steps,
            }
        }
        warn!("Page: step limit reached with {} tasks pending", self.pending_tasks());
        steps
    }
}
