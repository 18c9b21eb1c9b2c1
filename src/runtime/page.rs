use crate::core::config::MenuConfig;
use crate::core::error::MenuError;
use crate::core::event::KeyCode;
use crate::dom::{DomError, DomEvent, Document, ElementId, EventType, ListenerId};
use crate::widgets::MenuButton;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! { pub struct WidgetId; }

/// Listener the host page attaches itself, e.g. item activation semantics.
pub type HostHandler = Box<dyn FnMut(&mut Document, &mut DomEvent)>;

enum Handler {
    Widget(WidgetId),
    Host(HostHandler),
}

/// Upper bound on queued events drained per dispatch; guards against host
/// handlers that keep re-queueing.
const MAX_QUEUED_EVENTS_PER_DISPATCH: usize = 1024;

pub struct Page {
    doc: Document,
    config: MenuConfig,
    widgets: SlotMap<WidgetId, MenuButton>,
    handlers: FxHashMap<ListenerId, Handler>,
    next_listener: u32,
}

impl Page {
    pub fn new(doc: Document, config: MenuConfig) -> Self {
        Self {
            doc,
            config,
            widgets: SlotMap::with_key(),
            handlers: FxHashMap::default(),
            next_listener: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn widget(&self, id: WidgetId) -> Option<&MenuButton> {
        self.widgets.get(id)
    }

    pub fn widgets(&self) -> impl Iterator<Item = (WidgetId, &MenuButton)> {
        self.widgets.iter()
    }

    fn alloc_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        id
    }

    /// Builds and wires a menu button on `trigger`.
    pub fn attach(&mut self, trigger: ElementId) -> Result<WidgetId, MenuError> {
        let listener = self.alloc_listener();
        let mut button = MenuButton::new(&self.doc, trigger)?;
        button.init(&mut self.doc, listener, &self.config)?;

        let id = self.widgets.insert(button);
        self.handlers.insert(listener, Handler::Widget(id));
        Ok(id)
    }

    /// Attaches every element carrying the linking attribute, in document order.
    /// Stops at the first malformed trigger.
    pub fn attach_all(&mut self) -> Result<Vec<WidgetId>, MenuError> {
        let triggers = self
            .doc
            .elements_with_attribute(&self.config.controls_attribute);
        let mut out = Vec::with_capacity(triggers.len());
        for trigger in triggers {
            out.push(self.attach(trigger)?);
        }
        tracing::info!(count = out.len(), "menu buttons attached");
        Ok(out)
    }

    pub fn add_host_listener(
        &mut self,
        target: ElementId,
        kind: EventType,
        handler: HostHandler,
    ) -> Result<ListenerId, DomError> {
        let listener = self.alloc_listener();
        self.doc.add_event_listener(target, kind, listener)?;
        self.handlers.insert(listener, Handler::Host(handler));
        Ok(listener)
    }

    /// Delivers `event`, then everything the handlers queued. Returns the
    /// event as its listeners left it.
    pub fn dispatch(&mut self, event: DomEvent) -> DomEvent {
        self.doc.set_clock(event.time_stamp);
        let event = self.deliver(event);
        self.drain_pending();
        event
    }

    fn deliver(&mut self, mut event: DomEvent) -> DomEvent {
        let path = if event.kind.bubbles() {
            self.doc.propagation_path(event.target)
        } else {
            vec![event.target]
        };

        for node in path {
            event.current_target = node;
            for listener in self.doc.listeners(node, event.kind) {
                match self.handlers.get_mut(&listener) {
                    Some(Handler::Widget(id)) => {
                        if let Some(widget) = self.widgets.get_mut(*id) {
                            widget.handle_event(&mut self.doc, &mut event);
                        }
                    }
                    Some(Handler::Host(handler)) => handler(&mut self.doc, &mut event),
                    None => {}
                }
            }
            // Remaining listeners on the current node still ran.
            if event.propagation_stopped() {
                break;
            }
        }

        tracing::trace!(kind = ?event.kind, trusted = event.is_trusted, "event delivered");
        event
    }

    fn drain_pending(&mut self) {
        let mut budget = MAX_QUEUED_EVENTS_PER_DISPATCH;
        while let Some(event) = self.doc.take_pending() {
            if budget == 0 {
                tracing::warn!("queued event budget exhausted; dropping remaining events");
                while self.doc.take_pending().is_some() {}
                return;
            }
            budget -= 1;
            self.deliver(event);
        }
    }

    /// Keydown on the focused element (or `body`), followed by the default
    /// action: Tab and Shift+Tab move focus along the tab order.
    pub fn press_key(&mut self, key: KeyCode, shift: bool, now: Instant) -> DomEvent {
        let target = self.doc.active_element().unwrap_or(self.doc.body());
        let event = self.dispatch(DomEvent::keydown(target, key, now).with_shift(shift));

        if key == KeyCode::TAB && !event.default_prevented() {
            match self.doc.next_tab_stop(self.doc.active_element(), shift) {
                Some(next) => {
                    self.doc.focus(next);
                }
                None => self.doc.blur(),
            }
            self.drain_pending();
        }
        event
    }

    /// Pointer press and release on `target`: focus first, then click.
    pub fn click(&mut self, target: ElementId, now: Instant) -> DomEvent {
        self.doc.set_clock(now);
        if self.doc.is_focusable(target) {
            self.doc.focus(target);
            self.drain_pending();
        }
        self.dispatch(DomEvent::new(EventType::Click, target, now))
    }

    /// Pointer moved from `from` to `to`: mouseout on the old element, then
    /// mouseover on the new one.
    pub fn pointer_moved(&mut self, from: Option<ElementId>, to: Option<ElementId>, now: Instant) {
        if from == to {
            return;
        }
        if let Some(from) = from {
            self.dispatch(DomEvent::new(EventType::Mouseout, from, now));
        }
        if let Some(to) = to {
            self.dispatch(DomEvent::new(EventType::Mouseover, to, now));
        }
    }

    /// Focus leaves the document (e.g. the window lost focus).
    pub fn blur(&mut self, now: Instant) {
        self.doc.set_clock(now);
        self.doc.blur();
        self.drain_pending();
    }

    pub fn close_menu(&mut self, id: WidgetId, force: bool) -> Option<bool> {
        let widget = self.widgets.get_mut(id)?;
        Some(widget.close_menu(&mut self.doc, force))
    }

    /// Fires due close timers. Returns true if any menu closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.doc.set_clock(now);
        let mut changed = false;
        for (_, widget) in self.widgets.iter_mut() {
            changed |= widget.poll_timers(&mut self.doc, now);
        }
        self.drain_pending();
        changed
    }

    /// Earliest pending close deadline across all widgets.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.widgets
            .values()
            .filter_map(MenuButton::next_deadline)
            .min()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/page.rs"]
mod tests;
