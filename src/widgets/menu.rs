use super::timer::CloseTimer;
use crate::core::config::MenuConfig;
use crate::core::error::MenuError;
use crate::core::event::KeyCode;
use crate::dom::{Display, DomEvent, Document, ElementId, EventType, ListenerId, Position};
use std::time::Instant;

/// What a menu needs to know about the control that owns it.
pub trait MenuOwner {
    fn trigger(&self) -> ElementId;

    fn has_hover(&self) -> bool;
}

/// Popup list of role-marked items.
///
/// Visibility lives in the container's inline style and is never cached here:
/// `is_open` always reads the document.
#[derive(Debug)]
pub struct Menu {
    container: ElementId,
    items: Vec<ElementId>,
    has_hover: bool,
    has_focus: bool,
    current_item: Option<usize>,
    close_timer: CloseTimer,
}

impl Menu {
    pub fn new(doc: &Document, container: ElementId, config: &MenuConfig) -> Result<Self, MenuError> {
        if !doc.contains(container) {
            return Err(MenuError::NotAnElement);
        }

        let items: Vec<ElementId> = doc
            .children(container)
            .iter()
            .copied()
            .filter(|child| doc.attribute(*child, "role") == Some(config.item_role.as_str()))
            .collect();
        if items.is_empty() {
            return Err(MenuError::NoMenuItems);
        }

        Ok(Self {
            container,
            items,
            has_hover: false,
            has_focus: false,
            current_item: None,
            close_timer: CloseTimer::new(config.close_delay()),
        })
    }

    /// Takes items out of the tab order and registers the menu's listeners.
    pub fn init(&mut self, doc: &mut Document, listener: ListenerId) -> Result<(), MenuError> {
        let register = |doc: &mut Document, id: ElementId, kind: EventType| {
            doc.add_event_listener(id, kind, listener)
                .map_err(|_| MenuError::NotAnElement)
        };

        doc.set_tab_index(self.container, -1);
        register(doc, self.container, EventType::Mouseover)?;
        register(doc, self.container, EventType::Mouseout)?;

        for &item in &self.items {
            doc.set_tab_index(item, -1);
            for kind in [
                EventType::Keydown,
                EventType::Click,
                EventType::Focus,
                EventType::Blur,
            ] {
                register(doc, item, kind)?;
            }
        }

        tracing::debug!(items = self.items.len(), "menu initialized");
        Ok(())
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    pub fn first_item(&self) -> Option<ElementId> {
        self.items.first().copied()
    }

    pub fn last_item(&self) -> Option<ElementId> {
        self.items.last().copied()
    }

    /// The item that most recently received focus.
    pub fn current_item(&self) -> Option<ElementId> {
        self.current_item.and_then(|i| self.items.get(i).copied())
    }

    pub fn has_hover(&self) -> bool {
        self.has_hover
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.style(self.container)
            .is_some_and(|s| s.display != Display::None)
    }

    pub fn close_deadline(&self) -> Option<Instant> {
        self.close_timer.deadline()
    }

    fn item_index(&self, id: ElementId) -> Option<usize> {
        self.items.iter().position(|item| *item == id)
    }

    pub fn handle_event(&mut self, doc: &mut Document, event: &mut DomEvent, owner: &impl MenuOwner) {
        if event.current_target == self.container {
            match event.kind {
                EventType::Mouseover => self.handle_mouseover(),
                EventType::Mouseout => self.handle_mouseout(event.time_stamp),
                _ => {}
            }
            return;
        }

        let Some(index) = self.item_index(event.current_target) else {
            return;
        };
        match event.kind {
            EventType::Keydown => self.handle_keydown(doc, event, index, owner),
            EventType::Click => self.handle_click(doc, owner),
            EventType::Focus => self.handle_focus(index),
            EventType::Blur => self.handle_blur(doc, event.time_stamp),
            _ => {}
        }
    }

    fn handle_keydown(
        &mut self,
        doc: &mut Document,
        event: &mut DomEvent,
        index: usize,
        owner: &impl MenuOwner,
    ) {
        let Some(key) = event.key_code else {
            return;
        };

        let handled = match key {
            KeyCode::SPACE | KeyCode::RETURN => {
                // Activation goes through the item's click path.
                let item = self.items[index];
                doc.dispatch_event(DomEvent::synthetic(EventType::Click, item, event.time_stamp));
                true
            }
            KeyCode::ESC => {
                self.return_focus(doc, owner);
                self.close(doc, true, owner);
                true
            }
            KeyCode::UP | KeyCode::LEFT => {
                self.focus_previous_item(doc, index);
                true
            }
            KeyCode::DOWN | KeyCode::RIGHT => {
                self.focus_next_item(doc, index);
                true
            }
            KeyCode::HOME | KeyCode::PAGEUP => {
                self.focus_first_item(doc);
                true
            }
            KeyCode::END | KeyCode::PAGEDOWN => {
                self.focus_last_item(doc);
                true
            }
            KeyCode::TAB => {
                self.close(doc, false, owner);
                false
            }
            _ => false,
        };

        if handled {
            tracing::trace!(key = ?key.name(), "menu item key handled");
            event.stop_propagation();
            event.prevent_default();
        }
    }

    fn handle_click(&mut self, doc: &mut Document, owner: &impl MenuOwner) {
        self.return_focus(doc, owner);
        self.close(doc, false, owner);
    }

    fn handle_focus(&mut self, index: usize) {
        self.has_focus = true;
        self.current_item = Some(index);
        self.close_timer.cancel();
    }

    /// A hidden menu has nothing left to close, e.g. focus returning to the
    /// trigger after Esc.
    fn handle_blur(&mut self, doc: &Document, now: Instant) {
        self.has_focus = false;
        if self.is_open(doc) {
            self.close_timer.arm(now);
        }
    }

    fn handle_mouseover(&mut self) {
        self.has_hover = true;
        self.close_timer.cancel();
    }

    fn handle_mouseout(&mut self, now: Instant) {
        self.has_hover = false;
        self.close_timer.arm(now);
    }

    /// Focus leaves the menu for the trigger. The blur the document queues
    /// arrives after the caller's close check, so the flag is cleared here.
    fn return_focus(&mut self, doc: &mut Document, owner: &impl MenuOwner) {
        if doc.focus(owner.trigger()) {
            self.has_focus = false;
        }
    }

    fn focus_index(&self, doc: &mut Document, index: usize) {
        if let Some(item) = self.items.get(index) {
            doc.focus(*item);
        }
    }

    pub fn focus_first_item(&self, doc: &mut Document) {
        self.focus_index(doc, 0);
    }

    pub fn focus_last_item(&self, doc: &mut Document) {
        if let Some(last) = self.items.len().checked_sub(1) {
            self.focus_index(doc, last);
        }
    }

    /// Wraps to the first item past the end.
    pub fn focus_next_item(&self, doc: &mut Document, from: usize) {
        if self.items.is_empty() {
            return;
        }
        let next = if from + 1 >= self.items.len() { 0 } else { from + 1 };
        self.focus_index(doc, next);
    }

    /// Wraps to the last item before the start.
    pub fn focus_previous_item(&self, doc: &mut Document, from: usize) {
        if self.items.is_empty() {
            return;
        }
        let prev = match from.checked_sub(1) {
            Some(prev) if prev < self.items.len() => prev,
            _ => self.items.len() - 1,
        };
        self.focus_index(doc, prev);
    }

    /// Shows the container just below the owner's trigger.
    pub fn open(&mut self, doc: &mut Document, owner: &impl MenuOwner) {
        let trigger = owner.trigger();
        let pos = doc.offset_position(trigger);
        let height = doc.bounding_height(trigger);

        let Some(style) = doc.style_mut(self.container) else {
            return;
        };
        let was_open = style.display != Display::None;
        style.display = Display::Block;
        style.position = Position::Absolute;
        style.top = Some(pos.y + height);
        style.left = Some(pos.x);

        if !was_open {
            tracing::debug!(left = pos.x, top = pos.y + height, "menu opened");
        }
    }

    /// Hides the container when forced, or when neither the menu nor the
    /// owner is being interacted with. Returns whether the menu is hidden.
    pub fn close(&mut self, doc: &mut Document, force: bool, owner: &impl MenuOwner) -> bool {
        if !force && (self.has_focus || self.has_hover || owner.has_hover()) {
            tracing::trace!(
                menu_focus = self.has_focus,
                menu_hover = self.has_hover,
                owner_hover = owner.has_hover(),
                "menu close deferred to interaction"
            );
            return false;
        }

        if force {
            self.close_timer.cancel();
        }
        let Some(style) = doc.style_mut(self.container) else {
            return false;
        };
        if style.display != Display::None {
            style.display = Display::None;
            tracing::debug!(force, "menu closed");
        }
        true
    }

    pub fn schedule_close(&mut self, now: Instant) {
        self.close_timer.arm(now);
    }

    pub fn cancel_close(&mut self) {
        self.close_timer.cancel();
    }

    /// Runs the pending close attempt if its deadline has passed. The attempt
    /// sees the hover/focus state as of `now`.
    pub fn poll_close(&mut self, doc: &mut Document, now: Instant, owner: &impl MenuOwner) -> bool {
        if !self.close_timer.fire(now) {
            return false;
        }
        let was_open = self.is_open(doc);
        self.close(doc, false, owner) && was_open
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/menu.rs"]
mod tests;
