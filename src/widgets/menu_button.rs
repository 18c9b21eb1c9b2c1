use super::menu::{Menu, MenuOwner};
use crate::core::config::MenuConfig;
use crate::core::error::MenuError;
use crate::core::event::KeyCode;
use crate::dom::{DomEvent, Document, ElementId, EventType, ListenerId};
use std::time::Instant;

/// Trigger-side state the owned menu reads back through [`MenuOwner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerState {
    trigger: ElementId,
    has_hover: bool,
    has_focus: bool,
    is_link: bool,
}

impl MenuOwner for TriggerState {
    fn trigger(&self) -> ElementId {
        self.trigger
    }

    fn has_hover(&self) -> bool {
        self.has_hover
    }
}

#[derive(Debug)]
pub struct MenuButton {
    state: TriggerState,
    menu: Option<Menu>,
}

impl MenuButton {
    pub fn new(doc: &Document, trigger: ElementId) -> Result<Self, MenuError> {
        if !doc.contains(trigger) {
            return Err(MenuError::NotAnElement);
        }

        let is_link = doc.tag(trigger) == Some("a") && doc.has_href(trigger);

        Ok(Self {
            state: TriggerState {
                trigger,
                has_hover: false,
                has_focus: false,
                is_link,
            },
            menu: None,
        })
    }

    /// Resolves the linked menu, builds it, and registers trigger listeners.
    pub fn init(
        &mut self,
        doc: &mut Document,
        listener: ListenerId,
        config: &MenuConfig,
    ) -> Result<(), MenuError> {
        if self.menu.is_some() {
            return Err(MenuError::AlreadyInitialized);
        }

        let trigger = self.state.trigger;
        let id = doc
            .attribute(trigger, &config.controls_attribute)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(MenuError::MissingControls)?
            .to_string();
        let container = doc
            .element_by_id(&id)
            .ok_or_else(|| MenuError::ControlsNotFound(id.clone()))?;

        let mut menu = Menu::new(doc, container, config)?;
        menu.init(doc, listener)?;

        for kind in [
            EventType::Keydown,
            EventType::Click,
            EventType::Focus,
            EventType::Blur,
            EventType::Mouseover,
            EventType::Mouseout,
        ] {
            doc.add_event_listener(trigger, kind, listener)
                .map_err(|_| MenuError::NotAnElement)?;
        }

        tracing::debug!(menu = %id, is_link = self.state.is_link, "menu button initialized");
        self.menu = Some(menu);
        Ok(())
    }

    pub fn trigger(&self) -> ElementId {
        self.state.trigger
    }

    pub fn menu(&self) -> Option<&Menu> {
        self.menu.as_ref()
    }

    pub fn has_hover(&self) -> bool {
        self.state.has_hover
    }

    pub fn has_focus(&self) -> bool {
        self.state.has_focus
    }

    pub fn is_link(&self) -> bool {
        self.state.is_link
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        self.menu.as_ref().is_some_and(|m| m.is_open(doc))
    }

    /// Routes an event delivered to one of this widget's listeners.
    pub fn handle_event(&mut self, doc: &mut Document, event: &mut DomEvent) {
        if event.current_target != self.state.trigger {
            if let Some(menu) = self.menu.as_mut() {
                menu.handle_event(doc, event, &self.state);
            }
            return;
        }

        match event.kind {
            EventType::Keydown => self.handle_keydown(doc, event),
            EventType::Click => self.handle_click(doc, event),
            EventType::Focus => self.state.has_focus = true,
            EventType::Blur => self.state.has_focus = false,
            EventType::Mouseover => self.handle_mouseover(doc),
            EventType::Mouseout => self.handle_mouseout(event.time_stamp),
        }
    }

    fn handle_keydown(&mut self, doc: &mut Document, event: &mut DomEvent) {
        let Some(key) = event.key_code else {
            return;
        };

        let handled = match key {
            KeyCode::SPACE | KeyCode::RETURN | KeyCode::DOWN => {
                self.move_focus_to_first_item(doc);
                true
            }
            KeyCode::UP => {
                self.move_focus_to_last_item(doc);
                true
            }
            KeyCode::TAB => {
                self.close_menu(doc, false);
                false
            }
            _ => false,
        };

        if handled {
            tracing::trace!(key = ?key.name(), "menu button key handled");
            event.stop_propagation();
            event.prevent_default();
        }
    }

    /// Always opens; closing belongs to the menu, Esc and Tab.
    fn handle_click(&mut self, doc: &mut Document, event: &mut DomEvent) {
        self.move_focus_to_first_item(doc);
        if self.state.is_link {
            event.prevent_default();
        }
    }

    fn handle_mouseover(&mut self, doc: &mut Document) {
        self.state.has_hover = true;
        if let Some(menu) = self.menu.as_mut() {
            menu.cancel_close();
            menu.open(doc, &self.state);
        }
    }

    fn handle_mouseout(&mut self, now: Instant) {
        self.state.has_hover = false;
        if let Some(menu) = self.menu.as_mut() {
            menu.schedule_close(now);
        }
    }

    pub fn move_focus_to_first_item(&mut self, doc: &mut Document) {
        if let Some(menu) = self.menu.as_mut() {
            menu.open(doc, &self.state);
            menu.focus_first_item(doc);
        }
    }

    pub fn move_focus_to_last_item(&mut self, doc: &mut Document) {
        if let Some(menu) = self.menu.as_mut() {
            menu.open(doc, &self.state);
            menu.focus_last_item(doc);
        }
    }

    /// The menu decides whether hover/focus still hold it open.
    pub fn close_menu(&mut self, doc: &mut Document, force: bool) -> bool {
        match self.menu.as_mut() {
            Some(menu) => menu.close(doc, force, &self.state),
            None => false,
        }
    }

    pub fn poll_timers(&mut self, doc: &mut Document, now: Instant) -> bool {
        match self.menu.as_mut() {
            Some(menu) => menu.poll_close(doc, now, &self.state),
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.menu.as_ref().and_then(Menu::close_deadline)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/menu_button.rs"]
mod tests;
