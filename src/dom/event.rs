use super::ElementId;
use crate::core::event::KeyCode;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Keydown,
    Click,
    Focus,
    Blur,
    Mouseover,
    Mouseout,
}

impl EventType {
    /// Focus and blur stay on their target; everything else bubbles.
    pub fn bubbles(self) -> bool {
        !matches!(self, EventType::Focus | EventType::Blur)
    }
}

/// Token identifying one registered listener. Allocated by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventType,
    pub target: ElementId,
    /// Element whose listener is currently running; updated during bubbling.
    pub current_target: ElementId,
    pub key_code: Option<KeyCode>,
    pub shift: bool,
    pub time_stamp: Instant,
    /// False for events the document synthesized itself (`focus()`, simulated clicks).
    pub is_trusted: bool,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl DomEvent {
    pub fn new(kind: EventType, target: ElementId, time_stamp: Instant) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            key_code: None,
            shift: false,
            time_stamp,
            is_trusted: true,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn keydown(target: ElementId, key: KeyCode, time_stamp: Instant) -> Self {
        Self {
            key_code: Some(key),
            ..Self::new(EventType::Keydown, target, time_stamp)
        }
    }

    pub fn synthetic(kind: EventType, target: ElementId, time_stamp: Instant) -> Self {
        Self {
            is_trusted: false,
            ..Self::new(kind, target, time_stamp)
        }
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
