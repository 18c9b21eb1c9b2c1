use crate::dom::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChange {
    pub from: Option<ElementId>,
    pub to: Option<ElementId>,
}

/// Remembers the element under the pointer so moves turn into
/// mouseout/mouseover pairs only when the hit element changes.
#[derive(Debug, Default)]
pub struct HoverTracker {
    hovered: Option<ElementId>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    pub fn update(&mut self, hit: Option<ElementId>) -> Option<HoverChange> {
        if hit == self.hovered {
            return None;
        }
        let change = HoverChange {
            from: self.hovered,
            to: hit,
        };
        self.hovered = hit;
        Some(change)
    }

    /// Pointer left the window.
    pub fn reset(&mut self) -> Option<HoverChange> {
        let from = self.hovered.take()?;
        Some(HoverChange { from: Some(from), to: None })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/hover.rs"]
mod tests;
