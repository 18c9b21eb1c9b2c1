//! Minimal host document.
//!
//! The widgets only need a narrow slice of a browser document: an element tree
//! with attributes and id lookup, tab indices, inline style, offset geometry,
//! a focused element, and listener registration. Events produced by the
//! document itself (focus changes, simulated clicks) are queued and delivered
//! by the runtime after the running handler returns.

mod event;
pub mod geom;
pub mod style;

pub use event::{DomEvent, EventType, ListenerId};
pub use geom::{Geometry, Pos, Rect};
pub use style::{Display, Position, Style};

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

new_key_type! { pub struct ElementId; }

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    InvalidElement,
    /// The insertion would make an element its own ancestor.
    HierarchyRequest,
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::InvalidElement => write!(f, "invalid element id"),
            DomError::HierarchyRequest => {
                write!(f, "cannot insert an element into its own subtree")
            }
        }
    }
}

impl std::error::Error for DomError {}

#[derive(Debug, Clone)]
struct Element {
    tag: CompactString,
    text: CompactString,
    attrs: FxHashMap<CompactString, CompactString>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    tab_index: Option<i32>,
    style: Style,
    geometry: Geometry,
    offset_parent: Option<ElementId>,
    listeners: Vec<(EventType, ListenerId)>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: CompactString::from(tag.to_ascii_lowercase()),
            text: CompactString::default(),
            attrs: FxHashMap::default(),
            parent: None,
            children: Vec::new(),
            tab_index: None,
            style: Style::default(),
            geometry: Geometry::default(),
            offset_parent: None,
            listeners: Vec::new(),
        }
    }
}

pub struct Document {
    arena: SlotMap<ElementId, Element>,
    body: ElementId,
    ids: FxHashMap<CompactString, ElementId>,
    active: Option<ElementId>,
    pending: VecDeque<DomEvent>,
    clock: Instant,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let body = arena.insert(Element::new("body"));
        Self {
            arena,
            body,
            ids: FxHashMap::default(),
            active: None,
            pending: VecDeque::new(),
            clock: Instant::now(),
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Time stamp given to events the document synthesizes.
    pub fn clock(&self) -> Instant {
        self.clock
    }

    pub fn set_clock(&mut self, now: Instant) {
        self.clock = now;
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.arena.insert(Element::new(tag))
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(DomError::InvalidElement);
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        self.detach(child);
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    fn detach(&mut self, child: ElementId) {
        let Some(parent) = self.arena.get(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = None;
        }
    }

    fn is_ancestor(&self, ancestor: ElementId, of: ElementId) -> bool {
        let mut cur = self.parent(of);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.arena.get(id).map(|n| n.tag.as_str())
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.arena.get(id).map(|n| n.text.as_str())
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) -> Result<(), DomError> {
        let node = self.arena.get_mut(id).ok_or(DomError::InvalidElement)?;
        node.text = CompactString::from(text);
        Ok(())
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> Result<(), DomError> {
        let node = self.arena.get_mut(id).ok_or(DomError::InvalidElement)?;
        let prev = node
            .attrs
            .insert(CompactString::from(name), CompactString::from(value));

        if name == "id" {
            if let Some(prev) = prev {
                if self.ids.get(&prev) == Some(&id) {
                    self.ids.remove(&prev);
                }
            }
            if !value.is_empty() {
                self.ids.insert(CompactString::from(value), id);
            }
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        let prev = node.attrs.remove(name);
        if let (Some(prev), "id") = (prev, name) {
            if self.ids.get(&prev) == Some(&id) {
                self.ids.remove(&prev);
            }
        }
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.arena.get(id)?.attrs.get(name).map(|v| v.as_str())
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied().filter(|el| self.contains(*el))
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.arena.get(id)?.parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.arena
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_element_child(&self, id: ElementId) -> Option<ElementId> {
        self.children(id).first().copied()
    }

    pub fn next_element_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings.get(pos + 1).copied()
    }

    pub fn previous_element_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|c| *c == id)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p).copied())
    }

    /// Elements attached under `body`, in document (pre-)order.
    pub fn elements(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![self.body];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn elements_with_attribute(&self, name: &str) -> Vec<ElementId> {
        self.elements()
            .into_iter()
            .filter(|id| self.attribute(*id, name).is_some())
            .collect()
    }

    /// An `a` with a non-blank `href` is a link: focusable and navigable.
    pub fn has_href(&self, id: ElementId) -> bool {
        self.attribute(id, "href")
            .is_some_and(|href| !href.trim().is_empty())
    }

    fn is_natively_focusable(&self, id: ElementId) -> bool {
        match self.tag(id) {
            Some("button" | "input" | "select" | "textarea") => true,
            Some("a") => self.has_href(id),
            _ => false,
        }
    }

    /// Effective tab index: the explicit value, else 0 for natively focusable
    /// controls and -1 for everything else.
    pub fn tab_index(&self, id: ElementId) -> i32 {
        match self.arena.get(id).and_then(|n| n.tab_index) {
            Some(v) => v,
            None if self.is_natively_focusable(id) => 0,
            None => -1,
        }
    }

    pub fn set_tab_index(&mut self, id: ElementId, value: i32) {
        if let Some(node) = self.arena.get_mut(id) {
            node.tab_index = Some(value);
        }
    }

    pub fn is_rendered(&self, id: ElementId) -> bool {
        let mut cur = Some(id);
        while let Some(el) = cur {
            match self.arena.get(el) {
                Some(node) if node.style.is_hidden() => return false,
                Some(node) => cur = node.parent,
                None => return false,
            }
        }
        true
    }

    pub fn is_focusable(&self, id: ElementId) -> bool {
        let Some(node) = self.arena.get(id) else {
            return false;
        };
        (node.tab_index.is_some() || self.is_natively_focusable(id)) && self.is_rendered(id)
    }

    pub fn style(&self, id: ElementId) -> Option<&Style> {
        self.arena.get(id).map(|n| &n.style)
    }

    pub fn style_mut(&mut self, id: ElementId) -> Option<&mut Style> {
        self.arena.get_mut(id).map(|n| &mut n.style)
    }

    pub fn geometry(&self, id: ElementId) -> Option<&Geometry> {
        self.arena.get(id).map(|n| &n.geometry)
    }

    pub fn set_geometry(&mut self, id: ElementId, geometry: Geometry) {
        if let Some(node) = self.arena.get_mut(id) {
            node.geometry = geometry;
        }
    }

    pub fn offset_parent(&self, id: ElementId) -> Option<ElementId> {
        self.arena.get(id)?.offset_parent
    }

    pub fn set_offset_parent(&mut self, id: ElementId, parent: Option<ElementId>) {
        if let Some(node) = self.arena.get_mut(id) {
            node.offset_parent = parent;
        }
    }

    /// Page position of `id`, walking the offset-parent chain.
    pub fn offset_position(&self, id: ElementId) -> Pos {
        let mut chain = Vec::new();
        let mut cur = Some(id);
        // Bounded by the arena size so a malformed chain cannot spin.
        while let Some(node) = cur.and_then(|c| self.arena.get(c)) {
            if chain.len() >= self.arena.len() {
                break;
            }
            chain.push(&node.geometry);
            cur = node.offset_parent;
        }
        geom::cumulative_offset(chain)
    }

    pub fn bounding_height(&self, id: ElementId) -> i32 {
        self.geometry(id).map(|g| g.height).unwrap_or(0)
    }

    pub fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    /// Moves focus to `id`, queueing `blur` on the previous element and `focus`
    /// on the new one. Returns false when `id` cannot take focus.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if !self.is_focusable(id) {
            tracing::trace!(?id, "focus ignored: element not focusable");
            return false;
        }
        if self.active == Some(id) {
            return true;
        }

        let prev = self.active.replace(id);
        if let Some(prev) = prev {
            self.pending
                .push_back(DomEvent::synthetic(EventType::Blur, prev, self.clock));
        }
        self.pending
            .push_back(DomEvent::synthetic(EventType::Focus, id, self.clock));
        true
    }

    pub fn blur(&mut self) {
        if let Some(prev) = self.active.take() {
            self.pending
                .push_back(DomEvent::synthetic(EventType::Blur, prev, self.clock));
        }
    }

    /// Queues `event` for delivery once the running handler returns.
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.pending.push_back(event);
    }

    pub fn take_pending(&mut self) -> Option<DomEvent> {
        self.pending.pop_front()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn add_event_listener(
        &mut self,
        id: ElementId,
        kind: EventType,
        listener: ListenerId,
    ) -> Result<(), DomError> {
        let node = self.arena.get_mut(id).ok_or(DomError::InvalidElement)?;
        node.listeners.push((kind, listener));
        Ok(())
    }

    pub fn listeners(&self, id: ElementId, kind: EventType) -> Vec<ListenerId> {
        self.arena
            .get(id)
            .map(|n| {
                n.listeners
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, l)| *l)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `target` followed by its ancestors, innermost first.
    pub fn propagation_path(&self, target: ElementId) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut cur = Some(target).filter(|t| self.contains(*t));
        while let Some(id) = cur {
            path.push(id);
            cur = self.parent(id);
        }
        path
    }

    fn is_tab_stop(&self, id: ElementId) -> bool {
        self.tab_index(id) >= 0 && self.is_focusable(id)
    }

    /// Next (or previous) tab stop in document order. `None` when focus would
    /// leave the document.
    pub fn next_tab_stop(&self, from: Option<ElementId>, backwards: bool) -> Option<ElementId> {
        let order = self.elements();
        let pos = from.and_then(|f| order.iter().position(|id| *id == f));

        match (pos, backwards) {
            (None, false) => order.iter().copied().find(|id| self.is_tab_stop(*id)),
            (None, true) => order.iter().rev().copied().find(|id| self.is_tab_stop(*id)),
            (Some(p), false) => order[p + 1..]
                .iter()
                .copied()
                .find(|id| self.is_tab_stop(*id)),
            (Some(p), true) => order[..p]
                .iter()
                .rev()
                .copied()
                .find(|id| self.is_tab_stop(*id)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/document.rs"]
mod tests;
