//! Demo page: a toolbar of menu buttons drawn with ratatui.
//!
//! Terminal cells are the document's length unit, so the geometry set here
//! is what the widgets use to place their menus.

use super::crossterm::HostInput;
use super::hover::HoverTracker;
use crate::core::config::MenuConfig;
use crate::core::error::MenuError;
use crate::dom::{DomEvent, Document, ElementId, EventType, Geometry, Pos, Rect, Style};
use crate::runtime::{Page, WidgetId};
use ratatui::layout::Rect as Area;
use ratatui::style::{Color, Modifier, Style as CellStyle};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

/// Body attribute holding the label of the last activated item.
pub const ACTIVATED_ATTRIBUTE: &str = "data-activated";
const QUIT_LABEL: &str = "Quit";
const SEPARATOR: &str = "-";
const TOOLBAR_ORIGIN: Pos = Pos::new(2, 1);
const TRIGGER_GAP: i32 = 2;

struct MenuMarkup {
    label: &'static str,
    id: &'static str,
    href: Option<&'static str>,
    entries: &'static [&'static str],
}

const MENUS: &[MenuMarkup] = &[
    MenuMarkup {
        label: "File",
        id: "file-menu",
        href: None,
        entries: &["New", "Open", SEPARATOR, QUIT_LABEL],
    },
    MenuMarkup {
        label: "Edit",
        id: "edit-menu",
        href: Some("#edit"),
        entries: &["Undo", "Redo", SEPARATOR, "Copy", "Paste"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
struct MenuView {
    widget: WidgetId,
    trigger: ElementId,
    container: ElementId,
    /// Items and separators, one row each.
    entries: Vec<ElementId>,
}

pub struct DemoView {
    page: Page,
    menus: Vec<MenuView>,
    help: ElementId,
    hover: HoverTracker,
}

fn padded(label: &str) -> String {
    format!(" {label} ")
}

fn cell_width(text: &str) -> i32 {
    i32::try_from(text.width()).unwrap_or(i32::MAX)
}

/// Builds the toolbar markup. Returns the document and the help button.
fn build_document() -> Result<(Document, ElementId), MenuError> {
    let mut doc = Document::new();
    let body = doc.body();
    let dom = |_| MenuError::NotAnElement;

    let toolbar = doc.create_element("div");
    doc.append_child(body, toolbar).map_err(dom)?;
    doc.set_geometry(
        toolbar,
        Geometry::at(TOOLBAR_ORIGIN.x, TOOLBAR_ORIGIN.y, 0, 1),
    );

    let mut x = 0;
    for markup in MENUS {
        let trigger = match markup.href {
            Some(href) => {
                let a = doc.create_element("a");
                doc.set_attribute(a, "href", href).map_err(dom)?;
                a
            }
            None => doc.create_element("button"),
        };
        let label = padded(markup.label);
        doc.set_text(trigger, &label).map_err(dom)?;
        doc.set_attribute(trigger, "aria-controls", markup.id)
            .map_err(dom)?;
        doc.append_child(toolbar, trigger).map_err(dom)?;
        doc.set_geometry(trigger, Geometry::at(x, 0, cell_width(&label), 1));
        doc.set_offset_parent(trigger, Some(toolbar));
        x += cell_width(&label) + TRIGGER_GAP;

        let container = doc.create_element("ul");
        doc.set_attribute(container, "id", markup.id).map_err(dom)?;
        *doc.style_mut(container).ok_or(MenuError::NotAnElement)? = Style::hidden();
        doc.append_child(body, container).map_err(dom)?;

        let width = markup
            .entries
            .iter()
            .map(|e| cell_width(&padded(e)))
            .max()
            .unwrap_or(0);
        let rows = i32::try_from(markup.entries.len()).unwrap_or(i32::MAX);
        doc.set_geometry(container, Geometry::at(0, 0, width, rows));

        for entry in markup.entries {
            let li = doc.create_element("li");
            if *entry == SEPARATOR {
                doc.set_attribute(li, "role", "separator").map_err(dom)?;
            } else {
                doc.set_attribute(li, "role", "menuitem").map_err(dom)?;
                doc.set_text(li, entry).map_err(dom)?;
            }
            doc.append_child(container, li).map_err(dom)?;
        }
    }

    let help = doc.create_element("button");
    let label = padded("Help");
    doc.set_text(help, &label).map_err(dom)?;
    doc.append_child(toolbar, help).map_err(dom)?;
    doc.set_geometry(help, Geometry::at(x, 0, cell_width(&label), 1));
    doc.set_offset_parent(help, Some(toolbar));

    Ok((doc, help))
}

impl DemoView {
    pub fn new(config: MenuConfig) -> Result<Self, MenuError> {
        let (doc, help) = build_document()?;
        let mut page = Page::new(doc, config);
        let widgets = page.attach_all()?;

        let mut menus = Vec::with_capacity(widgets.len());
        for widget in widgets {
            let Some(button) = page.widget(widget) else {
                continue;
            };
            let Some(menu) = button.menu() else {
                continue;
            };
            let trigger = button.trigger();
            let container = menu.container();
            let items = menu.items().to_vec();
            let entries = page.document().children(container).to_vec();

            // Runs after the menu's own click handling.
            for item in items {
                page.add_host_listener(item, EventType::Click, Box::new(record_activation))
                    .map_err(|_| MenuError::NotAnElement)?;
            }

            menus.push(MenuView {
                widget,
                trigger,
                container,
                entries,
            });
        }

        Ok(Self {
            page,
            menus,
            help,
            hover: HoverTracker::new(),
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hover.hovered()
    }

    pub fn triggers(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.menus.iter().map(|m| m.trigger)
    }

    pub fn help_button(&self) -> ElementId {
        self.help
    }

    pub fn activated(&self) -> Option<&str> {
        let doc = self.page.document();
        doc.attribute(doc.body(), ACTIVATED_ATTRIBUTE)
    }

    fn is_open(&self, menu: &MenuView) -> bool {
        self.page
            .widget(menu.widget)
            .is_some_and(|b| b.is_open(self.page.document()))
    }

    fn box_of(&self, id: ElementId) -> Rect {
        let doc = self.page.document();
        let pos = doc.offset_position(id);
        let (w, h) = doc.geometry(id).map_or((0, 0), |g| (g.width, g.height));
        Rect::new(pos.x, pos.y, w, h)
    }

    /// Where an open menu's container sits, from its inline style.
    fn menu_box(&self, menu: &MenuView) -> Option<Rect> {
        if !self.is_open(menu) {
            return None;
        }
        let doc = self.page.document();
        let style = doc.style(menu.container)?;
        let geometry = doc.geometry(menu.container)?;
        Some(Rect::new(
            style.left.unwrap_or(0),
            style.top.unwrap_or(0),
            geometry.width,
            geometry.height,
        ))
    }

    /// Topmost element under `pos`: open menus first, then the toolbar.
    pub fn hit_test(&self, pos: Pos) -> Option<ElementId> {
        for menu in &self.menus {
            let Some(rect) = self.menu_box(menu) else {
                continue;
            };
            if rect.contains(pos) {
                let row = usize::try_from(pos.y - rect.y).ok()?;
                return menu.entries.get(row).copied().or(Some(menu.container));
            }
        }

        self.menus
            .iter()
            .map(|m| m.trigger)
            .chain(std::iter::once(self.help))
            .find(|id| self.box_of(*id).contains(pos))
    }

    pub fn handle_input(&mut self, input: HostInput, now: Instant) -> Flow {
        match input {
            HostInput::Interrupt => return Flow::Quit,
            HostInput::Key { code, shift } => {
                self.page.press_key(code, shift, now);
            }
            HostInput::PointerMoved(pos) => self.move_pointer(pos, now),
            HostInput::PointerDown(pos) => {
                self.move_pointer(pos, now);
                match self.hit_test(pos) {
                    Some(target) => {
                        self.page.click(target, now);
                    }
                    None => self.page.blur(now),
                }
            }
            HostInput::FocusLost => {
                if let Some(change) = self.hover.reset() {
                    self.page.pointer_moved(change.from, change.to, now);
                }
                self.page.blur(now);
            }
            HostInput::Resize(..) | HostInput::Ignored => {}
        }

        if self.activated() == Some(QUIT_LABEL) {
            tracing::info!("quit activated");
            return Flow::Quit;
        }
        Flow::Continue
    }

    fn move_pointer(&mut self, pos: Pos, now: Instant) {
        let hit = self.hit_test(pos);
        if let Some(change) = self.hover.update(hit) {
            self.page.pointer_moved(change.from, change.to, now);
        }
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.page.tick(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.page.next_deadline()
    }

    fn cell_style(&self, id: ElementId) -> CellStyle {
        let mut style = CellStyle::default();
        if self.page.document().active_element() == Some(id) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if self.hover.hovered() == Some(id) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let doc = self.page.document();

        let title = Line::from(Span::styled(
            "zmenu",
            CellStyle::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(title), Area::new(area.x, area.y, area.width, 1));

        for id in self.triggers().chain(std::iter::once(self.help)) {
            let Some(cell) = clip(self.box_of(id), area) else {
                continue;
            };
            let mut style = self.cell_style(id);
            if self.menus.iter().any(|m| m.trigger == id && self.is_open(m)) {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            let label = doc.text(id).unwrap_or_default();
            frame.render_widget(Paragraph::new(Span::styled(label, style)), cell);
        }

        for menu in &self.menus {
            let Some(rect) = self.menu_box(menu) else {
                continue;
            };
            let Some(cell) = clip(rect, area) else {
                continue;
            };
            let width = usize::try_from(rect.w).unwrap_or(0);
            let lines: Vec<Line> = menu
                .entries
                .iter()
                .map(|entry| match doc.text(*entry).filter(|t| !t.is_empty()) {
                    Some(text) => {
                        let label = format!("{:<width$}", padded(text));
                        Line::from(Span::styled(label, self.cell_style(*entry)))
                    }
                    None => Line::from(Span::styled(
                        "─".repeat(width),
                        CellStyle::default().fg(Color::DarkGray),
                    )),
                })
                .collect();

            frame.render_widget(Clear, cell);
            frame.render_widget(
                Paragraph::new(lines).style(CellStyle::default().bg(Color::Black)),
                cell,
            );
        }

        if area.height > 0 {
            let status = match self.activated() {
                Some(label) => format!("activated: {label}"),
                None => "Tab/arrows move, Enter/Space activate, Esc closes, Ctrl-C quits"
                    .to_string(),
            };
            let bar = Area::new(area.x, area.bottom() - 1, area.width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(status, CellStyle::default().fg(Color::DarkGray))),
                bar,
            );
        }
    }
}

fn record_activation(doc: &mut Document, event: &mut DomEvent) {
    let label = doc
        .text(event.current_target)
        .unwrap_or_default()
        .to_string();
    tracing::info!(item = %label, trusted = event.is_trusted, "menu item activated");
    let body = doc.body();
    if let Err(err) = doc.set_attribute(body, ACTIVATED_ATTRIBUTE, &label) {
        tracing::warn!(error = %err, "cannot record activation");
    }
}

fn clip(rect: Rect, bounds: Area) -> Option<Area> {
    let x = u16::try_from(rect.x).ok()?;
    let y = u16::try_from(rect.y).ok()?;
    let w = u16::try_from(rect.w).ok()?;
    let h = u16::try_from(rect.h).ok()?;
    let area = Area::new(x, y, w, h).intersection(bounds);
    (!area.is_empty()).then_some(area)
}

#[cfg(test)]
#[path = "../../tests/unit/tui/view.rs"]
mod tests;
