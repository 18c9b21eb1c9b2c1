use super::*;
use crate::dom::{Geometry, Style};
use std::time::Duration;

struct Fixture {
    doc: Document,
    trigger: ElementId,
    items: Vec<ElementId>,
}

fn fixture(trigger_tag: &str, items: usize) -> Fixture {
    let mut doc = Document::new();
    let trigger = doc.create_element(trigger_tag);
    doc.append_child(doc.body(), trigger).unwrap();
    doc.set_attribute(trigger, "aria-controls", "menu").unwrap();
    doc.set_geometry(trigger, Geometry::at(5, 7, 60, 20));

    let container = doc.create_element("ul");
    doc.set_attribute(container, "id", "menu").unwrap();
    doc.append_child(doc.body(), container).unwrap();
    *doc.style_mut(container).unwrap() = Style::hidden();

    let items = (0..items)
        .map(|_| {
            let li = doc.create_element("li");
            doc.set_attribute(li, "role", "menuitem").unwrap();
            doc.append_child(container, li).unwrap();
            li
        })
        .collect();

    Fixture {
        doc,
        trigger,
        items,
    }
}

fn attach(f: &mut Fixture) -> MenuButton {
    let mut button = MenuButton::new(&f.doc, f.trigger).unwrap();
    button
        .init(&mut f.doc, ListenerId(7), &MenuConfig::default())
        .unwrap();
    button
}

fn drain(f: &mut Fixture, button: &mut MenuButton) {
    while let Some(mut event) = f.doc.take_pending() {
        button.handle_event(&mut f.doc, &mut event);
    }
}

fn press(f: &mut Fixture, button: &mut MenuButton, key: KeyCode) -> DomEvent {
    let mut event = DomEvent::keydown(f.trigger, key, f.doc.clock());
    button.handle_event(&mut f.doc, &mut event);
    drain(f, button);
    event
}

#[test]
fn init_registers_listeners_on_trigger() {
    let mut f = fixture("button", 2);
    let _button = attach(&mut f);

    for kind in [
        EventType::Keydown,
        EventType::Click,
        EventType::Focus,
        EventType::Blur,
        EventType::Mouseover,
        EventType::Mouseout,
    ] {
        assert_eq!(f.doc.listeners(f.trigger, kind), vec![ListenerId(7)]);
    }
    assert_eq!(f.doc.tab_index(f.trigger), 0, "trigger stays tabbable");
}

#[test]
fn missing_linking_attribute_fails() {
    let mut f = fixture("button", 1);
    f.doc.remove_attribute(f.trigger, "aria-controls");
    let mut button = MenuButton::new(&f.doc, f.trigger).unwrap();
    assert_eq!(
        button.init(&mut f.doc, ListenerId(0), &MenuConfig::default()),
        Err(MenuError::MissingControls)
    );

    f.doc.set_attribute(f.trigger, "aria-controls", "  ").unwrap();
    assert_eq!(
        button.init(&mut f.doc, ListenerId(0), &MenuConfig::default()),
        Err(MenuError::MissingControls)
    );
}

#[test]
fn unresolved_linking_attribute_fails() {
    let mut f = fixture("button", 1);
    f.doc.set_attribute(f.trigger, "aria-controls", "nope").unwrap();
    let mut button = MenuButton::new(&f.doc, f.trigger).unwrap();
    assert_eq!(
        button.init(&mut f.doc, ListenerId(0), &MenuConfig::default()),
        Err(MenuError::ControlsNotFound("nope".to_string()))
    );
    assert!(button.menu().is_none());
}

#[test]
fn empty_linked_menu_fails() {
    let mut f = fixture("button", 0);
    let mut button = MenuButton::new(&f.doc, f.trigger).unwrap();
    assert_eq!(
        button.init(&mut f.doc, ListenerId(0), &MenuConfig::default()),
        Err(MenuError::NoMenuItems)
    );
}

#[test]
fn invalid_trigger_and_double_init_fail() {
    let mut f = fixture("button", 1);
    assert_eq!(
        MenuButton::new(&f.doc, ElementId::default()).unwrap_err(),
        MenuError::NotAnElement
    );

    let mut button = attach(&mut f);
    assert_eq!(
        button.init(&mut f.doc, ListenerId(8), &MenuConfig::default()),
        Err(MenuError::AlreadyInitialized)
    );
}

#[test]
fn open_keys_focus_first_item() {
    for key in [KeyCode::SPACE, KeyCode::RETURN, KeyCode::DOWN] {
        let mut f = fixture("button", 3);
        let mut button = attach(&mut f);

        let event = press(&mut f, &mut button, key);
        assert!(button.is_open(&f.doc));
        assert_eq!(f.doc.active_element(), Some(f.items[0]));
        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
    }
}

#[test]
fn up_focuses_last_item() {
    let mut f = fixture("button", 3);
    let mut button = attach(&mut f);

    press(&mut f, &mut button, KeyCode::UP);
    assert!(button.is_open(&f.doc));
    assert_eq!(f.doc.active_element(), Some(f.items[2]));
}

#[test]
fn tab_on_trigger_closes_without_suppressing_default() {
    let mut f = fixture("button", 2);
    let mut button = attach(&mut f);
    button.move_focus_to_first_item(&mut f.doc);
    f.doc.focus(f.trigger);
    drain(&mut f, &mut button);
    assert!(button.is_open(&f.doc));

    let event = press(&mut f, &mut button, KeyCode::TAB);
    assert!(!button.is_open(&f.doc));
    assert!(!event.default_prevented());
    assert_eq!(f.doc.active_element(), Some(f.trigger));
}

#[test]
fn other_keys_do_nothing() {
    let mut f = fixture("button", 2);
    let mut button = attach(&mut f);

    let event = press(&mut f, &mut button, KeyCode::ESC);
    assert!(!button.is_open(&f.doc));
    assert!(!event.default_prevented());
}

#[test]
fn click_always_opens() {
    let mut f = fixture("button", 2);
    let mut button = attach(&mut f);

    for _ in 0..2 {
        let mut click = DomEvent::new(EventType::Click, f.trigger, f.doc.clock());
        button.handle_event(&mut f.doc, &mut click);
        drain(&mut f, &mut button);
        assert!(button.is_open(&f.doc));
        assert!(!click.default_prevented());
    }
}

#[test]
fn link_trigger_suppresses_navigation_on_click() {
    let mut f = fixture("a", 2);
    f.doc.set_attribute(f.trigger, "href", "/menu").unwrap();
    let mut button = attach(&mut f);
    assert!(button.is_link());

    let mut click = DomEvent::new(EventType::Click, f.trigger, f.doc.clock());
    button.handle_event(&mut f.doc, &mut click);
    assert!(click.default_prevented());

    let g = fixture("a", 1);
    assert!(!MenuButton::new(&g.doc, g.trigger).unwrap().is_link());

    let mut blank = fixture("a", 1);
    blank.doc.set_attribute(blank.trigger, "href", "  ").unwrap();
    assert!(!MenuButton::new(&blank.doc, blank.trigger).unwrap().is_link());
    assert!(!blank.doc.is_focusable(blank.trigger));
}

#[test]
fn focus_and_blur_only_track_state() {
    let mut f = fixture("button", 2);
    let mut button = attach(&mut f);

    let mut focus = DomEvent::new(EventType::Focus, f.trigger, f.doc.clock());
    button.handle_event(&mut f.doc, &mut focus);
    assert!(button.has_focus());
    assert!(!button.is_open(&f.doc));

    let mut blur = DomEvent::new(EventType::Blur, f.trigger, f.doc.clock());
    button.handle_event(&mut f.doc, &mut blur);
    assert!(!button.has_focus());
    assert_eq!(button.next_deadline(), None);
}

#[test]
fn hover_opens_and_mouseout_schedules_close() {
    let mut f = fixture("button", 2);
    let mut button = attach(&mut f);
    let t0 = f.doc.clock();

    let mut over = DomEvent::new(EventType::Mouseover, f.trigger, t0);
    button.handle_event(&mut f.doc, &mut over);
    assert!(button.has_hover());
    assert!(button.is_open(&f.doc));

    let style = f.doc.style(button.menu().unwrap().container()).unwrap();
    assert_eq!((style.left, style.top), (Some(5), Some(27)));

    let mut out = DomEvent::new(EventType::Mouseout, f.trigger, t0);
    button.handle_event(&mut f.doc, &mut out);
    assert!(!button.has_hover());
    assert_eq!(button.next_deadline(), Some(t0 + Duration::from_millis(300)));

    assert!(!button.poll_timers(&mut f.doc, t0 + Duration::from_millis(100)));
    assert!(button.poll_timers(&mut f.doc, t0 + Duration::from_millis(300)));
    assert!(!button.is_open(&f.doc));
}

#[test]
fn close_menu_delegates_the_decision() {
    let mut f = fixture("button", 2);
    let mut button = attach(&mut f);
    let mut over = DomEvent::new(EventType::Mouseover, f.trigger, f.doc.clock());
    button.handle_event(&mut f.doc, &mut over);

    assert!(!button.close_menu(&mut f.doc, false));
    assert!(button.is_open(&f.doc));
    assert!(button.close_menu(&mut f.doc, true));
    assert!(!button.is_open(&f.doc));
}
