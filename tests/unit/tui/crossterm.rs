use super::*;
use crossterm::event::{
    KeyCode as CtKey, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

fn key(code: CtKey, modifiers: KeyModifiers) -> HostInput {
    into_key_input(KeyEvent::new(code, modifiers))
}

#[test]
fn navigation_keys_map_to_legacy_codes() {
    let cases = [
        (CtKey::Enter, KeyCode::RETURN),
        (CtKey::Esc, KeyCode::ESC),
        (CtKey::Up, KeyCode::UP),
        (CtKey::Down, KeyCode::DOWN),
        (CtKey::Home, KeyCode::HOME),
        (CtKey::PageDown, KeyCode::PAGEDOWN),
        (CtKey::Char(' '), KeyCode::SPACE),
        (CtKey::Char('q'), KeyCode::raw(81)),
    ];
    for (from, to) in cases {
        assert_eq!(
            key(from, KeyModifiers::NONE),
            HostInput::Key {
                code: to,
                shift: false
            }
        );
    }
}

#[test]
fn back_tab_is_shift_tab() {
    assert_eq!(
        key(CtKey::BackTab, KeyModifiers::SHIFT),
        HostInput::Key {
            code: KeyCode::TAB,
            shift: true
        }
    );
    assert_eq!(
        key(CtKey::BackTab, KeyModifiers::NONE),
        HostInput::Key {
            code: KeyCode::TAB,
            shift: true
        }
    );
}

#[test]
fn ctrl_c_interrupts_and_releases_are_ignored() {
    assert_eq!(key(CtKey::Char('c'), KeyModifiers::CONTROL), HostInput::Interrupt);

    let release = KeyEvent::new_with_kind(CtKey::Enter, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(into_key_input(release), HostInput::Ignored);
    assert_eq!(key(CtKey::F(5), KeyModifiers::NONE), HostInput::Ignored);
}

#[test]
fn pointer_events_carry_cell_position() {
    let moved = MouseEvent {
        kind: MouseEventKind::Moved,
        column: 4,
        row: 2,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(into_pointer_input(moved), HostInput::PointerMoved(Pos::new(4, 2)));

    let down = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        ..moved
    };
    assert_eq!(into_pointer_input(down), HostInput::PointerDown(Pos::new(4, 2)));

    let right = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Right),
        ..moved
    };
    assert_eq!(into_pointer_input(right), HostInput::Ignored);
}
