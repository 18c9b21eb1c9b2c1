use crate::core::event::KeyCode;
use crate::dom::Pos;

/// Terminal input as the demo host understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    Key { code: KeyCode, shift: bool },
    PointerMoved(Pos),
    PointerDown(Pos),
    /// The terminal window lost focus.
    FocusLost,
    Resize(u16, u16),
    Interrupt,
    Ignored,
}

pub fn into_host_input(event: crossterm::event::Event) -> HostInput {
    match event {
        crossterm::event::Event::Key(key) => into_key_input(key),
        crossterm::event::Event::Mouse(mouse) => into_pointer_input(mouse),
        crossterm::event::Event::Resize(w, h) => HostInput::Resize(w, h),
        crossterm::event::Event::FocusLost => HostInput::FocusLost,
        crossterm::event::Event::FocusGained | crossterm::event::Event::Paste(_) => {
            HostInput::Ignored
        }
    }
}

pub fn into_key_input(event: crossterm::event::KeyEvent) -> HostInput {
    use crossterm::event::{KeyEventKind, KeyModifiers};

    if event.kind == KeyEventKind::Release {
        return HostInput::Ignored;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(event.code, crossterm::event::KeyCode::Char('c' | 'C'))
    {
        return HostInput::Interrupt;
    }

    let mut shift = event.modifiers.contains(KeyModifiers::SHIFT);
    match into_key_code(event.code, &mut shift) {
        Some(code) => HostInput::Key { code, shift },
        None => HostInput::Ignored,
    }
}

fn into_key_code(code: crossterm::event::KeyCode, shift: &mut bool) -> Option<KeyCode> {
    Some(match code {
        crossterm::event::KeyCode::Char(ch) => return KeyCode::from_char(ch),
        crossterm::event::KeyCode::Enter => KeyCode::RETURN,
        crossterm::event::KeyCode::Tab => KeyCode::TAB,
        crossterm::event::KeyCode::BackTab => {
            *shift = true;
            KeyCode::TAB
        }
        crossterm::event::KeyCode::Esc => KeyCode::ESC,
        crossterm::event::KeyCode::Up => KeyCode::UP,
        crossterm::event::KeyCode::Down => KeyCode::DOWN,
        crossterm::event::KeyCode::Left => KeyCode::LEFT,
        crossterm::event::KeyCode::Right => KeyCode::RIGHT,
        crossterm::event::KeyCode::Home => KeyCode::HOME,
        crossterm::event::KeyCode::End => KeyCode::END,
        crossterm::event::KeyCode::PageUp => KeyCode::PAGEUP,
        crossterm::event::KeyCode::PageDown => KeyCode::PAGEDOWN,
        _ => return None,
    })
}

pub fn into_pointer_input(event: crossterm::event::MouseEvent) -> HostInput {
    use crossterm::event::{MouseButton, MouseEventKind};

    let pos = Pos::new(i32::from(event.column), i32::from(event.row));
    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => HostInput::PointerMoved(pos),
        MouseEventKind::Down(MouseButton::Left) => HostInput::PointerDown(pos),
        _ => HostInput::Ignored,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/crossterm.rs"]
mod tests;
