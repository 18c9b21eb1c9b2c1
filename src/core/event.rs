/// Virtual key code carried by keydown events.
///
/// Values follow the legacy `keyCode` table that assistive technology and
/// older hosts still emit. Unknown codes are representable and simply ignored
/// by the widgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const TAB: Self = Self(9);
    pub const RETURN: Self = Self(13);
    pub const ESC: Self = Self(27);
    pub const SPACE: Self = Self(32);
    pub const PAGEUP: Self = Self(33);
    pub const PAGEDOWN: Self = Self(34);
    pub const END: Self = Self(35);
    pub const HOME: Self = Self(36);
    pub const LEFT: Self = Self(37);
    pub const UP: Self = Self(38);
    pub const RIGHT: Self = Self(39);
    pub const DOWN: Self = Self(40);

    pub const fn raw(v: u32) -> Self {
        Self(v)
    }

    /// Letters and digits map to their upper-case ASCII value.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(Self::SPACE),
            c if c.is_ascii_alphanumeric() => Some(Self(c.to_ascii_uppercase() as u32)),
            _ => None,
        }
    }

    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::TAB => "Tab",
            Self::RETURN => "Return",
            Self::ESC => "Esc",
            Self::SPACE => "Space",
            Self::PAGEUP => "PageUp",
            Self::PAGEDOWN => "PageDown",
            Self::END => "End",
            Self::HOME => "Home",
            Self::LEFT => "Left",
            Self::UP => "Up",
            Self::RIGHT => "Right",
            Self::DOWN => "Down",
            _ => return None,
        };
        Some(name)
    }
}
