#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Display {
    /// No inline value; the element renders with its natural display.
    #[default]
    Auto,
    Block,
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Static,
    Absolute,
}

/// Inline style of an element. Only the properties the widgets write are modeled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub display: Display,
    pub position: Position,
    pub top: Option<i32>,
    pub left: Option<i32>,
}

impl Style {
    pub fn hidden() -> Self {
        Self {
            display: Display::None,
            ..Self::default()
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.display == Display::None
    }
}
