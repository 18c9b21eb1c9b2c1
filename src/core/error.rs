use std::fmt;

/// Structural failures raised while building a widget.
///
/// Every variant is fatal: the widget is never handed back to the caller, and
/// markup that triggers one of these must be fixed rather than retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// The supplied reference is not a live element of the document.
    NotAnElement,
    /// The menu container has no child carrying the item role.
    NoMenuItems,
    /// The trigger has no (or an empty) linking attribute.
    MissingControls,
    /// The linking attribute names an id that resolves to nothing.
    ControlsNotFound(String),
    AlreadyInitialized,
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuError::NotAnElement => write!(f, "reference is not a document element"),
            MenuError::NoMenuItems => write!(f, "menu container has no menu item children"),
            MenuError::MissingControls => {
                write!(f, "menu button has no linking attribute naming its menu")
            }
            MenuError::ControlsNotFound(id) => write!(f, "menu element '{}' not found", id),
            MenuError::AlreadyInitialized => write!(f, "menu button is already initialized"),
        }
    }
}

impl std::error::Error for MenuError {}
