//! Host runtime: owns the document and the attached widgets, and is the only
//! place events are delivered from.

mod page;

pub use page::{HostHandler, Page, WidgetId};
