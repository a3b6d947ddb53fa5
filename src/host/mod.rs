//! Host adapter layer
//!
//! Owns everything the core deliberately does not: which document is
//! active, the loaded settings, user notifications and the event wiring
//! that keeps keyword highlighting up to date.

mod events;
mod session;

pub use events::{EventKind, Handler, HostEvent, Subscriptions};
pub use session::{ActiveDocument, Session};
