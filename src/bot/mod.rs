//! Chat command surface and notification boundary
//!
//! The chat platform itself is out of scope; this module holds the narrow
//! seams to it (inbound messages, outbound notifications) plus command
//! parsing and dispatch.

pub mod command;
pub mod console;
pub mod dispatcher;
pub mod notifier;

pub use command::{Command, CommandError};
pub use dispatcher::{Dispatcher, InboundMessage};
pub use notifier::{ChannelNotifier, Notification, Notifier};
