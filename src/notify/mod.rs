//! # Notifications
//!
//! Team members are told about project changes through a
//! [`NotificationPort`]. The project holds at most one port and calls it once
//! per member for every event; what "sending" means is up to the port.
//!
//! ## Built-in Ports
//!
//! | Port | Delivery |
//! |------|----------|
//! | [`ConsoleNotifier`] | Prints a line simulating an email, SMS or push message |
//! | [`MemoryNotifier`] | Records deliveries in a shared in-memory log |

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Capability to deliver a message to one recipient
pub trait NotificationPort {
    /// Delivers `message` to `recipient`; failures are the port's concern
    fn send(&self, recipient: &str, message: &str);
}

/// Transport simulated by [`ConsoleNotifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    Email,
    Sms,
    Push,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Push => "push",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prints each delivery to stdout
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier {
    channel: Channel,
}

impl ConsoleNotifier {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    /// The line printed for a delivery
    pub fn format_line(&self, recipient: &str, message: &str) -> String {
        format!(
            "Notification sent to {} by {}: {}",
            recipient, self.channel, message
        )
    }
}

impl NotificationPort for ConsoleNotifier {
    fn send(&self, recipient: &str, message: &str) {
        tracing::debug!(recipient, channel = %self.channel, "Delivering notification");
        println!("{}", self.format_line(recipient, message));
    }
}

/// A delivered notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub recipient: String,
    pub message: String,
}

/// Records deliveries instead of sending them
///
/// Clones share the same log, so a clone can be handed to a project while
/// another handle is kept to inspect what was sent.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    log: Rc<RefCell<Vec<Delivery>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every delivery so far
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.log.borrow().clone()
    }

    /// Removes and returns every delivery so far
    pub fn drain(&self) -> Vec<Delivery> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl NotificationPort for MemoryNotifier {
    fn send(&self, recipient: &str, message: &str) {
        self.log.borrow_mut().push(Delivery {
            recipient: recipient.to_string(),
            message: message.to_string(),
        });
    }
}
