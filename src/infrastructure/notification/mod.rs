//! Notification infrastructure module
//!
//! Toasts are always printed on the terminal; desktop notifications via
//! notify-rust are opt-in.

mod notify_rust;
mod terminal;

pub use notify_rust::{NotifyRustNotifier, APP_NAME};
pub use terminal::TerminalNotifier;

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Shows each toast on the terminal and as a desktop notification
pub struct DesktopNotifier {
    terminal: TerminalNotifier,
    desktop: NotifyRustNotifier,
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        self.terminal.notify(title, message, icon).await?;
        self.desktop.notify(title, message, icon).await
    }
}

/// Create the notifier for the session
pub fn create_notifier(desktop: bool) -> Box<dyn Notifier> {
    if desktop {
        Box::new(DesktopNotifier {
            terminal: TerminalNotifier::new(),
            desktop: NotifyRustNotifier::new(),
        })
    } else {
        Box::new(TerminalNotifier::new())
    }
}
