//! Terminal toast adapter

use async_trait::async_trait;
use colored::*;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Prints toasts as coloured lines on stderr
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    /// Create a new terminal notifier
    pub fn new() -> Self {
        Self
    }

    /// Render one toast line
    pub fn format_toast(message: &str, icon: NotificationIcon) -> String {
        let symbol = match icon {
            NotificationIcon::Info => "ℹ".cyan(),
            NotificationIcon::Warning => "⚠".yellow(),
            NotificationIcon::Error => "✗".red(),
            NotificationIcon::Recording => "●".red(),
            NotificationIcon::Playing => "▶".green(),
        };
        format!("{} {}", symbol, message)
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn notify(
        &self,
        _title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        eprintln!("{}", Self::format_toast(message, icon));
        Ok(())
    }
}
