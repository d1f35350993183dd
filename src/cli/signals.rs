//! Shutdown signal handling for the interactive session

use tokio::sync::mpsc;

/// Delivers the name of the first shutdown signal received
pub struct ShutdownSignal {
    receiver: mpsc::Receiver<&'static str>,
}

impl ShutdownSignal {
    /// Start listening for SIGINT and SIGTERM (Ctrl+C elsewhere)
    #[cfg(unix)]
    pub fn listen() -> Result<Self, std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let (tx, rx) = mpsc::channel(2);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            let _ = tx_int.send("SIGINT").await;
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            let _ = tx.send("SIGTERM").await;
        });

        Ok(Self { receiver: rx })
    }

    /// Start listening for Ctrl+C
    #[cfg(not(unix))]
    pub fn listen() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send("Ctrl+C").await;
            }
        });
        Ok(Self { receiver: rx })
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<&'static str> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn quiet_until_signalled() {
        let mut signals = ShutdownSignal::listen().unwrap();
        let result = tokio::time::timeout(Duration::from_millis(20), signals.recv()).await;
        assert!(result.is_err());
    }
}
