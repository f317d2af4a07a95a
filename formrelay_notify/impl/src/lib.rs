use std::{
    io::{self, Stdout, Write},
    sync::{Mutex, PoisonError},
};

use formrelay_notify_contracts::{NotificationLevel, NotificationService};
use tracing::{debug, warn};

/// Notification sink printing one line per notification to the terminal.
pub type TerminalNotificationService = WriterNotificationService<Stdout>;

impl TerminalNotificationService {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

#[derive(Debug)]
pub struct WriterNotificationService<W> {
    writer: Mutex<W>,
}

impl<W> WriterNotificationService<W>
where
    W: Write + Send + 'static,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, level: NotificationLevel, text: &str) {
        debug!(%level, text, "notify");

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let result = writeln!(writer, "[{level}] {text}").and_then(|()| writer.flush());
        if let Err(err) = result {
            warn!("Failed to write {level} notification: {err}");
        }
    }
}

impl<W> NotificationService for WriterNotificationService<W>
where
    W: Write + Send + 'static,
{
    fn notify_success(&self, text: &str) {
        self.write(NotificationLevel::Success, text);
    }

    fn notify_error(&self, text: &str) {
        self.write(NotificationLevel::Error, text);
    }
}
