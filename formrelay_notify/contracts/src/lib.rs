use std::fmt;

/// A sink for short leveled messages shown to the user outside the form.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotificationService: Send + Sync + 'static {
    fn notify_success(&self, text: &str);

    fn notify_error(&self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

#[cfg(feature = "mock")]
impl MockNotificationService {
    pub fn with_notify_success(mut self, text: String) -> Self {
        self.expect_notify_success()
            .once()
            .with(mockall::predicate::eq(text))
            .return_const(());
        self
    }

    pub fn with_notify_error(mut self, text: String) -> Self {
        self.expect_notify_error()
            .once()
            .with(mockall::predicate::eq(text))
            .return_const(());
        self
    }
}
