use std::sync::Arc;

use formrelay_core_submission_contracts::{SubmissionError, SubmissionService};
use formrelay_extern_contracts::relay::{FormRelayApiService, FormRelayResponse};
use formrelay_models::{
    contact::ContactForm,
    submission::{AccessKey, SubmissionPayload, SubmissionStatus},
};
use formrelay_notify_contracts::NotificationService;
use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};

pub mod validate;

#[cfg(test)]
mod tests;

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

#[derive(Debug)]
pub struct SubmissionServiceImpl<Relay, Notification> {
    relay: Relay,
    notification: Notification,
    config: SubmissionFeatureConfig,
    status: watch::Sender<SubmissionStatus>,
}

#[derive(Debug, Clone)]
pub struct SubmissionFeatureConfig {
    pub access_key: Arc<AccessKey>,
}

impl<Relay, Notification> SubmissionServiceImpl<Relay, Notification> {
    pub fn new(relay: Relay, notification: Notification, config: SubmissionFeatureConfig) -> Self {
        Self {
            relay,
            notification,
            config,
            status: watch::Sender::new(SubmissionStatus::Idle),
        }
    }

    /// Atomically enter [`SubmissionStatus::Sending`] unless a submission is
    /// already in flight.
    fn begin(&self) -> Option<SendingGuard<'_>> {
        self.status
            .send_if_modified(|status| {
                if status.is_sending() {
                    return false;
                }
                *status = SubmissionStatus::Sending;
                true
            })
            .then(|| SendingGuard(&self.status))
    }
}

/// Returns the status to [`SubmissionStatus::Idle`] when dropped, even if the
/// submission future is dropped before it completes.
struct SendingGuard<'a>(&'a watch::Sender<SubmissionStatus>);

impl SendingGuard<'_> {
    fn set(&self, status: SubmissionStatus) {
        self.0.send_replace(status);
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(SubmissionStatus::Idle);
    }
}

impl<Relay, Notification> SubmissionService for SubmissionServiceImpl<Relay, Notification>
where
    Relay: FormRelayApiService,
    Notification: NotificationService,
{
    async fn submit(&self, form: &mut ContactForm) -> Result<(), SubmissionError> {
        let Some(guard) = self.begin() else {
            debug!("submission already in progress");
            return Err(SubmissionError::InProgress);
        };

        trace!("validate fields");
        let fields = match validate::parse(form.fields()) {
            Ok(fields) => fields,
            Err(errors) => {
                drop(guard);
                debug!(%errors, "form is invalid");
                for message in errors.messages() {
                    self.notification.notify_error(message);
                }
                return Err(SubmissionError::Validation(errors));
            }
        };

        let payload = SubmissionPayload {
            fields: fields.into(),
            access_key: (*self.config.access_key).clone(),
        };

        trace!("submit to form relay");
        match self.relay.submit(payload).await {
            Ok(FormRelayResponse { success: true, .. }) => {
                guard.set(SubmissionStatus::Succeeded);
                info!("form submitted");
                self.notification.notify_success(SUCCESS_MESSAGE);
                form.reset();
                Ok(())
            }
            Ok(FormRelayResponse {
                success: false,
                message,
            }) => {
                guard.set(SubmissionStatus::Failed);
                warn!(?message, "form relay rejected the submission");
                let text = message
                    .as_deref()
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or(FALLBACK_ERROR_MESSAGE);
                self.notification.notify_error(text);
                Err(SubmissionError::Rejected(message))
            }
            Err(err) => {
                guard.set(SubmissionStatus::Failed);
                error!("Failed to submit form: {err:#}");
                self.notification.notify_error(FALLBACK_ERROR_MESSAGE);
                Err(SubmissionError::Transport(err))
            }
        }
    }

    fn status(&self) -> SubmissionStatus {
        *self.status.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }
}
