use std::future::Future;

use formrelay_models::{
    contact::{ContactForm, ValidationErrors},
    submission::SubmissionStatus,
};
use thiserror::Error;
use tokio::sync::watch;

/// Drives the submission of a contact form and owns its [`SubmissionStatus`].
pub trait SubmissionService: Send + Sync + 'static {
    /// Validate the current inputs of `form` and submit them to the form
    /// relay.
    ///
    /// Every outcome is reported to the notification sink before this
    /// returns, so the error only tells the caller what happened. The inputs
    /// are cleared if and only if the submission succeeded.
    fn submit(
        &self,
        form: &mut ContactForm,
    ) -> impl Future<Output = Result<(), SubmissionError>> + Send;

    fn status(&self) -> SubmissionStatus;

    /// Watch status changes, e.g. to disable the submit control while a
    /// submission is in flight.
    fn subscribe(&self) -> watch::Receiver<SubmissionStatus>;
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("A submission is already in progress.")]
    InProgress,
    #[error("The form contains invalid fields: {0}")]
    Validation(ValidationErrors),
    #[error("The form relay rejected the submission.")]
    Rejected(Option<String>),
    #[error("Failed to submit the form to the form relay.")]
    Transport(anyhow::Error),
}
