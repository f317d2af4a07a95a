use std::future::Future;

use formrelay_models::submission::SubmissionPayload;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FormRelayApiService: Send + Sync + 'static {
    /// Post the payload to the form relay and return its verdict.
    ///
    /// Fails if no response could be obtained or its body is malformed. A
    /// rejected submission is not an error.
    fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> impl Future<Output = anyhow::Result<FormRelayResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRelayResponse {
    pub success: bool,
    pub message: Option<String>,
}

#[cfg(feature = "mock")]
impl MockFormRelayApiService {
    pub fn with_submit(mut self, payload: SubmissionPayload, result: FormRelayResponse) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_submit_error(mut self, payload: SubmissionPayload, error: &'static str) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }
}
