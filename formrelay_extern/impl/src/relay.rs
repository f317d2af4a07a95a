use std::sync::Arc;

use anyhow::Context;
use formrelay_extern_contracts::relay::{FormRelayApiService, FormRelayResponse};
use formrelay_models::submission::SubmissionPayload;
use reqwest::{header, multipart::Form};
use serde::Deserialize;
use tracing::trace;
use url::Url;

use crate::http::HttpClient;

/// https://docs.web3forms.com/getting-started/api-reference
const SUBMIT_ENDPOINT: &str = "https://api.web3forms.com/submit";

#[derive(Debug, Clone)]
pub struct FormRelayApiServiceImpl {
    config: FormRelayApiServiceConfig,
    http: HttpClient,
}

impl FormRelayApiServiceImpl {
    pub fn new(config: FormRelayApiServiceConfig, http: HttpClient) -> Self {
        Self { config, http }
    }
}

#[derive(Debug, Clone)]
pub struct FormRelayApiServiceConfig {
    submit_endpoint: Arc<Url>,
}

impl FormRelayApiServiceConfig {
    pub fn new(submit_endpoint_override: Option<Url>) -> Self {
        Self {
            submit_endpoint: submit_endpoint_override
                .unwrap_or_else(|| SUBMIT_ENDPOINT.parse().unwrap())
                .into(),
        }
    }

    pub fn submit_endpoint(&self) -> &Url {
        &self.submit_endpoint
    }
}

impl FormRelayApiService for FormRelayApiServiceImpl {
    async fn submit(&self, payload: SubmissionPayload) -> anyhow::Result<FormRelayResponse> {
        let form = payload
            .form_entries()
            .into_iter()
            .fold(Form::new(), |form, (key, value)| {
                form.text(key, value.to_owned())
            });

        trace!(endpoint = %self.config.submit_endpoint, "send form relay submit request");
        let response = self
            .http
            .post((*self.config.submit_endpoint).clone())
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .context("Failed to send form relay submit request")?;

        // Rejections come with a 4xx status and a regular JSON body.
        let status = response.status();
        trace!(%status, "received form relay submit response");

        response
            .json::<SubmitResponse>()
            .await
            .map(Into::into)
            .with_context(|| {
                format!("Failed to deserialize form relay submit response (status {status})")
            })
    }
}

#[derive(Deserialize)]
struct SubmitResponse {
    success: bool,
    message: Option<String>,
}

impl From<SubmitResponse> for FormRelayResponse {
    fn from(value: SubmitResponse) -> Self {
        Self {
            success: value.success,
            message: value.message,
        }
    }
}
