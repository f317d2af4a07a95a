use formrelay_config::Config;
use formrelay_core_submission_impl::{SubmissionFeatureConfig, SubmissionServiceImpl};
use formrelay_extern_impl::{
    http::HttpClient,
    relay::{FormRelayApiServiceConfig, FormRelayApiServiceImpl},
};
use formrelay_notify_contracts::NotificationService;
use formrelay_notify_impl::TerminalNotificationService;
use tracing::debug;

pub type CliSubmissionService<Notification = TerminalNotificationService> =
    SubmissionServiceImpl<FormRelayApiServiceImpl, Notification>;

/// Build the submission service reporting to the terminal.
pub fn submission_service(config: &Config) -> anyhow::Result<CliSubmissionService> {
    submission_service_with(config, TerminalNotificationService::stdout())
}

pub fn submission_service_with<Notification>(
    config: &Config,
    notification: Notification,
) -> anyhow::Result<CliSubmissionService<Notification>>
where
    Notification: NotificationService,
{
    let relay_config = FormRelayApiServiceConfig::new(config.relay.endpoint_override.clone());
    debug!(endpoint = %relay_config.submit_endpoint(), "using form relay");

    let http = HttpClient::new(config.http.timeout.map(Into::into))?;
    let relay = FormRelayApiServiceImpl::new(relay_config, http);

    let submission_feature_config = SubmissionFeatureConfig {
        access_key: config.relay.access_key.clone().into(),
    };

    Ok(SubmissionServiceImpl::new(
        relay,
        notification,
        submission_feature_config,
    ))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use formrelay_config::DEFAULT_CONFIG_PATH;
    use formrelay_core_submission_contracts::SubmissionService as _;
    use formrelay_models::submission::SubmissionStatus;

    use super::*;

    #[test]
    fn provide_submission_service() {
        let config = formrelay_config::load_with_overrides(&[Path::new(DEFAULT_CONFIG_PATH)], &[])
            .unwrap();
        let service = submission_service(&config).unwrap();
        assert_eq!(service.status(), SubmissionStatus::Idle);
    }
}
