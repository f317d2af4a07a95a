use std::{net::Ipv4Addr, path::Path};

use formrelay::environment::{submission_service_with, CliSubmissionService};
use formrelay_config::DEFAULT_CONFIG_PATH;
use formrelay_core_submission_contracts::{SubmissionError, SubmissionService};
use formrelay_core_submission_impl::{FALLBACK_ERROR_MESSAGE, SUCCESS_MESSAGE};
use formrelay_models::{
    contact::{ContactForm, FormFields},
    submission::SubmissionStatus,
};
use formrelay_notify_contracts::MockNotificationService;
use formrelay_utils::assert_matches;
use pretty_assertions::assert_eq;
use url::Url;

const ACCESS_KEY: &str = "test-access-key";

#[tokio::test]
async fn submitted() {
    let endpoint = formrelay_testing::relay::spawn_server(ACCESS_KEY)
        .await
        .unwrap();
    let notification = MockNotificationService::new().with_notify_success(SUCCESS_MESSAGE.into());
    let sut = make_sut(&endpoint, ACCESS_KEY, notification);
    let mut form = ContactForm::from(valid_fields());

    let result = sut.submit(&mut form).await;

    result.unwrap();
    assert!(form.is_empty());
    assert_eq!(sut.status(), SubmissionStatus::Idle);
}

#[tokio::test]
async fn rejected_by_relay() {
    let endpoint = formrelay_testing::relay::spawn_server(ACCESS_KEY)
        .await
        .unwrap();
    let notification =
        MockNotificationService::new().with_notify_error("Invalid access key".into());
    let sut = make_sut(&endpoint, "wrong-key", notification);
    let mut form = ContactForm::from(valid_fields());

    let result = sut.submit(&mut form).await;

    assert_matches!(result, Err(SubmissionError::Rejected(Some(_))));
    assert_eq!(form.fields(), valid_fields());
    assert_eq!(sut.status(), SubmissionStatus::Idle);
}

#[tokio::test]
async fn relay_unreachable() {
    let listener = std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let endpoint = formrelay_testing::relay::submit_url(listener.local_addr().unwrap()).unwrap();
    drop(listener);

    let notification =
        MockNotificationService::new().with_notify_error(FALLBACK_ERROR_MESSAGE.into());
    let sut = make_sut(&endpoint, ACCESS_KEY, notification);
    let mut form = ContactForm::from(valid_fields());

    let result = sut.submit(&mut form).await;

    assert_matches!(result, Err(SubmissionError::Transport(_)));
    assert_eq!(form.fields(), valid_fields());
    assert_eq!(sut.status(), SubmissionStatus::Idle);
}

fn valid_fields() -> FormFields {
    FormFields {
        name: "Jo Smith".into(),
        email: "jo@example.com".into(),
        message: "Hello, this is a test message.".into(),
    }
}

fn make_sut(
    endpoint: &Url,
    access_key: &str,
    notification: MockNotificationService,
) -> CliSubmissionService<MockNotificationService> {
    let config = formrelay_config::load_with_overrides(
        &[Path::new(DEFAULT_CONFIG_PATH)],
        &[&format!(
            "relay.endpoint_override = {:?}\nrelay.access_key = {access_key:?}",
            endpoint.as_str()
        )],
    )
    .unwrap();

    submission_service_with(&config, notification).unwrap()
}
