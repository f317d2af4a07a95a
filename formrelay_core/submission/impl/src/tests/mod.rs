use std::sync::Arc;

use formrelay_extern_contracts::relay::MockFormRelayApiService;
use formrelay_models::{
    contact::{ContactForm, FormField, FormFields},
    submission::{AccessKey, SubmissionPayload, SubmissionStatus},
};
use formrelay_notify_contracts::MockNotificationService;
use tokio::sync::watch;

use crate::{SubmissionFeatureConfig, SubmissionServiceImpl};


type Sut = SubmissionServiceImpl<MockFormRelayApiService, MockNotificationService>;

const ACCESS_KEY: &str = "test-access-key";

fn make_sut(relay: MockFormRelayApiService, notification: MockNotificationService) -> Sut {
    SubmissionServiceImpl::new(relay, notification, config())
}

fn config() -> SubmissionFeatureConfig {
    SubmissionFeatureConfig {
        access_key: Arc::new(AccessKey::new(ACCESS_KEY)),
    }
}

fn sut_with_status(
    relay: MockFormRelayApiService,
    notification: MockNotificationService,
    status: SubmissionStatus,
) -> Sut {
    SubmissionServiceImpl {
        relay,
        notification,
        config: config(),
        status: watch::Sender::new(status),
    }
}

fn valid_fields() -> FormFields {
    FormFields {
        name: "Jo Smith".into(),
        email: "jo@example.com".into(),
        message: "Hello, this is a test message.".into(),
    }
}

fn form(fields: FormFields) -> ContactForm {
    let mut form = ContactForm::new();
    for field in FormField::ALL {
        form.set(field, fields.get(field));
    }
    form
}

fn payload(fields: FormFields) -> SubmissionPayload {
    SubmissionPayload {
        fields,
        access_key: AccessKey::new(ACCESS_KEY),
    }
}
