use std::ops::Deref;

use serde::Deserialize;

use crate::{
    contact::{FormField, FormFields},
    macros::sensitive_debug,
};

/// The state of the submit control of a contact form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

impl SubmissionStatus {
    pub const SEND_LABEL: &'static str = "Send Message";
    pub const SENDING_LABEL: &'static str = "Sending...";

    pub fn is_sending(self) -> bool {
        self == Self::Sending
    }

    /// The submit control is interactive unless a submission is in flight.
    pub fn is_submit_enabled(self) -> bool {
        !self.is_sending()
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Sending => Self::SENDING_LABEL,
            Self::Idle | Self::Succeeded | Self::Failed => Self::SEND_LABEL,
        }
    }
}

/// The credential identifying this site to the form relay.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AccessKey(String);
sensitive_debug!(AccessKey);

impl AccessKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl Deref for AccessKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for AccessKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The request body sent to the form relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub fields: FormFields,
    pub access_key: AccessKey,
}

impl SubmissionPayload {
    pub const ACCESS_KEY_FIELD: &'static str = "access_key";

    /// The multipart form entries, in the order they are sent.
    pub fn form_entries(&self) -> [(&'static str, &str); 4] {
        [
            (FormField::Name.as_str(), self.fields.get(FormField::Name)),
            (FormField::Email.as_str(), self.fields.get(FormField::Email)),
            (
                FormField::Message.as_str(),
                self.fields.get(FormField::Message),
            ),
            (Self::ACCESS_KEY_FIELD, &*self.access_key),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn submit_enabled_iff_not_sending() {
        for (status, enabled, label) in [
            (SubmissionStatus::Idle, true, "Send Message"),
            (SubmissionStatus::Sending, false, "Sending..."),
            (SubmissionStatus::Succeeded, true, "Send Message"),
            (SubmissionStatus::Failed, true, "Send Message"),
        ] {
            assert_eq!(status.is_submit_enabled(), enabled);
            assert_eq!(status.submit_label(), label);
        }
    }

    #[test]
    fn access_key_debug_is_redacted() {
        let payload = SubmissionPayload {
            fields: FormFields::default(),
            access_key: AccessKey::new("super-secret"),
        };

        let debug = format!("{payload:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("AccessKey(<sensitive>)"));
    }

    #[test]
    fn form_entries() {
        let payload = SubmissionPayload {
            fields: FormFields {
                name: "Jo".into(),
                email: "jo@example.com".into(),
                message: "Hello, world!".into(),
            },
            access_key: AccessKey::new("key"),
        };

        assert_eq!(
            payload.form_entries(),
            [
                ("name", "Jo"),
                ("email", "jo@example.com"),
                ("message", "Hello, world!"),
                ("access_key", "key"),
            ]
        );
    }
}
