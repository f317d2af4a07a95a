use std::process::ExitCode;

use clap::Args;
use formrelay_config::Config;
use formrelay_core_submission_contracts::SubmissionService;
use formrelay_models::contact::{ContactForm, FormField};

use crate::environment;

/// Fields that are not given are submitted as empty strings.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your name
    #[arg(long)]
    name: Option<String>,
    /// Your email address
    #[arg(long)]
    email: Option<String>,
    /// The message to send
    #[arg(long)]
    message: Option<String>,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<ExitCode> {
        let service = environment::submission_service(&config)?;
        let mut form = self.into_form();

        Ok(match service.submit(&mut form).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        })
    }

    fn into_form(self) -> ContactForm {
        let mut form = ContactForm::new();
        for (field, value) in [
            (FormField::Name, self.name),
            (FormField::Email, self.email),
            (FormField::Message, self.message),
        ] {
            form.set(field, value.unwrap_or_default());
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use formrelay_models::contact::FormFields;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_arguments_are_empty() {
        let cmd = SubmitCommand {
            name: Some("Jo".into()),
            email: None,
            message: Some("Hello, world!".into()),
        };

        assert_eq!(
            cmd.into_form().fields(),
            FormFields {
                name: "Jo".into(),
                email: String::new(),
                message: "Hello, world!".into(),
            }
        );
    }
}
