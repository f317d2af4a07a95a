use std::process::ExitCode;

use formrelay_config::Config;
use formrelay_core_submission_contracts::SubmissionService;
use formrelay_models::contact::{ContactForm, FormField};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::environment;

pub async fn invoke(config: Config) -> anyhow::Result<ExitCode> {
    let service = environment::submission_service(&config)?;

    let submitted = run(&service, BufReader::new(io::stdin()), io::stdout()).await?;

    Ok(if submitted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn label(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Your Name",
        FormField::Email => "Your Email",
        FormField::Message => "Message",
    }
}

/// Prompt for the form fields and submit them until a submission succeeds.
///
/// Inputs are kept after a failed attempt and offered as defaults for the
/// next one. Returns `false` if the input ends before a submission succeeded.
pub async fn run<S, R, W>(service: &S, input: R, mut output: W) -> anyhow::Result<bool>
where
    S: SubmissionService,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut form = ContactForm::new();
    let mut status = service.subscribe();

    loop {
        for field in FormField::ALL {
            let current = form.get(field);
            let prompt = match current {
                "" => format!("{}: ", label(field)),
                current => format!("{} [{current}]: ", label(field)),
            };
            output.write_all(prompt.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                return Ok(false);
            };
            if !line.is_empty() || current.is_empty() {
                form.set(field, line);
            }
        }

        let result = {
            let submit = service.submit(&mut form);
            tokio::pin!(submit);
            loop {
                tokio::select! {
                    result = &mut submit => break result,
                    Ok(()) = status.changed() => {
                        let current = *status.borrow_and_update();
                        if current.is_sending() {
                            let label = current.submit_label();
                            output.write_all(format!("{label}\n").as_bytes()).await?;
                            output.flush().await?;
                        }
                    }
                }
            }
        };

        if result.is_ok() {
            return Ok(true);
        }

        output
            .write_all(b"Press enter to keep a value or type a new one.\n")
            .await?;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{Mutex, PoisonError},
    };

    use formrelay_core_submission_contracts::SubmissionError;
    use formrelay_models::{contact::FormFields, submission::SubmissionStatus};
    use pretty_assertions::assert_eq;
    use tokio::sync::watch;

    use super::*;

    struct FakeSubmissionService {
        outcomes: Mutex<VecDeque<bool>>,
        submitted: Mutex<Vec<FormFields>>,
        status: watch::Sender<SubmissionStatus>,
    }

    impl FakeSubmissionService {
        fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into_iter().collect()),
                submitted: Mutex::default(),
                status: watch::Sender::new(SubmissionStatus::Idle),
            }
        }

        fn submitted(&self) -> Vec<FormFields> {
            self.submitted
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl SubmissionService for FakeSubmissionService {
        async fn submit(&self, form: &mut ContactForm) -> Result<(), SubmissionError> {
            self.submitted.lock().unwrap().push(form.fields());
            let success = self.outcomes.lock().unwrap().pop_front().unwrap_or(false);
            if success {
                form.reset();
                Ok(())
            } else {
                Err(SubmissionError::Rejected(None))
            }
        }

        fn status(&self) -> SubmissionStatus {
            *self.status.borrow()
        }

        fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
            self.status.subscribe()
        }
    }

    fn fields(name: &str, email: &str, message: &str) -> FormFields {
        FormFields {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[tokio::test]
    async fn submit_once() {
        let service = FakeSubmissionService::new([true]);
        let input = b"Jo Smith\njo@example.com\nHello, this is a test message.\n";
        let mut output = Vec::new();

        let result = run(&service, &input[..], &mut output).await.unwrap();

        assert!(result);
        assert_eq!(
            service.submitted(),
            [fields(
                "Jo Smith",
                "jo@example.com",
                "Hello, this is a test message."
            )]
        );
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Your Name: Your Email: Message: "
        );
    }

    #[tokio::test]
    async fn resubmit_keeps_previous_values() {
        let service = FakeSubmissionService::new([false, true]);
        let input = b"Jo\njo@example\nHello, this is a test message.\n\njo@example.com\n\n";
        let mut output = Vec::new();

        let result = run(&service, &input[..], &mut output).await.unwrap();

        assert!(result);
        assert_eq!(
            service.submitted(),
            [
                fields("Jo", "jo@example", "Hello, this is a test message."),
                fields("Jo", "jo@example.com", "Hello, this is a test message."),
            ]
        );
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Press enter to keep a value or type a new one.\n"));
        assert!(output.contains("Your Name [Jo]: "));
        assert!(output.contains("Your Email [jo@example]: "));
    }

    #[tokio::test]
    async fn end_of_input() {
        let service = FakeSubmissionService::new([]);
        let input = b"Jo Smith\n";
        let mut output = Vec::new();

        let result = run(&service, &input[..], &mut output).await.unwrap();

        assert!(!result);
        assert!(service.submitted().is_empty());
    }
}
