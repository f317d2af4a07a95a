use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use formrelay::commands::{interactive, submit::SubmitCommand};
use formrelay_utils::formrelay_version;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(ExitCode::SUCCESS);
    }

    init_tracing();

    let config = formrelay_config::load().context("Failed to load config")?;

    match cli.command {
        Command::Submit(command) => command.invoke(config).await,
        Command::Interactive => interactive::invoke(config).await,
        Command::CheckConfig { verbose } => {
            verbose.then(|| println!("{config:#?}"));
            Ok(ExitCode::SUCCESS)
        }
        Command::Completion { .. } => unreachable!(),
    }
}

#[derive(Debug, Parser)]
#[command(version = formrelay_version())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the given fields and submit them to the form relay
    #[command(aliases(["s"]))]
    Submit(SubmitCommand),
    /// Prompt for the fields and submit them until the submission succeeds
    #[command(aliases(["i"]))]
    Interactive,
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

/// Logging is off unless enabled through `RUST_LOG`, so transport failures are
/// only shown to the user as a generic notification.
fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}
