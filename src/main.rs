use bidscope::cli::{parse_args, run_cli_command, run_search, CliCommand, SearchArgs};
use bidscope::client::SearchClient;
use bidscope::config::ClientConfig;
use bidscope::error::SearchError;
use bidscope::models::SearchRequest;
use bidscope::traits::SystemClock;

use color_eyre::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log to stderr so stdout carries only progress and results.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

async fn search(args: SearchArgs) -> Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = args.base_url.clone() {
        config = config.with_base_url(url);
    }

    let request = match SearchRequest::new(args.free_text.clone(), args.effective_sources()) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let client = SearchClient::from_config(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match run_search(&client, &request, &SystemClock, &mut out).await {
        Ok(_) => Ok(()),
        Err(report) => match report.downcast_ref::<SearchError>() {
            Some(e) => {
                tracing::debug!("Search failed ({}): {}", e.error_code(), e);
                eprintln!("Error: {}", e.user_message());
                eprintln!("{}", e.category().recovery_hint());
                std::process::exit(1);
            }
            None => Err(report),
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'bidscope --help' for usage.");
            std::process::exit(2);
        }
    };

    if run_cli_command(&command) {
        return Ok(());
    }

    match command {
        CliCommand::Search(args) => search(args).await,
        CliCommand::Version | CliCommand::Help => Ok(()),
    }
}
