use clap::Parser;
use exn::ResultExt;
use shelf::cli::Cli;
use shelf::error::{ErrorKind, Result};
use shelf::{App, Session, decoration};
use shelf_config::Config;
use std::process::ExitCode;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config);
    init_tracing(config.as_ref().map_or("warn", |c| c.log.level.as_str()));

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "{}", *e);
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let config = cli.apply(config);
    let store = shelf::library_store(&config.library)?;
    let renderer = shelf::renderer(&config.render)?;
    let decoration = decoration::fetch(&config.decoration).await;
    let app = App::open(store).await.with_decoration(decoration);
    let mut session = Session::new(app, renderer);

    match cli.command {
        Some(command) => {
            let text = session.run_command(command).await;
            let mut stdout = tokio::io::stdout();
            stdout.write_all(text.as_bytes()).await.or_raise(|| ErrorKind::Io)?;
            stdout.flush().await.or_raise(|| ErrorKind::Io)
        },
        None => session.interactive(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await,
    }
}

/// Logs go to stderr so that screens on stdout stay clean. `RUST_LOG` wins
/// over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
