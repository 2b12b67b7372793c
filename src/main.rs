//! FerreMarket Admin - Main Entry Point
//!
//! Back-office for the FerreMarket hardware store.

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use ferremarket_admin::app::application::Application;
use ferremarket_admin::app::cli::Cli;
use ferremarket_admin::constants::APP_NAME;
use ferremarket_admin::helpers::get_or_create_data_dir;

/// Console output on stderr plus a daily log file in the data directory.
/// The guard flushes the file writer when dropped.
fn init_tracing() -> Option<WorkerGuard> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let (file, guard) = match get_or_create_data_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir.join("logs"), format!("{APP_NAME}.log"));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new("info"));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing();

    tracing::info!(route = ?cli.command.route(), demo = cli.demo, "Starting FerreMarket Admin");

    let mut app = Application::from_cli(&cli)?;
    let result = app.run(cli.command.clone()).await;

    for notice in app.take_notices() {
        eprintln!("{notice}");
    }

    let output = result?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
