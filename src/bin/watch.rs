use std::time::Duration;

use clap::Parser;
use sitecheck::checker::Checker;
use sitecheck::config::read_config_file;
use tracing::{error, info, level_filters::LevelFilter, trace, warn};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file
    #[arg(short)]
    file: String,
}

fn init() {
    let filter = filter::Targets::new().with_targets(vec![
        ("sitecheck", LevelFilter::TRACE),
        ("sitewatch", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = read_config_file(&args.file)?;

    let mut checker = Checker::with_config(config.checker.unwrap_or_default());

    for site in config.sites.unwrap_or_default() {
        if let Err(e) = checker.add_url(&site.url, Duration::from_secs(site.interval)) {
            error!("{}: {e}", site.url);
        }
    }

    if checker.is_empty() {
        anyhow::bail!("no sites to watch");
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }

            Some(result) = checker.recv() => {
                match result.response() {
                    Some(response) => info!(
                        "{} -> {} ({}ms connecting, {}ms receiving)",
                        result.url,
                        response.status,
                        result.connecting.as_millis(),
                        result.receiving.as_millis(),
                    ),
                    None => warn!(
                        "{} -> {}",
                        result.url,
                        result.error().unwrap_or("unknown error"),
                    ),
                }
            }
        }
    }

    Ok(())
}
