mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use bellwether::{run_advisory_check, AdvisoryChecker, InMemoryPage, Viewport};

use cli::Cli;

#[derive(Serialize)]
struct Report<'a> {
    active: bool,
    active_ids: &'a [String],
    banners: &'a [String],
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbosity.tracing_level_filter(), args.json);

    let checker = AdvisoryChecker::with_feed_url(&args.feed_url);
    let mut page = InMemoryPage::new(args.banners);
    let viewport = Viewport::new(args.width, args.height);

    let active_ids = run_advisory_check(&checker, &mut page, viewport).await;
    let active = !active_ids.is_empty();

    if args.json {
        let report = Report {
            active,
            active_ids: &active_ids,
            banners: page.contents(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if active {
        println!("active issues:");
        for id in &active_ids {
            println!("  {id}");
        }
        for markup in page.contents() {
            println!("{markup}");
        }
    } else {
        println!("no active issues");
    }

    Ok(())
}

/// Logging goes to stderr so stdout stays clean for the report.
/// Respects RUST_LOG, falling back to the -v/-q verbosity level.
fn init_tracing(level: LevelFilter, json: bool) {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let builder = tracing_subscriber::registry().with(filter);

    if json {
        let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
    } else {
        let _ = builder.with(fmt_layer.compact()).try_init();
    }
}
