//! callgrid - Analyze call-log history between two parties across two time zones

use callgrid::{
    aggregation::{Aggregator, Totals},
    cli::{Cli, Command, parse_date_filter},
    data_loader::DataLoader,
    error::Result,
    filters::CallFilter,
    output::get_formatter,
    timezone::TimezonePair,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the record filter from the global CLI flags
fn build_filter(cli: &Cli) -> Result<CallFilter> {
    let mut filter = CallFilter::new();

    if let Some(since_str) = &cli.since {
        filter = filter.with_since(parse_date_filter(since_str)?);
    }
    if let Some(until_str) = &cli.until {
        filter = filter.with_until(parse_date_filter(until_str)?);
    }

    Ok(filter)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. Quiet by default; --verbose turns on the crate's
    // informational output and RUST_LOG still overrides everything.
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("callgrid=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let zones = TimezonePair::from_cli(cli.home_zone.as_deref(), cli.away_zone.as_deref())?;
    info!(
        "Using zones: home {} / away {}",
        zones.home_name(),
        zones.away_name()
    );

    let show_progress = !cli.json && is_terminal::is_terminal(std::io::stdout());
    let loader = DataLoader::new(cli.logs.clone()).await?;
    let aggregator = Aggregator::new(zones).with_progress(show_progress);
    let record_filter = build_filter(&cli)?;
    let formatter = get_formatter(cli.json);

    match cli.command {
        Some(Command::Heatmap) => {
            info!("Running hour-of-week heatmap report");

            let records = record_filter.filter_stream(loader.load_calls(zones));
            let grid = aggregator.aggregate_heatmap(records).await?;
            println!("{}", formatter.format_heatmap(&grid, aggregator.zones()));
        }

        Some(Command::Daily) => {
            info!("Running daily report");

            let records = record_filter.filter_stream(loader.load_calls(zones));
            let daily = aggregator.aggregate_daily(records).await?;
            let totals = Totals::from_daily(&daily);
            println!(
                "{}",
                formatter.format_daily(&daily, &totals, aggregator.zones())
            );
        }

        Some(Command::Monthly) => {
            info!("Running monthly report");

            let records = record_filter.filter_stream(loader.load_calls(zones));
            let daily = aggregator.aggregate_daily(records).await?;
            let monthly = Aggregator::aggregate_monthly(&daily);
            let totals = Totals::from_monthly(&monthly);
            println!(
                "{}",
                formatter.format_monthly(&monthly, &totals, aggregator.zones())
            );
        }

        Some(Command::Trend(args)) => {
            info!("Running trend report");

            let records = record_filter.filter_stream(loader.load_calls(zones));
            let daily = aggregator.aggregate_daily(records).await?;
            let trend = Aggregator::build_trend(&daily, args.interval, args.metric);
            println!(
                "{}",
                formatter.format_trend(&trend, args.interval, args.metric, aggregator.zones())
            );
        }

        Some(Command::Dist(args)) => {
            info!("Running duration distribution report");

            let records = record_filter.filter_stream(loader.load_calls(zones));
            let durations = aggregator.collect_durations(records).await?;
            let histogram =
                callgrid::aggregation::DurationHistogram::from_durations(&durations, args.bins);
            println!("{}", formatter.format_dist(&histogram));
        }

        Some(Command::Summary) | None => {
            info!("Running summary report");

            let records = record_filter.filter_stream(loader.load_calls(zones));
            let durations = aggregator.collect_durations(records).await?;
            let stats = callgrid::aggregation::SummaryStats::from_durations(&durations);
            println!("{}", formatter.format_summary(&stats));
        }
    }

    Ok(())
}
