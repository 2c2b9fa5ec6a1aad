//! linklru demo - replays accesses and prints the LRU order after each one

mod replay;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use linklru::{SharedListLru, DEFAULT_CAPACITY};
use tracing::info;

use crate::replay::Replayer;

/// Accesses replayed when no values are given
const SCENARIO: [&str; 4] = ["2", "3", "4", "2"];

/// Capacity of the built-in scenario
const SCENARIO_CAPACITY: usize = 3;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of values, at least 1)
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Value the cache starts with
    #[arg(short, long, default_value = "1")]
    initial: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print hit/miss/eviction counters at the end
    #[arg(long)]
    stats: bool,

    /// Values to access, in order (defaults to the 2 3 4 2 scenario)
    values: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Args {
    /// Resolve capacity and accesses, falling back to the built-in scenario
    fn plan(&self) -> (usize, Vec<String>) {
        if self.values.is_empty() {
            let capacity = self.capacity.unwrap_or(SCENARIO_CAPACITY);
            (capacity, SCENARIO.iter().map(|v| v.to_string()).collect())
        } else {
            let capacity = self.capacity.unwrap_or(DEFAULT_CAPACITY);
            (capacity, self.values.clone())
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let (capacity, values) = args.plan();

    info!("Starting linklru demo v{}", env!("CARGO_PKG_VERSION"));
    info!("Capacity: {}", capacity);
    info!("Initial value: {}", args.initial);

    let cache = SharedListLru::try_new(args.initial.clone(), capacity)?;
    let mut replay = Replayer::new(cache);

    for value in values {
        let step = replay.access(value);
        match args.format {
            Format::Text => println!("{}", step.to_text()),
            Format::Json => println!("{}", serde_json::to_string(&step)?),
        }
    }

    if args.stats {
        let summary = replay.summary();
        match args.format {
            Format::Text => println!("{}", summary.to_text()),
            Format::Json => println!("{}", serde_json::to_string(&summary)?),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_scenario() {
        let args = Args::try_parse_from(["linklru-demo"]).unwrap();
        let (capacity, values) = args.plan();

        assert_eq!(capacity, 3);
        assert_eq!(values, vec!["2", "3", "4", "2"]);
        assert_eq!(args.initial, "1");
        assert_eq!(args.format, Format::Text);
    }

    #[test]
    fn test_args_explicit_values() {
        let args = Args::try_parse_from([
            "linklru-demo", "-c", "2", "-i", "x", "--format", "json", "--stats", "a", "b",
        ])
        .unwrap();
        let (capacity, values) = args.plan();

        assert_eq!(capacity, 2);
        assert_eq!(values, vec!["a", "b"]);
        assert_eq!(args.initial, "x");
        assert_eq!(args.format, Format::Json);
        assert!(args.stats);
    }

    #[test]
    fn test_args_values_use_default_capacity() {
        let args = Args::try_parse_from(["linklru-demo", "a"]).unwrap();
        assert_eq!(args.plan().0, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_large_capacity_replays() {
        let args = Args::try_parse_from(["linklru-demo", "-c", "100000000000000", "a"]).unwrap();
        let (capacity, values) = args.plan();
        assert_eq!(capacity, 100_000_000_000_000);

        let cache = SharedListLru::try_new(args.initial.clone(), capacity).unwrap();
        let mut replay = Replayer::new(cache);
        let lines: Vec<String> = values.into_iter().map(|v| replay.access(v).to_text()).collect();

        assert_eq!(lines, vec!["access(a) -> a -> 1"]);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let args = Args::try_parse_from(["linklru-demo", "-c", "0"]).unwrap();
        let (capacity, _) = args.plan();

        let err = SharedListLru::try_new(args.initial.clone(), capacity).unwrap_err();
        assert_eq!(err, linklru::Error::ZeroCapacity);
    }
}
