use std::num::NonZeroUsize;

use clap::Parser;
use rental::{Config, Inventory};
use tracing::instrument;

use super::terminal::{Colorize, FALLBACK_WIDTH, terminal_width};

/// Room left for the bin label and count on each line.
const LABEL_WIDTH: usize = 32;

/// Command arguments for `rooms histogram`.
#[derive(Debug, Parser, Default)]
pub struct Command {
    /// Number of equal-width bins (defaults to the configured value)
    #[arg(long)]
    bins: Option<NonZeroUsize>,
}

impl Command {
    /// Print the histogram for the configured inventory.
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let inventory = super::open_inventory(config)?;
        print_histogram(&inventory, self.bins.unwrap_or(config.histogram_bins()));
        Ok(())
    }
}

/// Draw the rent distribution as horizontal bars on stdout.
pub fn print_histogram(inventory: &Inventory, bins: NonZeroUsize) {
    let histogram = inventory.rent_histogram(bins);
    if histogram.is_empty() {
        println!("No rooms in the system.");
        return;
    }

    let width = usize::from(terminal_width().unwrap_or(FALLBACK_WIDTH));
    let bar_width = width.saturating_sub(LABEL_WIDTH).max(10);
    let max = histogram.max_count();

    println!("{}", "Rent distribution".info());
    println!("{}", "─────────────────".dim());
    for bin in histogram.bins() {
        let bar = "█".repeat(bar_length(bin.count, max, bar_width));
        println!(
            "{:>9.2} – {:>9.2} │{} {}",
            bin.lower,
            bin.upper,
            bar,
            bin.count.to_string().dim()
        );
    }
}

/// Scale `count` against `max` onto `width` columns, never hiding a
/// non-empty bin entirely.
fn bar_length(count: usize, max: usize, width: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    (count * width / max).max(1)
}
