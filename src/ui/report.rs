//! Terminal presentation
//!
//! Everything here goes to stderr. Stdout is reserved for the two
//! `meanSpans..` result lines.

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;

use crate::core::{BenchmarkConfig, Report};

pub fn print_banner(config: &BenchmarkConfig) {
    let separator = "=".repeat(60);
    eprintln!("\n{}", separator);
    eprintln!("{:^60}", "Async Completion Overhead Benchmark".bold().cyan());
    eprintln!("{}\n", separator);

    let os = os_info::get();
    info!("host: {} {} ({})", os.os_type(), os.version(), os.bitness());
    eprintln!(
        "{} {} trials, delays up to {} ms",
        "▸".yellow(),
        config.trials,
        config.max_delay_ms
    );
}

/// Progress over completed measurements, drawn on stderr
pub fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} measurements {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb
}

pub fn summary_table(report: &Report) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Mechanism", "Samples", "Missing", "Mean (ms)", "SEM (ms)", "Min (ms)", "Max (ms)"]);

    for m in &report.mechanisms {
        let mut row = vec![Cell::new(m.mechanism.label())];
        match &m.summary {
            Some(s) => {
                row.push(Cell::new(s.count));
                row.push(Cell::new(m.missing));
                row.push(Cell::new(format!("{:.3}", s.mean)));
                row.push(Cell::new(format!("{:.3}", s.sem)));
                row.push(Cell::new(format!("{:.3}", s.min)));
                row.push(Cell::new(format!("{:.3}", s.max)));
            }
            None => {
                row.push(Cell::new(0));
                row.push(Cell::new(m.missing));
                row.extend((0..4).map(|_| Cell::new("-")));
            }
        }
        table.add_row(row);
    }
    table
}

pub fn print_summary_table(report: &Report) {
    eprintln!("\n{}", "Scheduling overhead".bold().yellow());
    eprintln!("{}", summary_table(report));
    if report.outcome.timed_out() {
        eprintln!(
            "{} {} measurement(s) did not finish in time",
            "⚠️".yellow(),
            report.outcome.abandoned
        );
    }
}
