//! Terminal histogram rendering

use crate::stats::Histogram;
use console::style;

const BAR_WIDTH: usize = 40;

/// Render a histogram as a horizontal bar chart, one row per bin.
pub fn render_histogram(title: &str, hist: &Histogram) {
    println!();
    println!("    {} {}", style("▥").cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());

    let max_count = hist.counts.iter().copied().max().unwrap_or(0);

    for (i, &count) in hist.counts.iter().enumerate() {
        let bar_len = if max_count > 0 {
            (count * BAR_WIDTH).div_ceil(max_count).min(BAR_WIDTH)
        } else {
            0
        };
        let bar = "█".repeat(bar_len);
        println!(
            "      [{:>5.2}, {:>5.2}) {} {}",
            hist.edges[i],
            hist.edges[i + 1],
            style(format!("{:<width$}", bar, width = BAR_WIDTH)).cyan(),
            style(count).yellow()
        );
    }
}
