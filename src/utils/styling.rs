//! Terminal styling utilities

use console::style;
use std::path::Path;
use std::time::Duration;

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ██████╗██████╗  ██████╗ ██╗    ██╗██████╗ ███████╗████████╗ ██████╗ ██████╗ ███╗   ███╗
    ██╔════╝██╔══██╗██╔═══██╗██║    ██║██╔══██╗██╔════╝╚══██╔══╝██╔═══██╗██╔══██╗████╗ ████║
    ██║     ██████╔╝██║   ██║██║ █╗ ██║██║  ██║███████╗   ██║   ██║   ██║██████╔╝██╔████╔██║
    ██║     ██╔══██╗██║   ██║██║███╗██║██║  ██║╚════██║   ██║   ██║   ██║██╔══██╗██║╚██╔╝██║
    ╚██████╗██║  ██║╚██████╔╝╚███╔███╔╝██████╔╝███████║   ██║   ╚██████╔╝██║  ██║██║ ╚═╝ ██║
     ╚═════╝╚═╝  ╚═╝ ╚═════╝  ╚══╝╚══╝ ╚═════╝ ╚══════╝   ╚═╝    ╚═════╝ ╚═╝  ╚═╝╚═╝     ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Red-card replication: skin tone and referee decisions").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the configuration card echoing every run option
#[allow(clippy::too_many_arguments)]
pub fn print_config(
    input: &Path,
    outcome: &str,
    skin: &str,
    cov: &str,
    missing: &str,
    position: &str,
    scale: bool,
    model_label: &str,
) {
    println!("    {}", style("⚙ Configuration").cyan().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!("      Input:     {}", input.display());
    println!("      Outcome:   {}", style(outcome).yellow());
    println!("      Skin:      {}", style(skin).yellow());
    println!("      Covariates:{}", style(format!(" {}", cov)).yellow());
    println!("      Missing:   {}", style(missing).yellow());
    println!("      Position:  {}", style(position).yellow());
    println!(
        "      Scale:     {}",
        style(if scale { "on" } else { "off" }).yellow()
    );
    println!("      Model:     {}", style(model_label).yellow());
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", style("ℹ").cyan(), message);
}

/// Print elapsed time for the current step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}",
        style(format!("took {:.2?}", elapsed)).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        style("»").cyan(),
        style("Replication run complete.").green().bold()
    );
    println!();
}
