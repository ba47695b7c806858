//! Crowdstorm: Red-Card Replication CLI
//!
//! Loads the player-referee dataset, applies the configured preprocessing
//! stages, and fits the selected regression model.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use crowdstorm::cli::Cli;
use crowdstorm::model::{fit_model, Design};
use crowdstorm::pipeline::{encode_position, handle_missing, load_dataset, scale, ModelFormula};
use crowdstorm::report::render_summary;
use crowdstorm::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        &cli.outcome.to_string(),
        &cli.skin.to_string(),
        &cli.cov.to_string(),
        &cli.missing.to_string(),
        &cli.position.to_string(),
        cli.scale,
        &cli.model,
    );

    // Step 1: Load dataset and derive the analysis columns
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let df = load_dataset(&cli.input)?;
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols) = df.shape();
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    print_step_time(step_start.elapsed());

    // Step 2: Encode the position column
    print_step_header(2, "Encode Position");
    let step_start = Instant::now();
    let df = encode_position(df, cli.position)?;
    print_success(&format!("Position encoded ({})", cli.position));
    print_step_time(step_start.elapsed());

    // Step 3: Missing-data handling
    print_step_header(3, "Handle Missing Values");
    let step_start = Instant::now();
    let before = df.height();
    let df = handle_missing(df, cli.missing)?;
    if df.height() < before {
        println!(
            "      Dropped {} incomplete row(s)",
            style(before - df.height()).yellow().bold()
        );
    }
    print_success(&format!("Missing values handled ({})", cli.missing));
    print_step_time(step_start.elapsed());

    // Step 4: Optional standardization
    print_step_header(4, "Scale");
    let step_start = Instant::now();
    let df = scale(df, cli.scale)?;
    if cli.scale {
        print_success("Numeric columns standardized");
    } else {
        println!("      Scaling disabled, table unchanged");
    }
    print_step_time(step_start.elapsed());

    // Step 5: Build the model formula
    print_step_header(5, "Build Formula");
    let formula = ModelFormula::build(cli.outcome, cli.skin, cli.cov);
    println!("      {}", style(formula.to_string()).white().bold());

    // Step 6: Fit and report
    print_step_header(6, "Fit Model");
    let step_start = Instant::now();
    let spinner = create_spinner("Fitting model...");
    let design = Design::from_frame(&df, &formula)?;
    let summary = fit_model(&design, cli.outcome)?;
    finish_with_success(&spinner, "Model fitted");
    print_step_time(step_start.elapsed());

    render_summary(&summary);
    print_completion();

    Ok(())
}
