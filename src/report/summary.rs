//! Model summary rendering

use crate::model::FitSummary;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Print the fitted-model summary: a fit-statistics table followed by the
/// coefficient table.
pub fn render_summary(summary: &FitSummary) {
    println!();
    println!(
        "    {} {}",
        style("▣").cyan(),
        style(format!("{} REGRESSION RESULTS", summary.model.to_uppercase()))
            .white()
            .bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    render_fit_statistics(summary);
    println!();
    render_coefficients(summary);
}

fn render_fit_statistics(summary: &FitSummary) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Statistic").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("Observations"),
        Cell::new(summary.n_observations),
    ]);
    if summary.n_dropped > 0 {
        table.add_row(vec![
            Cell::new("Dropped (missing)"),
            Cell::new(summary.n_dropped).fg(Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("Df residuals"),
        Cell::new(summary.df_resid),
    ]);
    table.add_row(vec![
        Cell::new("Log-likelihood"),
        Cell::new(format!("{:.4}", summary.log_likelihood)),
    ]);
    table.add_row(vec![Cell::new("AIC"), Cell::new(format!("{:.4}", summary.aic))]);

    if let Some(r2) = summary.r_squared {
        table.add_row(vec![Cell::new("R-squared"), Cell::new(format!("{:.6}", r2))]);
    }
    if let Some(adj) = summary.adj_r_squared {
        table.add_row(vec![
            Cell::new("Adj. R-squared"),
            Cell::new(format!("{:.6}", adj)),
        ]);
    }
    if let Some((f, p)) = summary.f_statistic {
        table.add_row(vec![
            Cell::new("F-statistic"),
            Cell::new(format!("{:.4} (p = {:.4})", f, p)),
        ]);
    }
    if let Some(dev) = summary.deviance {
        table.add_row(vec![Cell::new("Deviance"), Cell::new(format!("{:.4}", dev))]);
    }
    if let Some(null_dev) = summary.null_deviance {
        table.add_row(vec![
            Cell::new("Null deviance"),
            Cell::new(format!("{:.4}", null_dev)),
        ]);
    }
    if let Some(pseudo) = summary.pseudo_r_squared {
        table.add_row(vec![
            Cell::new("Pseudo R-squared"),
            Cell::new(format!("{:.6}", pseudo)),
        ]);
    }
    if let Some(iterations) = summary.iterations {
        table.add_row(vec![Cell::new("Iterations"), Cell::new(iterations)]);
    }

    indent_table(&table);
}

fn render_coefficients(summary: &FitSummary) {
    let alpha = 1.0 - summary.confidence_level;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Term").add_attribute(Attribute::Bold),
        Cell::new("Coef.").add_attribute(Attribute::Bold),
        Cell::new("Std.Err.").add_attribute(Attribute::Bold),
        Cell::new(summary.statistic_label).add_attribute(Attribute::Bold),
        Cell::new(format!("P>|{}|", summary.statistic_label)).add_attribute(Attribute::Bold),
        Cell::new(format!("[{:.3}", alpha / 2.0)).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.3}]", 1.0 - alpha / 2.0)).add_attribute(Attribute::Bold),
    ]);

    for coef in &summary.coefficients {
        let p_cell = Cell::new(format!("{:.4}", coef.p_value)).fg(if coef.p_value < 0.01 {
            Color::Green
        } else if coef.p_value < 0.05 {
            Color::Yellow
        } else {
            Color::White
        });

        table.add_row(vec![
            Cell::new(&coef.name),
            Cell::new(format!("{:.6}", coef.estimate)),
            Cell::new(format!("{:.6}", coef.std_error)),
            Cell::new(format!("{:.4}", coef.statistic)),
            p_cell,
            Cell::new(format!("{:.6}", coef.ci_lower)),
            Cell::new(format!("{:.6}", coef.ci_upper)),
        ]);
    }

    indent_table(&table);
}

fn indent_table(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
