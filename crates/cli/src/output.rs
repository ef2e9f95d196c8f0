//! Output formatting for CLI responses

use std::path::Path;

use anyhow::{Error, Result};
use colored::*;
use pointeraccel_authoring::CustomCurve;
use pointeraccel_curves::LutTable;
use pointeraccel_engine::AccelParams;
use pointeraccel_errors::EngineFault;
use pointeraccel_fixed::Fixed;
use serde::Serialize;
use serde_json::json;

use crate::commands::simulate::SimulationReport;
use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    error
        .downcast_ref::<CliError>()
        .map_or("Internal", CliError::kind)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).map_err(CliError::from)?);
    Ok(())
}

/// Print a parameter set and the fault its mode constants would report.
pub fn print_params(params: &AccelParams, fault: Option<EngineFault>, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "success": true,
            "params": params,
            "fault": fault.map(|f| f.to_string()),
        }));
    }

    println!("{}", "Parameters:".bold());
    for (key, value) in params.to_text_pairs() {
        println!("  {:<20} {}", key.name().cyan(), value);
    }
    match fault {
        Some(fault) => println!("{} {}", "⚠".yellow(), fault.to_string().yellow()),
        None => println!("{} {}", "✓".green(), "Mode constants valid".green()),
    }
    Ok(())
}

/// Print a simulation run.
pub fn print_simulation(report: &SimulationReport, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({ "success": true, "simulation": report }));
    }

    println!(
        "{:>6} {:>10} {:>18} {:>18}",
        "line".bold(),
        "time ms".bold(),
        "input".bold(),
        "output".bold()
    );
    for row in &report.samples {
        let input = format!("{} {} {}", row.input.dx, row.input.dy, row.input.wheel);
        let output = format!("{} {} {}", row.output.dx, row.output.dy, row.output.wheel);
        let output = match &row.fault {
            Some(fault) => format!("{} ({})", output.yellow(), fault),
            None => output,
        };
        println!("{:>6} {:>10.3} {:>18} {:>18}", row.line, row.time_ms, input, output);
    }
    for rejected in &report.rejected {
        println!(
            "{} line {}: {}",
            "Rejected".red(),
            rejected.line,
            rejected.message
        );
    }
    println!(
        "\n{} {}  {} {}  {} {}  {} {}",
        "Commits:".bold(),
        report.commits,
        "Debounced:".bold(),
        report.debounced_samples,
        "Overflow:".bold(),
        report.overflow_samples,
        "Pass-through:".bold(),
        report.pass_through_samples
    );
    Ok(())
}

/// Print `(speed, factor)` rows.
pub fn print_factor_table(rows: &[(Fixed, Fixed)], json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = rows
            .iter()
            .map(|(speed, factor)| json!({ "speed": speed, "factor": factor }))
            .collect();
        return print_json(&json!({ "success": true, "factors": rows }));
    }

    println!("{:>12} {:>12}", "speed".bold(), "factor".bold());
    for (speed, factor) in rows {
        println!("{:>12} {:>12}", format!("{speed:.4}"), format!("{factor:.4}"));
    }
    Ok(())
}

/// Print a plot polyline.
pub fn print_points(points: &[(f64, f64)], json: bool) -> Result<()> {
    if json {
        let points: Vec<_> = points.iter().map(|(x, y)| json!([x, y])).collect();
        return print_json(&json!({ "success": true, "points": points }));
    }

    for (x, y) in points {
        println!("{:.4} {:.4}", x, y);
    }
    Ok(())
}

/// Print an exported lookup table as a `LutData` assignment.
pub fn print_lut(table: &LutTable, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "success": true,
            "size": table.len(),
            "lut": table.to_text(),
        }));
    }

    println!("LutData={}", table.to_text());
    Ok(())
}

/// Print curve text.
pub fn print_curve(curve: &CustomCurve, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "success": true,
            "anchors": curve.anchors().len(),
            "curve": curve.export_text(),
        }));
    }

    println!("{}", curve.export_text());
    Ok(())
}

/// Confirm a file write.
pub fn print_written(path: &Path, count: usize, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "success": true,
            "path": path.display().to_string(),
            "count": count,
        }));
    }

    println!(
        "{} Wrote {} ({} points)",
        "✓".green(),
        path.display().to_string().bold(),
        count
    );
    Ok(())
}
