//! Curve inspection and authoring commands

use std::path::Path;

use anyhow::Result;
use pointeraccel_authoring::CustomCurve;
use pointeraccel_engine::EngineConstants;
use pointeraccel_fixed::Fixed;
use tracing::debug;

use crate::commands::{CurveCommands, CurveSource, ParamArgs};
use crate::error::CliError;
use crate::output;

/// Most rows `curve factor` will print.
const MAX_FACTOR_ROWS: usize = 10_000;

/// Execute curve command
pub fn execute(cmd: &CurveCommands, json: bool) -> Result<()> {
    match cmd {
        CurveCommands::Factor {
            params,
            from,
            to,
            step,
        } => {
            let rows = factor_table(params, *from, *to, *step)?;
            output::print_factor_table(&rows, json)
        }
        CurveCommands::Plot { source } => {
            let curve = source.load()?;
            output::print_points(&curve.export_points(), json)
        }
        CurveCommands::ExportLut {
            source,
            size,
            smooth,
            output: path,
        } => {
            let mut curve = source.load()?;
            if *smooth {
                curve.smooth();
            }
            let table = curve.export_lut(*size).map_err(CliError::from)?;
            let text = table.to_text();
            match path {
                Some(path) => {
                    write_text(path, &format!("LutData={text}\n"))?;
                    output::print_written(path, table.len(), json)
                }
                None => output::print_lut(&table, json),
            }
        }
        CurveCommands::Edit {
            source,
            add,
            remove,
            lock,
            polar,
            smooth,
            output: path,
        } => {
            let mut curve = source.load()?;
            for point in add {
                let (x, y) = parse_point(point)?;
                let index = curve.add_anchor(x, y).map_err(CliError::from)?;
                debug!(index, x, y, "anchor added");
            }
            for index in remove {
                curve.remove_anchor(*index).map_err(CliError::from)?;
            }
            for index in lock {
                curve.set_locked(*index, true).map_err(CliError::from)?;
            }
            for index in polar {
                curve.set_polar(*index, true).map_err(CliError::from)?;
            }
            if *smooth {
                curve.smooth();
            }
            match path {
                Some(path) => {
                    write_text(path, &format!("{}\n", curve.export_text()))?;
                    output::print_written(path, curve.anchors().len(), json)
                }
                None => output::print_curve(&curve, json),
            }
        }
    }
}

impl CurveSource {
    /// Read the curve from the file or inline text, or start from the
    /// default curve.
    pub fn load(&self) -> Result<CustomCurve, CliError> {
        let text = match (&self.curve, &self.text) {
            (Some(path), _) => std::fs::read_to_string(path)?,
            (None, Some(text)) => text.clone(),
            (None, None) => return Ok(CustomCurve::default()),
        };
        Ok(text.parse::<CustomCurve>()?)
    }
}

/// `(speed, factor)` rows for the configured mode.
pub fn factor_table(
    params: &ParamArgs,
    from: f64,
    to: f64,
    step: f64,
) -> Result<Vec<(Fixed, Fixed)>, CliError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "step must be positive, got {step}"
        )));
    }
    if !(from.is_finite() && to.is_finite()) || to < from {
        return Err(CliError::InvalidArgument(format!(
            "speed range {from}..{to} is empty"
        )));
    }
    let span = ((to - from) / step).floor();
    if span >= MAX_FACTOR_ROWS as f64 {
        return Err(CliError::InvalidArgument(format!(
            "range would print more than {MAX_FACTOR_ROWS} rows"
        )));
    }

    let params = params.build()?;
    let constants = EngineConstants::build(&params);
    let mut rows = Vec::new();
    let mut speed = from;
    while speed <= to + step * 1e-9 {
        let rate = Fixed::from_f64(speed);
        rows.push((rate, constants.factor(rate)));
        speed += step;
    }
    Ok(rows)
}

fn parse_point(text: &str) -> Result<(f64, f64), CliError> {
    let invalid = || CliError::InvalidArgument(format!("expected X,Y, got '{text}'"));
    let (x, y) = text.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    Ok((x, y))
}

fn write_text(path: &Path, text: &str) -> Result<(), CliError> {
    std::fs::write(path, text)?;
    Ok(())
}
