//! Command implementations for accelctl

pub mod curve;
pub mod legacy;
pub mod params;
pub mod simulate;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use pointeraccel_engine::{AccelParams, split_assignment};
use tracing::debug;

use crate::error::CliError;

/// Parameter overrides shared by every command that builds an engine.
#[derive(Args, Debug, Default, Clone)]
pub struct ParamArgs {
    /// Parameter assignment (repeatable), e.g. --param Acceleration=0.2
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

impl ParamArgs {
    /// Defaults with every override applied in order.
    ///
    /// Unlike the engine's staging path, a rejected override is an error
    /// here: there is no previously committed value worth keeping.
    pub fn build(&self) -> Result<AccelParams, CliError> {
        let mut params = AccelParams::default();
        for assignment in &self.params {
            let (key, value) = split_assignment(assignment)?;
            let key = params.apply_text(key, value)?;
            debug!(%key, value, "parameter override");
        }
        Ok(params)
    }
}

/// Where a curve comes from.
#[derive(Args, Debug, Default, Clone)]
pub struct CurveSource {
    /// Curve text file (`x,y[,flags];...|c1x,c1y,c2x,c2y;...`)
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub curve: Option<PathBuf>,

    /// Curve text given inline
    #[arg(long, value_name = "CURVE")]
    pub text: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CurveCommands {
    /// Tabulate the acceleration factor over a speed range
    Factor {
        #[command(flatten)]
        params: ParamArgs,
        /// First speed (counts per millisecond)
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        /// Last speed (counts per millisecond)
        #[arg(long, default_value_t = 50.0)]
        to: f64,
        /// Speed increment
        #[arg(long, default_value_t = 1.0)]
        step: f64,
    },

    /// Print the curve's plot polyline
    Plot {
        #[command(flatten)]
        source: CurveSource,
    },

    /// Export a lookup table for the custom_curve mode
    ExportLut {
        #[command(flatten)]
        source: CurveSource,
        /// Number of table points (2-256)
        #[arg(short, long, default_value_t = 64)]
        size: usize,
        /// Smooth interior anchors before export
        #[arg(long)]
        smooth: bool,
        /// Write the LutData text to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Apply edits and print the normalized curve text
    #[command(alias = "normalize")]
    Edit {
        #[command(flatten)]
        source: CurveSource,
        /// Insert an anchor, X,Y (repeatable)
        #[arg(long, value_name = "X,Y")]
        add: Vec<String>,
        /// Remove the anchor at INDEX (repeatable, applied after --add)
        #[arg(long, value_name = "INDEX")]
        remove: Vec<usize>,
        /// Lock the anchor at INDEX (repeatable)
        #[arg(long, value_name = "INDEX")]
        lock: Vec<usize>,
        /// Give the anchor at INDEX polar handles (repeatable)
        #[arg(long, value_name = "INDEX")]
        polar: Vec<usize>,
        /// Smooth interior anchors after editing
        #[arg(long)]
        smooth: bool,
        /// Write the curve text to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
