//! Legacy parameter conversion

use anyhow::Result;
use pointeraccel_engine::{EngineConstants, LegacyParams, split_assignment};

use crate::error::CliError;
use crate::output;

/// Execute the convert-legacy command
pub fn execute(assignments: &[String], literal: bool, json: bool) -> Result<()> {
    let mut legacy = LegacyParams::default();
    for assignment in assignments {
        let (key, value) = split_assignment(assignment).map_err(CliError::from)?;
        legacy.apply_text(key, value).map_err(CliError::from)?;
    }

    let params = if literal {
        legacy.as_params()
    } else {
        legacy.convert().map_err(CliError::from)?
    };
    let constants = EngineConstants::build(&params);
    output::print_params(&params, constants.mode().fault(), json)
}
