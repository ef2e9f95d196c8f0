//! Effective parameter listing

use anyhow::Result;
use pointeraccel_engine::EngineConstants;

use crate::commands::ParamArgs;
use crate::output;

/// Execute the params command
pub fn execute(args: &ParamArgs, json: bool) -> Result<()> {
    let params = args.build()?;
    let constants = EngineConstants::build(&params);
    output::print_params(&params, constants.mode().fault(), json)
}
