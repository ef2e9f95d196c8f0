//! Scripted engine simulation

use std::io::Read;
use std::path::Path;

use anyhow::Result;
use pointeraccel_engine::{AccelEngine, ManualClock, MotionDelta};
use pointeraccel_errors::EngineFault;
use serde::Serialize;
use tracing::{info, warn};

use crate::commands::ParamArgs;
use crate::error::CliError;
use crate::output;
use crate::script::{Directive, parse_script};

/// One processed motion sample.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRow {
    pub line: usize,
    pub time_ms: f64,
    pub input: MotionDelta,
    pub output: MotionDelta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
}

/// A `set` line the engine refused.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedLine {
    pub line: usize,
    pub message: String,
}

/// Everything a simulation produced.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub samples: Vec<SampleRow>,
    pub rejected: Vec<RejectedLine>,
    pub commits: u64,
    pub debounced_samples: u64,
    pub overflow_samples: u64,
    pub pass_through_samples: u64,
}

/// Execute the simulate command
pub fn execute(params: &ParamArgs, script: Option<&Path>, json: bool) -> Result<()> {
    let text = match script {
        Some(path) => std::fs::read_to_string(path).map_err(CliError::from)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::from)?;
            buffer
        }
    };
    let report = run(params, &text)?;
    output::print_simulation(&report, json)
}

/// Run `text` through a fresh engine on a manual clock.
pub fn run(params: &ParamArgs, text: &str) -> Result<SimulationReport, CliError> {
    let script = parse_script(text)?;
    let mut engine = AccelEngine::with_clock(params.build()?, ManualClock::new());
    let mut samples = Vec::new();
    let mut rejected = Vec::new();

    for entry in script {
        match entry.directive {
            Directive::Sample { at_ns, delta } => {
                let outcome = engine.process(at_ns, delta);
                samples.push(SampleRow {
                    line: entry.line,
                    time_ms: at_ns as f64 / 1e6,
                    input: delta,
                    output: outcome.delta,
                    fault: outcome.fault.map(fault_name),
                });
            }
            Directive::Set { key, value } => {
                if let Err(e) = engine.stage(&key, &value) {
                    warn!(line = entry.line, error = %e, "script parameter rejected");
                    rejected.push(RejectedLine {
                        line: entry.line,
                        message: e.to_string(),
                    });
                }
            }
            Directive::Trigger => engine.trigger(),
        }
    }

    let counters = engine.counters().snapshot();
    info!(samples = counters.samples, commits = counters.commits, "simulation finished");
    Ok(SimulationReport {
        samples,
        rejected,
        commits: counters.commits,
        debounced_samples: counters.debounced_samples,
        overflow_samples: counters.overflow_samples,
        pass_through_samples: counters.pass_through_samples,
    })
}

fn fault_name(fault: EngineFault) -> String {
    fault.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn args(pairs: &[&str]) -> ParamArgs {
        ParamArgs {
            params: pairs.iter().map(|p| (*p).to_owned()).collect(),
        }
    }

    #[test]
    fn identity_script() -> TestResult {
        let report = run(&args(&[]), "0 0 0\n4 5 -3 1\n8 7 2 -1\n")?;
        let outputs: Vec<MotionDelta> = report.samples.iter().map(|s| s.output).collect();
        assert_eq!(
            outputs,
            vec![
                MotionDelta::new(0, 0, 0),
                MotionDelta::new(5, -3, 1),
                MotionDelta::new(7, 2, -1)
            ]
        );
        assert_eq!(report.commits, 0);
        Ok(())
    }

    #[test]
    fn commits_follow_cooldown() -> TestResult {
        let script = "\
0 0 0
set Acceleration 0.25
trigger
4 16 0
set Acceleration 0
trigger
8 16 0
1004 16 0
";
        let report = run(&args(&[]), script)?;
        // First commit at 4 ms: rate 4, factor 2. The second waits until 1004 ms.
        let dx: Vec<i32> = report.samples.iter().map(|s| s.output.dx).collect();
        assert_eq!(dx, vec![0, 32, 32, 16]);
        assert_eq!(report.commits, 2);
        assert!(report.debounced_samples >= 1);
        Ok(())
    }

    #[test]
    fn rejected_set_lines_are_reported() -> TestResult {
        let report = run(&args(&[]), "set Sensitivity 0\nset Bogus 1\n0 1 1\n")?;
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected.first().map(|r| r.line), Some(1));
        assert_eq!(
            report.samples.first().map(|s| s.output),
            Some(MotionDelta::new(1, 1, 0))
        );
        Ok(())
    }
}
