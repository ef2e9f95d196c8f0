//! Motion script parsing
//!
//! ```text
//! # time_ms dx dy [wheel]
//! 0    0  0
//! 4.5  12 -3 1
//! set  Acceleration 0.5
//! trigger
//! ```

use pointeraccel_engine::{MotionDelta, split_assignment};

use crate::error::CliError;

const NS_PER_MS: u64 = 1_000_000;

/// One script directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Feed a motion sample at an absolute time.
    Sample { at_ns: u64, delta: MotionDelta },
    /// Stage a parameter.
    Set { key: String, value: String },
    /// Request a commit.
    Trigger,
}

/// A directive with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub directive: Directive,
}

/// Parse a whole script. Sample times must not go backwards.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, CliError> {
    let mut lines = Vec::new();
    let mut last_ns = 0;
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let directive = parse_line(content).map_err(|message| CliError::Script { line, message })?;
        if let Directive::Sample { at_ns, .. } = directive {
            if at_ns < last_ns {
                return Err(CliError::Script {
                    line,
                    message: "sample time goes backwards".to_owned(),
                });
            }
            last_ns = at_ns;
        }
        lines.push(ScriptLine { line, directive });
    }
    Ok(lines)
}

fn parse_line(content: &str) -> Result<Directive, String> {
    let mut words = content.split_whitespace();
    let first = words.next().unwrap_or_default();

    if first.eq_ignore_ascii_case("trigger") {
        return match words.next() {
            None => Ok(Directive::Trigger),
            Some(extra) => Err(format!("unexpected '{extra}' after trigger")),
        };
    }

    if first.eq_ignore_ascii_case("set") {
        let rest: Vec<&str> = words.collect();
        let (key, value) = match rest.as_slice() {
            [assignment] => split_assignment(assignment).map_err(|e| e.to_string())?,
            [key, value] => (*key, *value),
            _ => return Err("expected 'set KEY VALUE' or 'set KEY=VALUE'".to_owned()),
        };
        return Ok(Directive::Set {
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }

    let at_ns = parse_millis(first).ok_or_else(|| format!("invalid time '{first}'"))?;
    let mut counts = [0i32; 3];
    let mut found = 0;
    for word in words {
        let slot = counts
            .get_mut(found)
            .ok_or_else(|| "expected 'TIME_MS DX DY [WHEEL]'".to_owned())?;
        *slot = word
            .parse()
            .map_err(|e| format!("invalid count '{word}': {e}"))?;
        found += 1;
    }
    if found < 2 {
        return Err("expected 'TIME_MS DX DY [WHEEL]'".to_owned());
    }
    let [dx, dy, wheel] = counts;
    Ok(Directive::Sample {
        at_ns,
        delta: MotionDelta::new(dx, dy, wheel),
    })
}

/// Non-negative decimal milliseconds with up to nanosecond resolution.
fn parse_millis(text: &str) -> Option<u64> {
    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
    if frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || (whole.is_empty() && frac.is_empty()) {
        return None;
    }
    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac_ns: u64 = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<6}").parse().ok()?
    };
    whole.checked_mul(NS_PER_MS)?.checked_add(frac_ns)
}
