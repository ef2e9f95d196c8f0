//! Curve text form.
//!
//! ```text
//! x,y[,flags];x,y[,flags];...|c1x,c1y,c2x,c2y;...
//! ```
//!
//! Anchors come first, then one control record per segment. Numbers are
//! written with [`EXPORT_PRECISION`] decimals. Flags are `L` (locked) and
//! `P` (polar), in any order.
//!
//! Import rejects anchors below zero speed and anchors closer together than
//! [`MIN_ANCHOR_GAP`], with two export steps of slack for rounding. Gaps
//! inside that slack are widened and handles that stray outside their
//! segment are clamped back, as after any edit.

use std::fmt;
use std::str::FromStr;

use pointeraccel_errors::CurveImportError;
use tracing::debug;

use crate::curve::{Anchor, ControlPair, CustomCurve, MIN_ANCHOR_GAP, MIN_ANCHORS};

/// Decimal places written by [`CustomCurve::export_text`].
pub const EXPORT_PRECISION: usize = 3;

/// One unit in the last exported decimal.
const EXPORT_STEP: f64 = 1e-3;

const ANCHOR: &str = "anchor";
const CONTROL: &str = "control";

impl CustomCurve {
    /// Serialize anchors and control points.
    #[must_use]
    pub fn export_text(&self) -> String {
        self.to_string()
    }

    /// Replace this curve with the one described by `text`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveImportError`] if the text is malformed. The curve is
    /// left untouched on error.
    pub fn import_text(&mut self, text: &str) -> Result<(), CurveImportError> {
        *self = text.parse()?;
        debug!(anchors = self.anchors().len(), "curve imported");
        Ok(())
    }
}

impl fmt::Display for CustomCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = EXPORT_PRECISION;
        for (i, anchor) in self.anchors().iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{:.p$},{:.p$}", anchor.x, anchor.y)?;
            if anchor.locked || anchor.polar {
                f.write_str(",")?;
                if anchor.locked {
                    f.write_str("L")?;
                }
                if anchor.polar {
                    f.write_str("P")?;
                }
            }
        }
        f.write_str("|")?;
        for (i, pair) in self.controls().iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(
                f,
                "{:.p$},{:.p$},{:.p$},{:.p$}",
                pair.start.0, pair.start.1, pair.end.0, pair.end.1
            )?;
        }
        Ok(())
    }
}

impl FromStr for CustomCurve {
    type Err = CurveImportError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CurveImportError::Empty);
        }
        let (anchor_text, control_text) = text
            .split_once('|')
            .ok_or(CurveImportError::MissingSection)?;

        let anchors = records(anchor_text)
            .enumerate()
            .map(|(index, record)| parse_anchor(index, record))
            .collect::<Result<Vec<_>, _>>()?;
        if anchors.len() < MIN_ANCHORS {
            return Err(CurveImportError::TooFewAnchors {
                found: anchors.len(),
                min: MIN_ANCHORS,
            });
        }
        if let Some(index) = anchors.iter().position(|a| a.x < 0.0) {
            return Err(CurveImportError::NegativeX { index });
        }
        for (index, (prev, next)) in anchors.iter().zip(anchors.iter().skip(1)).enumerate() {
            if next.x <= prev.x {
                return Err(CurveImportError::NotIncreasing { index: index + 1 });
            }
            // Export rounding can shave up to one step off a legal gap.
            if next.x - prev.x < MIN_ANCHOR_GAP - 2.0 * EXPORT_STEP {
                return Err(CurveImportError::AnchorsTooClose { index: index + 1 });
            }
        }

        let controls = records(control_text)
            .enumerate()
            .map(|(index, record)| parse_control(index, record))
            .collect::<Result<Vec<_>, _>>()?;
        if controls.len() + 1 != anchors.len() {
            return Err(CurveImportError::ControlCount {
                anchors: anchors.len(),
                controls: controls.len(),
            });
        }

        Ok(CustomCurve::from_parts(anchors, controls))
    }
}

/// Non-empty `;`-separated records. A trailing `;` is tolerated.
fn records(section: &str) -> impl Iterator<Item = &str> {
    section.split(';').map(str::trim).filter(|r| !r.is_empty())
}

fn parse_number(section: &'static str, index: usize, field: &str) -> Result<f64, CurveImportError> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CurveImportError::InvalidNumber {
            section,
            index,
            text: field.trim().to_owned(),
        })
}

fn parse_anchor(index: usize, record: &str) -> Result<Anchor, CurveImportError> {
    let fields: Vec<&str> = record.split(',').collect();
    let (x, y, flags) = match fields.as_slice() {
        [x, y] => (x, y, ""),
        [x, y, flags] => (x, y, flags.trim()),
        _ => {
            return Err(CurveImportError::FieldCount {
                section: ANCHOR,
                index,
                found: fields.len(),
                expected: "2 or 3",
            });
        }
    };

    let mut anchor = Anchor::new(
        parse_number(ANCHOR, index, x)?,
        parse_number(ANCHOR, index, y)?,
    );
    for flag in flags.chars() {
        match flag.to_ascii_uppercase() {
            'L' => anchor.locked = true,
            'P' => anchor.polar = true,
            _ => {
                return Err(CurveImportError::InvalidFlags {
                    index,
                    flags: flags.to_owned(),
                });
            }
        }
    }
    Ok(anchor)
}

fn parse_control(index: usize, record: &str) -> Result<ControlPair, CurveImportError> {
    let fields: Vec<&str> = record.split(',').collect();
    let [c1x, c1y, c2x, c2y] = fields.as_slice() else {
        return Err(CurveImportError::FieldCount {
            section: CONTROL,
            index,
            found: fields.len(),
            expected: "4",
        });
    };
    Ok(ControlPair::new(
        (
            parse_number(CONTROL, index, c1x)?,
            parse_number(CONTROL, index, c1y)?,
        ),
        (
            parse_number(CONTROL, index, c2x)?,
            parse_number(CONTROL, index, c2y)?,
        ),
    ))
}
