//! Snapshot tests for error message formatting.

use insta::assert_snapshot;
use pointeraccel_errors::prelude::*;
use pointeraccel_fixed::FixedParseError;

#[test]
fn test_fault_messages() {
    assert_snapshot!(
        EngineFault::ArithmeticOverflow.to_string(),
        @"Fixed-point overflow, input passed through"
    );
    assert_snapshot!(
        EngineFault::NoValidMode.to_string(),
        @"No valid acceleration mode selected"
    );
}

#[test]
fn test_param_messages() {
    let err = ParamError::parse("Offset", "1.2.3", FixedParseError::Invalid("1.2.3".into()));
    assert_snapshot!(
        err.to_string(),
        @"parameter 'Offset' has invalid value '1.2.3': invalid fixed-point literal '1.2.3'"
    );
    let err = ParamError::lut("LutData", LutError::TooManyPoints { len: 300, capacity: 256 });
    assert_snapshot!(
        err.to_string(),
        @"parameter 'LutData': lookup table has 300 points, capacity is 256"
    );
}

#[test]
fn test_curve_messages() {
    let err = CurveImportError::ControlCount { anchors: 3, controls: 1 };
    assert_snapshot!(err.to_string(), @"curve text has 3 anchors but 1 control pairs");
    let err = CurveImportError::AnchorsTooClose { index: 2 };
    assert_snapshot!(err.to_string(), @"anchor 2 is too close to its predecessor");
    let err = CurveEditError::TooFewAnchors { min: 2 };
    assert_snapshot!(err.to_string(), @"a curve needs at least 2 anchors");
}

#[test]
fn test_top_level_wrapping() {
    let err: AccelError = CurveEditError::Locked(3).into();
    assert_snapshot!(err.to_string(), @"curve edit error: anchor 3 is locked");
}
