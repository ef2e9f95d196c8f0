//! Property tests for fault code classification.

use pointeraccel_errors::EngineFault;
use proptest::prelude::*;

proptest! {
    #[test]
    fn from_code_is_inverse_of_code(code in any::<u8>()) {
        if let Some(fault) = EngineFault::from_code(code) {
            prop_assert_eq!(fault.code(), code);
        }
    }

    #[test]
    fn only_low_codes_are_known(code in 4u8..=255) {
        prop_assert!(EngineFault::from_code(code).is_none());
    }
}
