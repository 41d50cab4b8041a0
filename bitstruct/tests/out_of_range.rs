use std::panic::{self, AssertUnwindSafe};

use bitstruct::prelude::*;
use bitstruct::Error;

bitstruct! {
    struct Nibbles: 8 {
        low(0, 4),
        high(4, 4),
    }
}

#[test]
#[should_panic(expected = "value 0x14 does not fit in a 4-bit field")]
fn test_checked_set_panics() {
    let mut nibbles = Nibbles::<Checked>::new();
    nibbles.low_mut().set(20);
}

#[test]
fn test_checked_panic_leaves_buffer_untouched() {
    let mut nibbles = Nibbles::<Checked>::from_bitstruct(Bitstruct::from_bytes([0xa5]));
    let result = panic::catch_unwind(AssertUnwindSafe(|| nibbles.low_mut().set(20)));
    assert!(result.is_err());
    assert_eq!(nibbles.as_bytes(), &[0xa5]);
}

#[test]
fn test_checked_try_set() {
    let mut nibbles = Nibbles::<Checked>::new();
    nibbles.high_mut().set(0xa);
    assert_eq!(
        nibbles.low_mut().try_set(20),
        Err(Error::OutOfRange {
            value: 20,
            extent: 4,
        }),
    );
    assert_eq!(nibbles.as_bytes(), &[0xa0]);
    assert_eq!(nibbles.low_mut().try_set(15), Ok(()));
    assert_eq!(nibbles.as_bytes(), &[0xaf]);
}

#[test]
fn test_unchecked_set_truncates() {
    let mut nibbles = Nibbles::<Unchecked>::new();
    nibbles.high_mut().set(0xa);
    nibbles.low_mut().set(20);
    assert_eq!(nibbles.low().get(), 4);
    assert_eq!(nibbles.high().get(), 0xa);
    assert_eq!(nibbles.as_bytes(), &[0xa4]);
}

#[test]
fn test_unchecked_try_set_still_checks() {
    let mut nibbles = Nibbles::<Unchecked>::new();
    assert!(nibbles.low_mut().try_set(20).is_err());
    assert_eq!(nibbles.as_bytes(), &[0]);
}

#[test]
fn test_masked_set_in_checked_mode() {
    let mut nibbles = Nibbles::<Checked>::from_bitstruct(Bitstruct::from_bytes([0xff]));
    nibbles.high_mut().set_masked(0x12);
    assert_eq!(nibbles.as_bytes(), &[0x2f]);
}

#[test]
fn test_error_display() {
    let error = Nibbles::<Checked>::new().low_mut().try_set(0xff).unwrap_err();
    assert_eq!(error.to_string(), "value 0xff does not fit in a 4-bit field");
}

#[test]
fn test_switch_mode() {
    let nibbles = Nibbles::<Checked>::new();
    let mut bits = nibbles.into_bitstruct().with_mode::<Unchecked>();
    bits.view_mut::<4, 4, u8>().set(0x1f);
    let nibbles = Nibbles::from(bits);
    assert_eq!(nibbles.high().get(), 0xf);
    assert_eq!(nibbles.low().get(), 0);
}
