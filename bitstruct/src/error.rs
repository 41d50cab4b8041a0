use snafu::Snafu;

use crate::layout::LayoutError;

/// The error type for fallible field operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// A value did not fit in the width of the field it was written to. Nothing was modified.
    #[snafu(display("value {value:#x} does not fit in a {extent}-bit field"))]
    OutOfRange {
        /// The value's bit pattern, zero-extended.
        value: u64,
        /// The field's width in bits.
        extent: usize,
    },
    /// A field described at runtime does not fit the buffer.
    #[snafu(display("invalid field layout: {source}"))]
    Layout {
        /// The structural check that failed.
        source: LayoutError,
    },
}
