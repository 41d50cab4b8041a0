//! Convenience re-exports.

#[doc(no_inline)]
pub use crate::{
    bitstruct, BitView, BitViewMut, Bitstruct, Checked, Field, FieldLayout, Mode, Unchecked,
};
