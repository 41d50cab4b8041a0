//! Checked and unchecked write modes.

use core::fmt::Debug;
use core::hash::Hash;

use crate::sealed::Sealed;

/// Selects how [`BitViewMut::set`](crate::BitViewMut::set) treats values that do not fit in a
/// field.
///
/// The mode is part of a buffer's type, so the choice is explicit at every declaration rather than
/// following the build profile. [`Checked`] is the default.
pub trait Mode: Copy + Debug + Default + Eq + Hash + Send + Sync + Sealed + 'static {
    /// Whether writes are range checked before the buffer is modified.
    const CHECKED: bool;
}

/// Out-of-range writes panic before anything is modified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Checked;

impl Sealed for Checked {}

impl Mode for Checked {
    const CHECKED: bool = true;
}

/// Out-of-range writes are truncated to the field's width.
///
/// Truncation never disturbs bits outside the field, but the high bits of the value are lost
/// without notice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Unchecked;

impl Sealed for Unchecked {}

impl Mode for Unchecked {
    const CHECKED: bool = false;
}
