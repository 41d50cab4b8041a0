#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![doc = include_str!("../README.md")]

mod macros;

mod buffer;
pub mod doc;
mod error;
mod field;
mod layout;
mod mode;
pub mod prelude;
mod view;
mod word;

pub use crate::buffer::Bitstruct;
pub use crate::error::Error;
pub use crate::field::Field;
pub use crate::layout::{FieldLayout, LayoutError};
pub use crate::mode::{Checked, Mode, Unchecked};
pub use crate::view::{BitView, BitViewMut};
pub use crate::word::{SelectWord, Word, WordFor, WordOfBytes};

// For macro access via `$crate`.
#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}

mod sealed {
    pub trait Sealed {}
}
