//! Example invocations, generated types, and usage.

use crate::prelude::*;

bitstruct! {
    /// An 8-bit register.
    ///
    /// # Declaration
    ///
    /// ```
    /// # use bitstruct::prelude::*;
    /// # use bitstruct::doc::example::Kind;
    /// bitstruct! {
    ///     pub struct Register: 8 {
    ///         pub len(0, 4),
    ///         pub kind(4, 2) as Kind,
    ///         pub a(6, 1) as bool = ro,
    ///         pub b(7, 1) as bool,
    ///     }
    /// }
    /// ```
    ///
    /// # Usage
    ///
    /// ```
    /// use bitstruct::doc::example::{Kind, Register};
    /// use bitstruct::prelude::*;
    ///
    /// let mut reg = Register::<Checked>::new();
    /// reg.len_mut().set(12);
    /// reg.kind_mut().set(Kind::C);
    /// reg.b_mut().set(true);
    ///
    /// assert_eq!(reg.as_bytes(), &[0xbc]);
    /// assert_eq!(reg.kind().get(), Kind::C);
    /// assert!(!reg.a().get());
    /// assert!(reg.b().get());
    ///
    /// reg.b_mut().set(false);
    /// assert!(!reg.b().get());
    /// assert_eq!(reg.as_bytes(), &[0x3c]);
    /// ```
    pub struct Register: 8 {
        /// A 4-bit length.
        pub len(0, 4),
        /// A 2-bit [`Kind`].
        pub kind(4, 2) as Kind,
        /// A read-only flag.
        pub a(6, 1) as bool = ro,
        /// A read-write flag.
        pub b(7, 1) as bool,
    }
}

/// A 2-bit enumeration stored in [`Register::kind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    /// No kind.
    Null = 0,
    /// Kind A.
    A = 1,
    /// Kind B.
    B = 2,
    /// Kind C.
    C = 3,
}

impl Field for Kind {
    type Word = u8;

    fn into_word(self) -> u8 {
        self as u8
    }

    fn from_word(word: u8) -> Self {
        match word & 0b11 {
            0 => Self::Null,
            1 => Self::A,
            2 => Self::B,
            _ => Self::C,
        }
    }
}

#[cfg(target_pointer_width = "64")]
bitstruct! {
    /// A 64-bit pointer packed with a type tag and a length.
    ///
    /// The pointer occupies the low 48 bits, which covers the user address space of common 64-bit
    /// targets.
    ///
    /// # Declaration
    ///
    /// ```
    /// # use bitstruct::prelude::*;
    /// # use bitstruct::doc::example::DataType;
    /// bitstruct! {
    ///     pub struct PackedPtr: 64 {
    ///         pub ptr(0, 48) as *const (),
    ///         pub data_type(48, 8) as DataType,
    ///         pub len(56, 8),
    ///     }
    /// }
    /// ```
    ///
    /// # Usage
    ///
    /// ```
    /// use bitstruct::doc::example::{DataType, PackedPtr};
    /// use bitstruct::prelude::*;
    ///
    /// let value = 42i32;
    /// let mut packed = PackedPtr::<Checked>::new();
    /// packed.ptr_mut().set((&value as *const i32).cast());
    /// packed.data_type_mut().set(DataType::Integer);
    /// packed.len_mut().set(1);
    ///
    /// let ptr = packed.ptr().get().cast::<i32>();
    /// assert_eq!(unsafe { *ptr }, 42);
    /// ```
    pub struct PackedPtr: 64 {
        /// An address.
        pub ptr(0, 48) as *const (),
        /// The type of the data at [`ptr`](Self::ptr).
        pub data_type(48, 8) as DataType,
        /// The number of elements at [`ptr`](Self::ptr).
        pub len(56, 8),
    }
}

/// The type tag stored in [`PackedPtr::data_type`].
///
/// Unknown tags read back as [`Null`](Self::Null).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    /// No data.
    Null = 0,
    /// Integer data.
    Integer = 1,
    /// Floating-point data.
    Floating = 2,
}

impl Field for DataType {
    type Word = u8;

    fn into_word(self) -> u8 {
        self as u8
    }

    fn from_word(word: u8) -> Self {
        match word {
            1 => Self::Integer,
            2 => Self::Floating,
            _ => Self::Null,
        }
    }
}
