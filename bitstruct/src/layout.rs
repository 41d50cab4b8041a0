//! Field placement and the structural checks every field must pass.

use core::fmt::{self, Display, Formatter};
use core::marker::PhantomData;
use core::mem::{align_of, size_of};

use crate::field::Field;
use crate::word::Word;

/// The position of a field within a buffer: a starting bit and a width in bits.
///
/// Bit `i` of a buffer is bit `i % 8` of byte `i / 8`. A field is accessed through the word that
/// starts at its first byte, so [`begin`](Self::begin) is always less than 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldLayout {
    bit: usize,
    extent: usize,
}

impl FieldLayout {
    /// Describes the field of `extent` bits starting at buffer bit `bit`.
    pub const fn new(bit: usize, extent: usize) -> Self {
        Self { bit, extent }
    }

    /// The field's first bit within the buffer.
    pub const fn bit(self) -> usize {
        self.bit
    }

    /// The field's width in bits.
    pub const fn extent(self) -> usize {
        self.extent
    }

    /// One past the field's last bit within the buffer.
    pub const fn end(self) -> usize {
        self.bit.saturating_add(self.extent)
    }

    /// The byte where the field's covering word starts.
    pub const fn byte(self) -> usize {
        self.bit / 8
    }

    /// The field's first bit within its covering word.
    pub const fn begin(self) -> usize {
        self.bit % 8
    }

    /// Checks whether two fields share any bit.
    ///
    /// Views of overlapping fields alias the same storage.
    pub const fn overlaps(self, other: Self) -> bool {
        self.bit < other.end() && other.bit < self.end()
    }

    /// Checks that a field of value type `T`, accessed through word `W`, fits this layout in a
    /// buffer of `buffer_bytes` bytes.
    ///
    /// Checks are performed in a fixed order and the first failure is reported.
    pub const fn check<T: Field, W: Word>(self, buffer_bytes: usize) -> Result<(), LayoutError> {
        let buffer_bits = buffer_bytes.saturating_mul(8);
        let value_bytes = size_of::<T>();
        let align = align_of::<T>();
        // A value converts through its own word, which may be narrower than the value itself.
        let value_bits = if value_bytes * 8 < <T::Word as Word>::BITS {
            value_bytes * 8
        } else {
            <T::Word as Word>::BITS
        };

        if self.extent == 0 {
            return Err(LayoutError::ZeroExtent);
        }
        if value_bytes > buffer_bytes {
            return Err(LayoutError::ValueWiderThanBuffer {
                value_bytes,
                buffer_bytes,
            });
        }
        if self.bit >= buffer_bits || self.end() > buffer_bits {
            return Err(LayoutError::OutOfBounds {
                bit: self.bit,
                extent: self.extent,
                buffer_bits,
            });
        }
        if self.byte() % align != 0 {
            return Err(LayoutError::Misaligned {
                byte: self.byte(),
                align,
            });
        }
        if self.extent > value_bits {
            return Err(LayoutError::ExtentExceedsValue {
                extent: self.extent,
                value_bits,
            });
        }
        if self.begin() + self.extent > W::BITS {
            return Err(LayoutError::ExtentExceedsWord {
                begin: self.begin(),
                extent: self.extent,
                word_bits: W::BITS,
            });
        }
        if self.byte() + W::BYTES > buffer_bytes {
            return Err(LayoutError::WordOutOfBounds {
                byte: self.byte(),
                word_bytes: W::BYTES,
                buffer_bytes,
            });
        }
        Ok(())
    }

    /// Like [`check`](Self::check), but panics on failure.
    ///
    /// Evaluated in a const context, the panic becomes a build error.
    ///
    /// ```compile_fail
    /// use bitstruct::FieldLayout;
    ///
    /// // A `u16` may only start at an even byte.
    /// const _: () = FieldLayout::new(8, 16).assert_valid::<u16, u16>(4);
    /// ```
    pub const fn assert_valid<T: Field, W: Word>(self, buffer_bytes: usize) {
        if let Err(e) = self.check::<T, W>(buffer_bytes) {
            panic!("{}", e.describe());
        }
    }
}

/// Forces layout validation for a statically described field when the accessor that names it is
/// instantiated.
pub(crate) struct Validate<const BYTES: usize, const BIT: usize, const EXTENT: usize, T, W>(
    PhantomData<(T, W)>,
);

impl<const BYTES: usize, const BIT: usize, const EXTENT: usize, T: Field, W: Word>
    Validate<BYTES, BIT, EXTENT, T, W>
{
    pub(crate) const OK: () = FieldLayout::new(BIT, EXTENT).assert_valid::<T, W>(BYTES);
}

/// The reason a field layout was rejected.
///
/// For statically described fields these surface as build errors. Fields described at runtime
/// report them through [`Error::Layout`](crate::Error::Layout).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LayoutError {
    /// The field is zero bits wide.
    ZeroExtent,
    /// The value type is larger than the whole buffer.
    ValueWiderThanBuffer {
        /// Size of the value type in bytes.
        value_bytes: usize,
        /// Size of the buffer in bytes.
        buffer_bytes: usize,
    },
    /// The field's bit range extends past the end of the buffer.
    OutOfBounds {
        /// The field's first bit.
        bit: usize,
        /// The field's width in bits.
        extent: usize,
        /// Size of the buffer in bits.
        buffer_bits: usize,
    },
    /// The field's byte offset is not a multiple of the value type's alignment.
    Misaligned {
        /// The field's byte offset.
        byte: usize,
        /// The value type's alignment.
        align: usize,
    },
    /// The field is wider than its value type, or than the word the value type converts through.
    ExtentExceedsValue {
        /// The field's width in bits.
        extent: usize,
        /// The number of bits the value type can hold.
        value_bits: usize,
    },
    /// The field does not fit in its covering word.
    ExtentExceedsWord {
        /// The field's first bit within the word.
        begin: usize,
        /// The field's width in bits.
        extent: usize,
        /// Size of the word in bits.
        word_bits: usize,
    },
    /// The covering word extends past the end of the buffer.
    WordOutOfBounds {
        /// The word's first byte.
        byte: usize,
        /// Size of the word in bytes.
        word_bytes: usize,
        /// Size of the buffer in bytes.
        buffer_bytes: usize,
    },
}

impl LayoutError {
    /// A short, static description of the failure.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::ZeroExtent => "field extent must be at least one bit",
            Self::ValueWiderThanBuffer { .. } => "data type is too large for the buffer",
            Self::OutOfBounds { .. } => "bit range is out of bounds",
            Self::Misaligned { .. } => "misaligned access",
            Self::ExtentExceedsValue { .. } => "bit extent is wider than the data type",
            Self::ExtentExceedsWord { .. } => "bit range does not fit in its word",
            Self::WordOutOfBounds { .. } => "word extends past the end of the buffer",
        }
    }
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Self::ZeroExtent => write!(f, "{}", self.describe()),
            Self::ValueWiderThanBuffer {
                value_bytes,
                buffer_bytes,
            } => write!(
                f,
                "{}: {value_bytes} bytes in a {buffer_bytes}-byte buffer",
                self.describe(),
            ),
            Self::OutOfBounds {
                bit,
                extent,
                buffer_bits,
            } => write!(
                f,
                "{}: bits {bit}..{} in a {buffer_bits}-bit buffer",
                self.describe(),
                bit.saturating_add(extent),
            ),
            Self::Misaligned { byte, align } => write!(
                f,
                "{}: byte {byte} is not a multiple of {align}",
                self.describe(),
            ),
            Self::ExtentExceedsValue { extent, value_bits } => write!(
                f,
                "{}: {extent} bits for a {value_bits}-bit type",
                self.describe(),
            ),
            Self::ExtentExceedsWord {
                begin,
                extent,
                word_bits,
            } => write!(
                f,
                "{}: bits {begin}..{} of a {word_bits}-bit word",
                self.describe(),
                begin + extent,
            ),
            Self::WordOutOfBounds {
                byte,
                word_bytes,
                buffer_bytes,
            } => write!(
                f,
                "{}: {word_bytes} bytes at byte {byte} of a {buffer_bytes}-byte buffer",
                self.describe(),
            ),
        }
    }
}

impl snafu::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<T: Field, W: Word>(
        bit: usize,
        extent: usize,
        buffer_bytes: usize,
    ) -> Result<(), LayoutError> {
        FieldLayout::new(bit, extent).check::<T, W>(buffer_bytes)
    }

    #[test]
    fn test_accessors() {
        let layout = FieldLayout::new(13, 6);
        assert_eq!(layout.byte(), 1);
        assert_eq!(layout.begin(), 5);
        assert_eq!(layout.end(), 19);
    }

    #[test]
    fn test_overlaps() {
        let len = FieldLayout::new(0, 4);
        let kind = FieldLayout::new(4, 2);
        let wide = FieldLayout::new(2, 4);
        assert!(!len.overlaps(kind));
        assert!(!kind.overlaps(len));
        assert!(wide.overlaps(len));
        assert!(wide.overlaps(kind));
        assert!(len.overlaps(len));
    }

    #[test]
    fn test_valid_layouts() {
        assert_eq!(check::<u8, u8>(0, 4, 1), Ok(()));
        assert_eq!(check::<bool, u8>(7, 1, 1), Ok(()));
        assert_eq!(check::<u64, u64>(0, 48, 8), Ok(()));
        assert_eq!(check::<u8, u8>(56, 8, 8), Ok(()));
        assert_eq!(check::<u8, u16>(5, 8, 2), Ok(()));
    }

    #[test]
    fn test_zero_extent() {
        assert_eq!(check::<u8, u8>(0, 0, 1), Err(LayoutError::ZeroExtent));
    }

    #[test]
    fn test_value_wider_than_buffer() {
        assert_eq!(
            check::<u16, u16>(0, 4, 1),
            Err(LayoutError::ValueWiderThanBuffer {
                value_bytes: 2,
                buffer_bytes: 1,
            }),
        );
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(
            check::<u8, u8>(8, 1, 1),
            Err(LayoutError::OutOfBounds {
                bit: 8,
                extent: 1,
                buffer_bits: 8,
            }),
        );
        assert!(matches!(
            check::<u8, u8>(6, 4, 1),
            Err(LayoutError::OutOfBounds { .. }),
        ));
        assert!(matches!(
            check::<u8, u8>(usize::MAX, 4, 1),
            Err(LayoutError::OutOfBounds { .. }),
        ));
    }

    #[test]
    fn test_misaligned() {
        assert_eq!(
            check::<u32, u32>(8, 4, 8),
            Err(LayoutError::Misaligned { byte: 1, align: 4 }),
        );
        assert_eq!(check::<u32, u32>(32, 4, 8), Ok(()));
    }

    #[test]
    fn test_extent_exceeds_value() {
        assert_eq!(
            check::<u8, u16>(0, 9, 2),
            Err(LayoutError::ExtentExceedsValue {
                extent: 9,
                value_bits: 8,
            }),
        );
    }

    #[test]
    fn test_extent_exceeds_value_word() {
        // Eight bytes wide, but only 32 bits survive the conversion.
        #[derive(Clone, Copy)]
        struct Id(u64);

        impl Field for Id {
            type Word = u32;

            fn into_word(self) -> u32 {
                self.0 as u32
            }

            fn from_word(word: u32) -> Self {
                Self(word.into())
            }
        }

        assert_eq!(
            check::<Id, u64>(0, 40, 8),
            Err(LayoutError::ExtentExceedsValue {
                extent: 40,
                value_bits: 32,
            }),
        );
        assert_eq!(check::<Id, u64>(0, 32, 8), Ok(()));
    }

    #[test]
    fn test_extent_exceeds_word() {
        assert_eq!(
            check::<u8, u8>(3, 6, 2),
            Err(LayoutError::ExtentExceedsWord {
                begin: 3,
                extent: 6,
                word_bits: 8,
            }),
        );
    }

    #[test]
    fn test_word_out_of_bounds() {
        assert_eq!(
            check::<u8, u16>(8, 4, 2),
            Err(LayoutError::WordOutOfBounds {
                byte: 1,
                word_bytes: 2,
                buffer_bytes: 2,
            }),
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            LayoutError::Misaligned { byte: 1, align: 4 }.to_string(),
            "misaligned access: byte 1 is not a multiple of 4",
        );
        assert_eq!(
            LayoutError::ZeroExtent.to_string(),
            "field extent must be at least one bit",
        );
    }
}
