//! Unsigned word types used for bit arithmetic, and the type-level selector that maps a byte width
//! to one of them.

use core::fmt::Debug;

use byteorder::{ByteOrder, LittleEndian};
use num_traits::{PrimInt, Unsigned};

use crate::sealed::Sealed;

/// An unsigned integer used as the unit of bit arithmetic over a slice of a buffer.
///
/// There is one type implementing `Word` for each of the byte widths 1, 2, 4, and 8: [`u8`],
/// [`u16`], [`u32`], and [`u64`].
///
/// Words are loaded and stored in little-endian byte order. Bit `i` of a buffer is therefore
/// always bit `i % 8` of byte `i / 8`, whichever word width an accessor happens to use, and the
/// layout does not depend on the native byte order of the target.
pub trait Word: PrimInt + Unsigned + Debug + Sealed {
    /// The width of this word in bytes.
    const BYTES: usize;
    /// The width of this word in bits.
    const BITS: usize;

    /// Loads a word from the first [`BYTES`](Self::BYTES) bytes of `bytes`.
    fn load(bytes: &[u8]) -> Self;

    /// Stores the word to the first [`BYTES`](Self::BYTES) bytes of `bytes`.
    fn store(self, bytes: &mut [u8]);

    /// Zero-extends the word to a `u64`.
    fn to_raw(self) -> u64;

    /// Narrows a `u64` to this word, discarding any bits at or above [`BITS`](Self::BITS).
    fn from_raw(raw: u64) -> Self;
}

impl Sealed for u8 {}

impl Word for u8 {
    const BYTES: usize = 1;
    const BITS: usize = 8;

    #[inline(always)]
    fn load(bytes: &[u8]) -> Self {
        bytes[0]
    }

    #[inline(always)]
    fn store(self, bytes: &mut [u8]) {
        bytes[0] = self;
    }

    #[inline(always)]
    fn to_raw(self) -> u64 {
        self.into()
    }

    #[inline(always)]
    fn from_raw(raw: u64) -> Self {
        raw as u8
    }
}

macro_rules! impl_word {
    ($($ty:ident: $bytes:literal, $read:ident, $write:ident;)*) => {$(
        impl Sealed for $ty {}

        impl Word for $ty {
            const BYTES: usize = $bytes;
            const BITS: usize = $bytes * 8;

            #[inline(always)]
            fn load(bytes: &[u8]) -> Self {
                LittleEndian::$read(bytes)
            }

            #[inline(always)]
            fn store(self, bytes: &mut [u8]) {
                LittleEndian::$write(bytes, self);
            }

            #[inline(always)]
            fn to_raw(self) -> u64 {
                self.into()
            }

            #[inline(always)]
            fn from_raw(raw: u64) -> Self {
                raw as $ty
            }
        }
    )*};
}

impl_word! {
    u16: 2, read_u16, write_u16;
    u32: 4, read_u32, write_u32;
    u64: 8, read_u64, write_u64;
}

/// A type-level function returning a [`Word`].
pub trait SelectWord {
    /// The selected word type.
    type Word: Word;
}

/// Maps a byte width to the [`Word`] of that width.
///
/// Only the widths 1, 2, 4, and 8 select a word. Naming any other width through [`WordFor`] is a
/// compile error.
///
/// ```compile_fail
/// # use bitstruct::WordFor;
/// let _: WordFor<3> = 0;
/// ```
pub enum WordOfBytes<const BYTES: usize> {}

impl SelectWord for WordOfBytes<1> {
    type Word = u8;
}

impl SelectWord for WordOfBytes<2> {
    type Word = u16;
}

impl SelectWord for WordOfBytes<4> {
    type Word = u32;
}

impl SelectWord for WordOfBytes<8> {
    type Word = u64;
}

/// The [`Word`] that is `BYTES` bytes wide.
pub type WordFor<const BYTES: usize> = <WordOfBytes<BYTES> as SelectWord>::Word;

/// Zeroes every bit of `value` at or above bit `extent`.
///
/// Requires `1 <= extent <= W::BITS`.
#[inline(always)]
pub(crate) fn truncate<W: Word>(value: W, extent: usize) -> W {
    let shift = W::BITS - extent;
    (value << shift) >> shift
}

/// Isolates the `extent` bits of `word` starting at bit `begin`, right-justified and
/// zero-extended.
///
/// Requires `extent >= 1` and `begin + extent <= W::BITS`.
#[inline(always)]
pub(crate) fn extract<W: Word>(word: W, begin: usize, extent: usize) -> W {
    truncate(word, begin + extent) >> begin
}

/// Replaces the `extent` bits of `word` starting at bit `begin` with the low `extent` bits of
/// `value`. All other bits of `word` are preserved.
///
/// Requires `extent >= 1` and `begin + extent <= W::BITS`.
#[inline(always)]
pub(crate) fn deposit<W: Word>(word: W, value: W, begin: usize, extent: usize) -> W {
    let field = truncate(!W::zero(), extent) << begin;
    (word & !field) | (truncate(value, extent) << begin)
}

/// Checks whether `raw` is representable in `extent` bits.
#[inline(always)]
pub(crate) fn fits(raw: u64, extent: usize) -> bool {
    extent >= 64 || raw >> extent == 0
}

#[cfg(test)]
mod tests {
    use core::mem::size_of;

    use super::*;

    #[test]
    fn test_word_for_width() {
        assert_eq!(size_of::<WordFor<1>>(), 1);
        assert_eq!(size_of::<WordFor<2>>(), 2);
        assert_eq!(size_of::<WordFor<4>>(), 4);
        assert_eq!(size_of::<WordFor<8>>(), 8);
        assert_eq!(<WordFor<4> as Word>::BITS, 32);
    }

    #[test]
    fn test_load_store_little_endian() {
        let mut bytes = [0u8; 8];
        0x1234u16.store(&mut bytes);
        assert_eq!(bytes[..2], [0x34, 0x12]);
        assert_eq!(u16::load(&bytes), 0x1234);

        0x0102_0304_0506_0708u64.store(&mut bytes);
        assert_eq!(bytes, [8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(u32::load(&bytes[4..]), 0x0102_0304);
        assert_eq!(u8::load(&bytes[7..]), 0x01);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(0xffu8, 4), 0x0f);
        assert_eq!(truncate(0xffu8, 8), 0xff);
        assert_eq!(truncate(20u8, 4), 4);
        assert_eq!(truncate(u64::MAX, 48), 0x0000_ffff_ffff_ffff);
    }

    #[test]
    fn test_extract() {
        assert_eq!(extract(0b0011_1100u8, 0, 4), 12);
        assert_eq!(extract(0b0011_1100u8, 4, 2), 3);
        assert_eq!(extract(0b0011_1100u8, 6, 1), 0);
        assert_eq!(extract(0b1011_1100u8, 7, 1), 1);
        assert_eq!(extract(u32::MAX, 3, 29), u32::MAX >> 3);
    }

    #[test]
    fn test_deposit_preserves_neighbours() {
        assert_eq!(deposit(0xffu8, 0, 2, 3), 0b1110_0011);
        assert_eq!(deposit(0x00u8, 0xff, 2, 3), 0b0001_1100);
        assert_eq!(deposit(0b0011_1100u8, 5, 0, 4), 0b0011_0101);
        assert_eq!(deposit(u64::MAX, 0, 0, 64), 0);
    }

    #[test]
    fn test_fits() {
        assert!(fits(15, 4));
        assert!(!fits(16, 4));
        assert!(!fits(20, 4));
        assert!(fits(u64::MAX, 64));
        assert!(fits(0, 1));
        assert!(!fits(2, 1));
    }
}
