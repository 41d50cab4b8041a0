//! Value types that can be stored in a bit field.

use core::mem::size_of;

use crate::word::{Word, WordFor};

/// The word wide enough to hold an address on the target.
type PointerWord = WordFor<{ size_of::<usize>() }>;

/// A value type that can be read from and written to a bit field.
///
/// A field type converts to and from the unsigned [`Word`] of its own size. Writing a value stores
/// the low bits of [`into_word`](Self::into_word); reading passes the field's bits, zero-extended,
/// to [`from_word`](Self::from_word). No sign extension is ever applied.
///
/// `from_word` must accept every bit pattern, because the buffer's bytes may have come from
/// anywhere. Enumerations typically map unknown patterns to a designated variant:
///
/// ```
/// use bitstruct::prelude::*;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// #[repr(u8)]
/// enum Parity {
///     None = 0,
///     Even = 1,
///     Odd = 2,
/// }
///
/// impl Field for Parity {
///     type Word = u8;
///
///     fn into_word(self) -> u8 {
///         self as u8
///     }
///
///     fn from_word(word: u8) -> Self {
///         match word {
///             1 => Self::Even,
///             2 => Self::Odd,
///             _ => Self::None,
///         }
///     }
/// }
///
/// let mut bits = Bitstruct::<1>::new();
/// bits.view_mut::<3, 2, Parity>().set(Parity::Odd);
/// assert_eq!(bits.as_bytes(), &[0b0001_0000]);
/// assert_eq!(bits.view::<3, 2, Parity>().get(), Parity::Odd);
/// ```
pub trait Field: Copy {
    /// The word this type converts to and from.
    type Word: Word;

    /// Reinterprets the value as its unsigned bit pattern.
    fn into_word(self) -> Self::Word;

    /// Reconstructs a value from a zero-extended bit pattern.
    fn from_word(word: Self::Word) -> Self;
}

macro_rules! impl_field_for_words {
    ($($ty:ident),*) => {$(
        impl Field for $ty {
            type Word = WordFor<{ size_of::<$ty>() }>;

            #[inline(always)]
            fn into_word(self) -> Self::Word {
                self
            }

            #[inline(always)]
            fn from_word(word: Self::Word) -> Self {
                word
            }
        }
    )*};
}
impl_field_for_words!(u8, u16, u32, u64);

impl Field for usize {
    type Word = PointerWord;

    #[inline(always)]
    fn into_word(self) -> PointerWord {
        PointerWord::from_raw(self as u64)
    }

    #[inline(always)]
    fn from_word(word: PointerWord) -> Self {
        word.to_raw() as usize
    }
}

impl Field for bool {
    type Word = u8;

    #[inline(always)]
    fn into_word(self) -> u8 {
        self.into()
    }

    #[inline(always)]
    fn from_word(word: u8) -> Self {
        word != 0
    }
}

/// Pointers store their address. A field narrower than the pointer holds the address's low bits,
/// and reading zero-extends them back to a full address.
impl<T> Field for *const T {
    type Word = PointerWord;

    #[inline(always)]
    fn into_word(self) -> PointerWord {
        PointerWord::from_raw(self as usize as u64)
    }

    #[inline(always)]
    fn from_word(word: PointerWord) -> Self {
        word.to_raw() as usize as *const T
    }
}

/// See the implementation for `*const T`.
impl<T> Field for *mut T {
    type Word = PointerWord;

    #[inline(always)]
    fn into_word(self) -> PointerWord {
        PointerWord::from_raw(self as usize as u64)
    }

    #[inline(always)]
    fn from_word(word: PointerWord) -> Self {
        word.to_raw() as usize as *mut T
    }
}

#[cfg(test)]
mod tests {
    use core::ptr;

    use super::*;

    #[test]
    fn test_bool() {
        assert_eq!(true.into_word(), 1);
        assert_eq!(false.into_word(), 0);
        assert!(bool::from_word(1));
        assert!(bool::from_word(0x80));
        assert!(!bool::from_word(0));
    }

    #[test]
    fn test_pointer_round_trip() {
        let value = 7i32;
        let ptr: *const i32 = &value;
        assert_eq!(<*const i32>::from_word(ptr.into_word()), ptr);
        assert!(<*mut u8>::from_word(ptr::null_mut::<u8>().into_word()).is_null());
    }

    #[test]
    fn test_usize() {
        assert_eq!(usize::from_word(12usize.into_word()), 12);
        assert_eq!(size_of::<<usize as Field>::Word>(), size_of::<usize>());
    }
}
