//! Read-only and mutable views of a single field.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use crate::error::{Error, OutOfRangeSnafu};
use crate::field::Field;
use crate::mode::{Checked, Mode};
use crate::word::{deposit, extract, fits, Word};

/// A read-only view of one field of a buffer.
///
/// A `BitView` borrows the bytes of the field's covering word `W` and decodes the field as a `T`
/// on every read. It has no write operations.
///
/// ```compile_fail
/// use bitstruct::Bitstruct;
///
/// let bits = Bitstruct::<1>::new();
/// bits.view::<0, 4, u8>().set(3);
/// ```
#[derive(Clone, Copy)]
pub struct BitView<'a, T: Field, W: Word = <T as Field>::Word> {
    bytes: &'a [u8],
    begin: usize,
    extent: usize,
    _marker: PhantomData<fn() -> (T, W)>,
}

impl<'a, T: Field, W: Word> BitView<'a, T, W> {
    /// `bytes` must be exactly one `W` long and the field must lie within it.
    pub(crate) fn new(bytes: &'a [u8], begin: usize, extent: usize) -> Self {
        debug_assert_eq!(bytes.len(), W::BYTES);
        debug_assert!(extent >= 1 && begin + extent <= W::BITS);
        Self {
            bytes,
            begin,
            extent,
            _marker: PhantomData,
        }
    }

    /// The field's first bit within its covering word.
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// The field's width in bits.
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Reads the field's bits, right-justified and zero-extended.
    pub fn raw(&self) -> u64 {
        extract(W::load(self.bytes), self.begin, self.extent).to_raw()
    }

    /// Reads the field as a `T`.
    pub fn get(&self) -> T {
        T::from_word(<T::Word as Word>::from_raw(self.raw()))
    }
}

impl<T: Field + PartialEq, W: Word> PartialEq<T> for BitView<'_, T, W> {
    fn eq(&self, other: &T) -> bool {
        self.get() == *other
    }
}

impl<T: Field + Debug, W: Word> Debug for BitView<'_, T, W> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("BitView").field(&self.get()).finish()
    }
}

/// A mutable view of one field of a buffer.
///
/// A `BitViewMut` exclusively borrows the bytes of the field's covering word `W`. Writes replace
/// exactly the field's bits and leave the rest of the word as it was. The mode `M` decides what
/// [`set`](Self::set) does with values that are too wide for the field.
pub struct BitViewMut<'a, T: Field, M: Mode = Checked, W: Word = <T as Field>::Word> {
    bytes: &'a mut [u8],
    begin: usize,
    extent: usize,
    _marker: PhantomData<fn() -> (T, M, W)>,
}

impl<'a, T: Field, M: Mode, W: Word> BitViewMut<'a, T, M, W> {
    /// `bytes` must be exactly one `W` long and the field must lie within it.
    pub(crate) fn new(bytes: &'a mut [u8], begin: usize, extent: usize) -> Self {
        debug_assert_eq!(bytes.len(), W::BYTES);
        debug_assert!(extent >= 1 && begin + extent <= W::BITS);
        Self {
            bytes,
            begin,
            extent,
            _marker: PhantomData,
        }
    }

    /// Reborrows this view as a read-only view.
    pub fn as_view(&self) -> BitView<'_, T, W> {
        BitView::new(self.bytes, self.begin, self.extent)
    }

    /// The field's first bit within its covering word.
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// The field's width in bits.
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Reads the field's bits, right-justified and zero-extended.
    pub fn raw(&self) -> u64 {
        self.as_view().raw()
    }

    /// Reads the field as a `T`.
    pub fn get(&self) -> T {
        self.as_view().get()
    }

    /// Writes a value according to the view's mode.
    ///
    /// In [`Checked`] mode this is [`try_set`](Self::try_set) followed by a panic on failure. In
    /// [`Unchecked`](crate::Unchecked) mode it is [`set_masked`](Self::set_masked).
    ///
    /// # Panics
    ///
    /// In [`Checked`] mode, panics if the value's bit pattern does not fit in
    /// [`extent`](Self::extent) bits. The buffer is not modified.
    pub fn set(&mut self, value: T) {
        if M::CHECKED {
            if let Err(e) = self.try_set(value) {
                panic!("{e}");
            }
        } else {
            self.set_masked(value);
        }
    }

    /// Writes a value if its bit pattern fits in [`extent`](Self::extent) bits, regardless of the
    /// view's mode.
    ///
    /// On failure the buffer is not modified.
    pub fn try_set(&mut self, value: T) -> Result<(), Error> {
        let raw = value.into_word().to_raw();
        if !fits(raw, self.extent) {
            tracing::debug!(
                value = raw,
                extent = self.extent,
                "rejected out-of-range field write"
            );
            return OutOfRangeSnafu {
                value: raw,
                extent: self.extent,
            }
            .fail();
        }
        self.store(raw);
        Ok(())
    }

    /// Writes the low [`extent`](Self::extent) bits of a value, regardless of the view's mode.
    ///
    /// Any higher bits are discarded. Bits outside the field are never modified.
    pub fn set_masked(&mut self, value: T) {
        let raw = value.into_word().to_raw();
        if !fits(raw, self.extent) {
            tracing::trace!(
                value = raw,
                extent = self.extent,
                "truncating field write"
            );
        }
        self.store(raw);
    }

    /// Writes a value according to the view's mode and returns the previous value.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`set`](Self::set).
    pub fn replace(&mut self, value: T) -> T {
        let old = self.get();
        self.set(value);
        old
    }

    /// Replaces the value with the result of `f` according to the view's mode and returns the
    /// previous value.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`set`](Self::set).
    pub fn update(&mut self, f: impl FnOnce(T) -> T) -> T {
        let old = self.get();
        self.set(f(old));
        old
    }

    fn store(&mut self, raw: u64) {
        let word = deposit(
            W::load(self.bytes),
            W::from_raw(raw),
            self.begin,
            self.extent,
        );
        word.store(self.bytes);
    }
}

impl<T: Field + PartialEq, M: Mode, W: Word> PartialEq<T> for BitViewMut<'_, T, M, W> {
    fn eq(&self, other: &T) -> bool {
        self.get() == *other
    }
}

impl<T: Field + Debug, M: Mode, W: Word> Debug for BitViewMut<'_, T, M, W> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("BitViewMut").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Unchecked;

    #[test]
    fn test_read_isolates_field() {
        let bytes = [0b1011_0110u8];
        assert_eq!(BitView::<u8>::new(&bytes, 0, 4).get(), 0b0110);
        assert_eq!(BitView::<u8>::new(&bytes, 4, 2).get(), 0b11);
        assert_eq!(BitView::<u8>::new(&bytes, 6, 1).get(), 0);
        assert_eq!(BitView::<bool>::new(&bytes, 7, 1).get(), true);
    }

    #[test]
    fn test_write_preserves_neighbours() {
        let mut bytes = [0xffu8, 0xff];
        BitViewMut::<u16, Checked>::new(&mut bytes, 3, 9).set(0);
        assert_eq!(bytes, [0b0000_0111, 0b1111_0000]);
    }

    #[test]
    fn test_try_set_out_of_range() {
        let mut bytes = [0b1010_0000u8];
        let mut view = BitViewMut::<u8, Checked>::new(&mut bytes, 0, 4);
        assert_eq!(
            view.try_set(20),
            Err(Error::OutOfRange {
                value: 20,
                extent: 4,
            }),
        );
        assert_eq!(bytes, [0b1010_0000]);
    }

    #[test]
    #[should_panic(expected = "value 0x14 does not fit in a 4-bit field")]
    fn test_checked_set_panics() {
        let mut bytes = [0u8];
        BitViewMut::<u8, Checked>::new(&mut bytes, 0, 4).set(20);
    }

    #[test]
    fn test_unchecked_set_truncates() {
        let mut bytes = [0b1010_0000u8];
        BitViewMut::<u8, Unchecked>::new(&mut bytes, 0, 4).set(20);
        assert_eq!(bytes, [0b1010_0100]);
    }

    #[test]
    fn test_replace_and_update() {
        let mut bytes = [0u8; 2];
        let mut view = BitViewMut::<u8, Checked, u16>::new(&mut bytes, 6, 8);
        assert_eq!(view.replace(0xab), 0);
        assert_eq!(view.update(|old| old / 2), 0xab);
        assert_eq!(view.get(), 0x55);
        assert_eq!(view.raw(), 0x55);
        assert_eq!(u16::from_le_bytes(bytes), 0x55 << 6);
    }

    #[test]
    fn test_compare_and_debug() {
        let bytes = [0x3cu8];
        let view = BitView::<u8>::new(&bytes, 0, 4);
        assert!(view == 12);
        assert_eq!(format!("{view:?}"), "BitView(12)");
    }
}
