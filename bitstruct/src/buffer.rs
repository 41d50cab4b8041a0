//! The fixed-size byte buffer and its field accessors.

use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use snafu::ResultExt;

use crate::error::{Error, LayoutSnafu};
use crate::field::Field;
use crate::layout::{FieldLayout, Validate};
use crate::mode::{Checked, Mode};
use crate::view::{BitView, BitViewMut};
use crate::word::Word;

/// A zero-initialized buffer of `BYTES` bytes overlaid with typed bit fields.
///
/// Fields are accessed through views. A field is described by its first bit, its width in bits
/// (its extent), and its value type `T`. The accessors with const parameters validate the
/// description at build time:
///
/// ```
/// use bitstruct::Bitstruct;
///
/// let mut bits = Bitstruct::<2>::new();
/// bits.view_mut::<0, 4, u8>().set(12);
/// bits.view_mut::<15, 1, bool>().set(true);
///
/// assert_eq!(bits.as_bytes(), &[0x0c, 0x80]);
/// assert_eq!(bits.view::<0, 4, u8>().get(), 12);
/// assert!(bits.view::<15, 1, bool>().get());
/// ```
///
/// An invalid description is a build error, not a runtime failure:
///
/// ```compile_fail
/// use bitstruct::Bitstruct;
///
/// let bits = Bitstruct::<2>::new();
/// // Bits 12..20 run past the end of a 16-bit buffer.
/// bits.view::<12, 8, u8>().get();
/// ```
///
/// The mode `M` decides what [`BitViewMut::set`] does with values that are too wide for their
/// field. See [`Mode`].
#[repr(transparent)]
pub struct Bitstruct<const BYTES: usize, M: Mode = Checked> {
    bytes: [u8; BYTES],
    _mode: PhantomData<M>,
}

impl<const BYTES: usize, M: Mode> Bitstruct<BYTES, M> {
    /// The buffer's length in bits.
    pub const BITS: usize = BYTES * 8;

    /// Creates a buffer with every bit zero.
    pub const fn new() -> Self {
        Self::from_bytes([0; BYTES])
    }

    /// Creates a buffer holding the given bytes.
    pub const fn from_bytes(bytes: [u8; BYTES]) -> Self {
        Self {
            bytes,
            _mode: PhantomData,
        }
    }

    /// Unwraps the buffer's bytes.
    pub const fn into_bytes(self) -> [u8; BYTES] {
        self.bytes
    }

    /// Returns the buffer's bytes.
    pub const fn as_bytes(&self) -> &[u8; BYTES] {
        &self.bytes
    }

    /// Returns the buffer's bytes for writing.
    ///
    /// Writes through this reference bypass field checks entirely.
    pub fn as_bytes_mut(&mut self) -> &mut [u8; BYTES] {
        &mut self.bytes
    }

    /// Returns a raw pointer to the first byte.
    pub const fn as_ptr(&self) -> *const u8 {
        self.bytes.as_slice().as_ptr()
    }

    /// Returns a raw mutable pointer to the first byte.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.bytes.as_mut_ptr()
    }

    /// The buffer's size in bytes.
    pub const fn size(&self) -> usize {
        BYTES
    }

    /// Whether the buffer has no bytes.
    pub const fn is_empty(&self) -> bool {
        BYTES == 0
    }

    /// Reinterprets the same bytes under another mode.
    pub const fn with_mode<N: Mode>(self) -> Bitstruct<BYTES, N> {
        Bitstruct::from_bytes(self.bytes)
    }

    /// Returns a read-only view of the `EXTENT`-bit field of type `T` starting at bit `BIT`.
    ///
    /// The field is accessed through `T`'s own [`Word`](Field::Word). An invalid field is a build
    /// error.
    pub fn view<const BIT: usize, const EXTENT: usize, T: Field>(&self) -> BitView<'_, T> {
        self.view_in::<T::Word, BIT, EXTENT, T>()
    }

    /// Returns a mutable view of the `EXTENT`-bit field of type `T` starting at bit `BIT`.
    ///
    /// The field is accessed through `T`'s own [`Word`](Field::Word). An invalid field is a build
    /// error.
    pub fn view_mut<const BIT: usize, const EXTENT: usize, T: Field>(
        &mut self,
    ) -> BitViewMut<'_, T, M> {
        self.view_in_mut::<T::Word, BIT, EXTENT, T>()
    }

    /// Like [`view`](Self::view), but accesses the field through the word `W`.
    ///
    /// A wider word lets a narrow value type straddle a byte boundary:
    ///
    /// ```
    /// use bitstruct::Bitstruct;
    ///
    /// let bits = Bitstruct::<2>::from_bytes([0xc0, 0x03]);
    /// assert_eq!(bits.view_in::<u16, 6, 4, u8>().get(), 0b1111);
    /// ```
    pub fn view_in<W: Word, const BIT: usize, const EXTENT: usize, T: Field>(
        &self,
    ) -> BitView<'_, T, W> {
        let () = Validate::<BYTES, BIT, EXTENT, T, W>::OK;
        let layout = FieldLayout::new(BIT, EXTENT);
        BitView::new(self.word_bytes::<W>(layout), layout.begin(), EXTENT)
    }

    /// Like [`view_mut`](Self::view_mut), but accesses the field through the word `W`.
    pub fn view_in_mut<W: Word, const BIT: usize, const EXTENT: usize, T: Field>(
        &mut self,
    ) -> BitViewMut<'_, T, M, W> {
        let () = Validate::<BYTES, BIT, EXTENT, T, W>::OK;
        let layout = FieldLayout::new(BIT, EXTENT);
        BitViewMut::new(self.word_bytes_mut::<W>(layout), layout.begin(), EXTENT)
    }

    /// Returns a read-only view of a field described at runtime.
    ///
    /// The layout is validated the same way the const accessors validate theirs, but failures are
    /// reported as [`Error::Layout`].
    ///
    /// ```
    /// use bitstruct::{Bitstruct, Error, FieldLayout, LayoutError};
    ///
    /// let bits = Bitstruct::<4>::from_bytes([0, 0, 0x34, 0x12]);
    /// assert_eq!(bits.view_at::<u16>(FieldLayout::new(16, 16))?.get(), 0x1234);
    /// assert!(matches!(
    ///     bits.view_at::<u16>(FieldLayout::new(8, 16)),
    ///     Err(Error::Layout { source: LayoutError::Misaligned { byte: 1, align: 2 } }),
    /// ));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn view_at<T: Field>(&self, layout: FieldLayout) -> Result<BitView<'_, T>, Error> {
        self.view_at_in::<T::Word, T>(layout)
    }

    /// Returns a mutable view of a field described at runtime.
    ///
    /// See [`view_at`](Self::view_at).
    pub fn view_at_mut<T: Field>(
        &mut self,
        layout: FieldLayout,
    ) -> Result<BitViewMut<'_, T, M>, Error> {
        self.view_at_in_mut::<T::Word, T>(layout)
    }

    /// Like [`view_at`](Self::view_at), but accesses the field through the word `W`.
    pub fn view_at_in<W: Word, T: Field>(
        &self,
        layout: FieldLayout,
    ) -> Result<BitView<'_, T, W>, Error> {
        Self::check::<T, W>(layout)?;
        Ok(BitView::new(
            self.word_bytes::<W>(layout),
            layout.begin(),
            layout.extent(),
        ))
    }

    /// Like [`view_at_mut`](Self::view_at_mut), but accesses the field through the word `W`.
    pub fn view_at_in_mut<W: Word, T: Field>(
        &mut self,
        layout: FieldLayout,
    ) -> Result<BitViewMut<'_, T, M, W>, Error> {
        Self::check::<T, W>(layout)?;
        Ok(BitViewMut::new(
            self.word_bytes_mut::<W>(layout),
            layout.begin(),
            layout.extent(),
        ))
    }

    fn check<T: Field, W: Word>(layout: FieldLayout) -> Result<(), Error> {
        layout
            .check::<T, W>(BYTES)
            .map_err(|e| {
                tracing::debug!(
                    bit = layout.bit(),
                    extent = layout.extent(),
                    buffer_bytes = BYTES,
                    error = %e,
                    "rejected field layout"
                );
                e
            })
            .context(LayoutSnafu)
    }

    fn word_bytes<W: Word>(&self, layout: FieldLayout) -> &[u8] {
        &self.bytes[layout.byte()..layout.byte() + W::BYTES]
    }

    fn word_bytes_mut<W: Word>(&mut self, layout: FieldLayout) -> &mut [u8] {
        &mut self.bytes[layout.byte()..layout.byte() + W::BYTES]
    }
}

impl<const BYTES: usize, M: Mode> Clone for Bitstruct<BYTES, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<const BYTES: usize, M: Mode> Copy for Bitstruct<BYTES, M> {}

impl<const BYTES: usize, M: Mode> Default for Bitstruct<BYTES, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BYTES: usize, M: Mode> PartialEq for Bitstruct<BYTES, M> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<const BYTES: usize, M: Mode> Eq for Bitstruct<BYTES, M> {}

impl<const BYTES: usize, M: Mode> Hash for Bitstruct<BYTES, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl<const BYTES: usize, M: Mode> Debug for Bitstruct<BYTES, M> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("Bitstruct").field(&self.bytes).finish()
    }
}

impl<const BYTES: usize, M: Mode> From<[u8; BYTES]> for Bitstruct<BYTES, M> {
    fn from(bytes: [u8; BYTES]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<const BYTES: usize, M: Mode> From<Bitstruct<BYTES, M>> for [u8; BYTES] {
    fn from(value: Bitstruct<BYTES, M>) -> Self {
        value.into_bytes()
    }
}

impl<const BYTES: usize, M: Mode> AsRef<[u8]> for Bitstruct<BYTES, M> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const BYTES: usize, M: Mode> AsMut<[u8]> for Bitstruct<BYTES, M> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}
