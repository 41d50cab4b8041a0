//! An overview of `bitstruct` concepts and terms.
//!
//! # Buffers
//!
//! A [`Bitstruct<BYTES, M>`](crate::Bitstruct) owns `BYTES` bytes, initially all zero. Its bytes
//! are the only state; everything else is computed on access. The raw bytes are always available
//! through [`as_bytes`](crate::Bitstruct::as_bytes) and friends for bulk I/O.
//!
//! # Fields
//!
//! A field is a range of bits holding a value of some [`Field`](crate::Field) type. It is
//! described by three things:
//!
//! - Its first bit within the buffer. Bit `i` is bit `i % 8` of byte `i / 8`.
//! - Its extent, the number of bits it spans.
//! - Its value type, such as [`u8`], [`bool`], `*const T`, or a user-defined enumeration.
//!
//! Fields are unnamed until a [`bitstruct!`](crate::bitstruct) declaration names them. Undeclared
//! fields are accessed by giving their description as const parameters, for example
//! [`view::<4, 2, u8>()`](crate::Bitstruct::view), or as a runtime
//! [`FieldLayout`](crate::FieldLayout).
//!
//! # Words
//!
//! Every access loads one unsigned [`Word`](crate::Word) from the buffer, starting at the byte that
//! holds the field's first bit. Reads shift and mask the field out of the word. Writes clear the
//! field's bits in the word, merge in the new value, and store the word back. Words are always
//! loaded and stored in little-endian order, so a field's position never depends on the target or
//! on the width of the word used to reach it.
//!
//! By default the word is as wide as the value type. A wider word can be named explicitly with
//! [`view_in`](crate::Bitstruct::view_in) so that a narrow field may cross a byte boundary.
//!
//! # Validation
//!
//! A field is valid when all of the following hold, checked in this order:
//!
//! 1. Its extent is at least one bit.
//! 2. Its value type is no larger than the buffer.
//! 3. Its bits lie within the buffer.
//! 4. Its byte offset is a multiple of the value type's alignment.
//! 5. Its extent is no wider than its value type, nor than the value type's own word.
//! 6. It fits in its word.
//! 7. Its word lies within the buffer.
//!
//! Fields described by const parameters or declared with [`bitstruct!`](crate::bitstruct) are
//! checked while the program is compiled, and a violation is a build error. Fields described by a
//! runtime [`FieldLayout`](crate::FieldLayout) are checked on access, and a violation is reported
//! as a [`LayoutError`](crate::LayoutError).
//!
//! # Views
//!
//! A [`BitView`](crate::BitView) borrows a field's word for reading. A
//! [`BitViewMut`](crate::BitViewMut) borrows it exclusively for reading and writing. A shared
//! borrow of a buffer can only produce `BitView`s, and fields declared `ro` only ever produce
//! `BitView`s, so writing to them is a compile error rather than a runtime failure.
//!
//! Views of disjoint fields never share bits. Views of overlapping fields share storage, and the
//! borrow checker prevents writing through one while another is alive.
//!
//! # Modes
//!
//! Each buffer carries a [`Mode`](crate::Mode) in its type. In [`Checked`](crate::Checked) mode,
//! [`BitViewMut::set`](crate::BitViewMut::set) panics before modifying anything when the value's
//! bit pattern is wider than the field. In [`Unchecked`](crate::Unchecked) mode it silently keeps
//! the low bits. [`try_set`](crate::BitViewMut::try_set) and
//! [`set_masked`](crate::BitViewMut::set_masked) pick a behavior regardless of mode.
//!
//! # Pointer Fields
//!
//! A pointer field stores an address in as few bits as its extent, a common trick for packing a
//! tag next to a pointer. Reading zero-extends the stored bits back to a full address. Writing an
//! address that does not fit is an out-of-range write like any other: it panics in checked mode and
//! loses the high bits in unchecked mode.
