/// Declares structs of named bit fields over a [`Bitstruct`](crate::Bitstruct).
///
/// Each struct gives its total length in bits, which must be a multiple of 8. Each field gives its
/// first bit, its extent, an optional value type (default [`u8`]), and an optional access
/// specifier, `ro` or `rw` (default `rw`).
///
/// ```
/// use bitstruct::prelude::*;
///
/// bitstruct! {
///     /// A status register.
///     pub struct Status: 16 {
///         /// Number of pending requests.
///         pub pending(0, 5),
///         /// Set by hardware on error.
///         pub error(5, 1) as bool = ro,
///         /// Number of completed transfers.
///         pub count(8, 8) = rw,
///     }
/// }
///
/// let mut status = Status::<Checked>::new();
/// status.pending_mut().set(17);
/// status.count_mut().set(64);
/// assert_eq!(status.as_bytes(), &[17, 64]);
/// assert_eq!(status.pending().get(), 17);
/// assert!(!status.error().get());
/// ```
///
/// Each field `name` generates a method `name(&self)` returning a [`BitView`](crate::BitView).
/// Unless the field is `ro`, it also generates `name_mut(&mut self)` returning a
/// [`BitViewMut`](crate::BitViewMut). A read-only field has no way to be written:
///
/// ```compile_fail
/// use bitstruct::prelude::*;
///
/// bitstruct! {
///     struct Status: 8 {
///         error(0, 1) as bool = ro,
///     }
/// }
///
/// let mut status = Status::<Checked>::new();
/// status.error_mut().set(true);
/// ```
///
/// The generated struct is generic over a [`Mode`](crate::Mode) that defaults to
/// [`Checked`](crate::Checked). It dereferences to its [`Bitstruct`](crate::Bitstruct) and
/// converts to and from it.
///
/// Field accessors are inherent methods, so a field named like a [`Bitstruct`](crate::Bitstruct)
/// method (`size`, `as_bytes`, `view`, ...) hides that method on the generated struct. The hidden
/// method remains reachable through the buffer:
///
/// ```
/// use bitstruct::prelude::*;
///
/// bitstruct! {
///     struct Frame: 16 {
///         size(0, 8),
///     }
/// }
///
/// let mut frame = Frame::<Checked>::new();
/// frame.size_mut().set(3);
/// assert_eq!(frame.size().get(), 3);
/// assert_eq!((*frame).size(), 2);
/// ```
///
/// Every field is validated when the declaration is compiled, whether or not its accessors are
/// ever called:
///
/// ```compile_fail
/// use bitstruct::prelude::*;
///
/// bitstruct! {
///     struct Packet: 32 {
///         // A `u16` may only start at an even byte.
///         length(8, 16) as u16,
///     }
/// }
/// ```
///
/// ```compile_fail
/// use bitstruct::prelude::*;
///
/// bitstruct! {
///     struct Odd: 12 {
///         low(0, 4),
///     }
/// }
/// ```
///
/// See [`doc::example`](crate::doc::example) for the items generated by a complete declaration.
#[macro_export]
macro_rules! bitstruct {
    // Top-level matcher.
    (
        $(
            $(#[$attr:meta])*
            $vis:vis struct $name:ident: $bits:literal { $($body:tt)* }
        )*
    ) => {
        $(
            $crate::bitstruct! {
                @struct
                $(#[$attr])*
                $vis struct $name: $bits { $($body)* }
            }
        )*
    };

    // One struct and its fields.
    (
        @struct
        $(#[$attr:meta])*
        $vis:vis struct $name:ident: $bits:literal {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field:ident($bit:expr, $extent:expr)
                $(as $ty:ty)?
                $(= $access:ident)?
            ),*
            $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        $vis struct $name<M: $crate::Mode = $crate::Checked>($crate::Bitstruct<{ $bits / 8 }, M>);

        const _: () = ::core::assert!($bits % 8 == 0, "bit length must be a multiple of 8");

        $(
            $crate::bitstruct! { @check $bits ($bit, $extent) ($($ty)?) }
        )*

        impl<M: $crate::Mode> $name<M> {
            /// Creates a value with every bit zero.
            pub const fn new() -> Self {
                Self($crate::Bitstruct::new())
            }

            /// Wraps a buffer.
            pub const fn from_bitstruct(bits: $crate::Bitstruct<{ $bits / 8 }, M>) -> Self {
                Self(bits)
            }

            /// Unwraps the buffer.
            pub const fn into_bitstruct(self) -> $crate::Bitstruct<{ $bits / 8 }, M> {
                self.0
            }

            $(
                $crate::bitstruct! {
                    @field
                    [$(#[$field_attr])*]
                    $field_vis $field($bit, $extent)
                    ($($ty)?)
                    $($access)?
                }
            )*
        }

        impl<M: $crate::Mode> ::core::ops::Deref for $name<M> {
            type Target = $crate::Bitstruct<{ $bits / 8 }, M>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<M: $crate::Mode> ::core::ops::DerefMut for $name<M> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl<M: $crate::Mode> ::core::convert::From<$crate::Bitstruct<{ $bits / 8 }, M>>
            for $name<M>
        {
            fn from(bits: $crate::Bitstruct<{ $bits / 8 }, M>) -> Self {
                Self(bits)
            }
        }

        impl<M: $crate::Mode> ::core::convert::From<$name<M>>
            for $crate::Bitstruct<{ $bits / 8 }, M>
        {
            fn from(value: $name<M>) -> Self {
                value.0
            }
        }
    };

    // Build-time layout check for one field.
    (@check $bits:literal ($bit:expr, $extent:expr) ()) => {
        $crate::bitstruct! { @check $bits ($bit, $extent) (::core::primitive::u8) }
    };
    (@check $bits:literal ($bit:expr, $extent:expr) ($ty:ty)) => {
        const _: () = $crate::FieldLayout::new($bit, $extent)
            .assert_valid::<$ty, <$ty as $crate::Field>::Word>($bits / 8);
    };

    // Fill in the default value type and access specifier.
    (@field [$($attr:tt)*] $vis:vis $field:ident($bit:expr, $extent:expr) () $($access:ident)?) => {
        $crate::bitstruct! {
            @field [$($attr)*] $vis $field($bit, $extent) (::core::primitive::u8) $($access)?
        }
    };
    (@field [$($attr:tt)*] $vis:vis $field:ident($bit:expr, $extent:expr) ($ty:ty)) => {
        $crate::bitstruct! { @field [$($attr)*] $vis $field($bit, $extent) ($ty) rw }
    };

    // Dispatch on access specifiers.
    (@field [$($attr:tt)*] $vis:vis $field:ident($bit:expr, $extent:expr) ($ty:ty) ro) => {
        $crate::bitstruct! { @read [$($attr)*] $vis $field($bit, $extent) $ty }
    };
    (@field [$($attr:tt)*] $vis:vis $field:ident($bit:expr, $extent:expr) ($ty:ty) rw) => {
        $crate::bitstruct! { @read [$($attr)*] $vis $field($bit, $extent) $ty }
        $crate::bitstruct! { @write $vis $field($bit, $extent) $ty }
    };

    // Read accessor.
    (@read [$($attr:tt)*] $vis:vis $field:ident($bit:expr, $extent:expr) $ty:ty) => {
        $($attr)*
        #[inline]
        $vis fn $field(&self) -> $crate::BitView<'_, $ty> {
            self.0.view::<{ $bit }, { $extent }, $ty>()
        }
    };

    // Write accessor.
    (@write $vis:vis $field:ident($bit:expr, $extent:expr) $ty:ty) => {
        $crate::__private::paste! {
            #[doc = "Returns a mutable view of [`" $field "`](Self::" $field ")."]
            #[inline]
            $vis fn [<$field _mut>](&mut self) -> $crate::BitViewMut<'_, $ty, M> {
                self.0.view_mut::<{ $bit }, { $extent }, $ty>()
            }
        }
    };
}
