macro_rules! enum_accessors {
    ($bind:ident $(($variant:ident($ty:ty) $get:ident $unwrap:ident $cvt:expr))*) => ($(
        /// Attempt to access the underlying value of this reference, returning
        /// `None` if it is not the correct kind.
        #[inline]
        pub fn $get(&self) -> Option<$ty> {
            if let Self::$variant($bind) = self {
                Some($cvt)
            } else {
                None
            }
        }

        /// Returns the underlying value of this reference, panicking if it's the
        /// wrong kind.
        ///
        /// # Panics
        ///
        /// Panics if `self` is not of the right kind.
        #[inline]
        pub fn $unwrap(&self) -> $ty {
            self.$get().expect(concat!("expected ", stringify!($ty)))
        }
    )*)
}

pub(crate) use enum_accessors;
