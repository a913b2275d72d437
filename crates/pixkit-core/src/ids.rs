//! Process-wide sequential identifiers.
//!
//! Every id type draws from its own monotonically increasing counter. Ids
//! are never reused or reset, so two distinct values never compare equal.

/// Declares a `Copy` id newtype backed by a static atomic counter.
#[macro_export]
macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Allocates a fresh id.
            pub fn next() -> Self {
                static COUNTER: ::std::sync::atomic::AtomicU64 =
                    ::std::sync::atomic::AtomicU64::new(1);
                Self(COUNTER.fetch_add(1, ::std::sync::atomic::Ordering::Relaxed))
            }

            /// The raw counter value.
            pub const fn raw(self) -> u64 {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

sequential_id!(
    /// Identity of an animation frame.
    FrameId
);

sequential_id!(
    /// Identity of a vector object.
    ObjectId
);
