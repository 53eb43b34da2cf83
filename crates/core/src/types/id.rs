//! Newtype ids for clients and cases.
//!
//! Ids are assigned by the storage backend and never reused, so a plain `i64`
//! (SQLite's `INTEGER PRIMARY KEY`) is wrapped per entity to keep a
//! [`ClientId`] from being passed where a [`CaseId`] is expected.

/// Defines a type-safe id wrapper around `i64`.
///
/// The generated type is `Copy`, ordered, hashable, and serialises as a bare
/// number (`#[serde(transparent)]`).
///
/// # Example
///
/// ```rust
/// # use avukat_ajanda_core::define_id;
/// define_id!(HearingId);
///
/// let id = HearingId::new(7);
/// assert_eq!(id.as_i64(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The underlying `i64` value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ClientId);
define_id!(CaseId);
