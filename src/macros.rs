//! Macros for reducing boilerplate in identifier types.
//!
//! Provides `world_id!`, which defines a newtype over the host's integer
//! identifiers with the derivations needed for map keys and ordered sets.
//!
//! # Examples
//!
//! ```rust
//! use minecart_loading::world_id;
//!
//! world_id! {
//!     /// Example identifier
//!     pub struct CrateId;
//! }
//!
//! assert_eq!(CrateId::from(4).into_inner(), 4);
//! ```
/// Defines a newtype identifier over the host's `i32` ids.
#[macro_export]
macro_rules! world_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
        )]
        $vis struct $name(pub i32);

        impl $name {
            /// Returns the raw host identifier.
            #[must_use]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl ::core::convert::From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}
