//! Newtype IDs for backend records.
//!
//! The bakery API uses integer primary keys for every resource. Wrapping them
//! keeps a product id from being passed where an order id is expected.

/// Define a type-safe wrapper around an `i64` record id.
///
/// The generated type is `Copy`, hashable, ordered, serializes transparently
/// and parses from a decimal string (used for `?selected=1,2,3` query values).
///
/// # Example
///
/// ```rust
/// # use bakehouse_core::define_id;
/// define_id!(RecipeId);
///
/// let id: RecipeId = "42".parse().unwrap();
/// assert_eq!(id.as_i64(), 42);
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
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
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

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
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

define_id!(ProductId);
define_id!(CategoryId);
define_id!(OrderId);
define_id!(CustomerId);
define_id!(BlogId);
define_id!(NotificationId);
define_id!(CartId);
define_id!(CartItemId);
define_id!(VariantId);
define_id!(AddressId);
