//! Identifier newtypes for users, lists, and items.
//!
//! All three are opaque strings. An empty id means "not yet assigned" —
//! the store fills it in on first save and it is immutable afterwards.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new id from any string-like input.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the id has not been assigned yet.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", &self.0)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifier of a user owning lists.
    ///
    /// The library never sees credentials; callers resolve whatever bearer
    /// token they use into a `UserId` before invoking the service.
    UserId
);

string_id!(
    /// Identifier of a [`List`](crate::list::List), assigned by the store on first save.
    ListId
);

string_id!(
    /// Identifier of an [`Item`](crate::list::Item) within a list, assigned by the store.
    ItemId
);
