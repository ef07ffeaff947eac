//! Strongly typed string identifiers.
//!
//! Vehicle and site ids come from the simulation and from site records
//! respectively, and are opaque strings.  Wrapping them keeps a `SiteId` from
//! ever being passed where a `VehicleId` is expected.
//!
//! Both wrappers implement `Borrow<str>`, so maps keyed by an id can be
//! queried with a plain `&str`.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed ID wrapper around an owned `String`.
macro_rules! string_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        /// Displays the raw id, exactly as it is written to output files.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifier of a vehicle, unique while the vehicle is live.
    pub struct VehicleId;
}

string_id! {
    /// Identifier of a cell site, unique within a run.
    pub struct SiteId;
}
