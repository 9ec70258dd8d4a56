//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every board object is addressed by a dense index into the `Vec` that owns
//! it.  The wrappers are `Copy + Ord + Hash` so they slot into sets and map
//! keys directly; `BTreeSet<ParcelId>` gives node parcel lists a stable
//! iteration order.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id for `Vec` index `i`, or `None` if `i` does not fit below
            /// the `INVALID` sentinel.
            #[inline]
            pub fn from_index(i: usize) -> Option<$name> {
                <$inner>::try_from(i).ok().filter(|&n| n != <$inner>::MAX).map($name)
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a board node.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of an undirected board edge.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index of a truck in the session's fleet.
    pub struct TruckId(u32);
}

typed_id! {
    /// Index of a parcel in the board's parcel table.
    pub struct ParcelId(u32);
}
