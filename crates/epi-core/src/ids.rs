//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into the SoA `Vec`s via `id.0 as usize`, but callers should
//! prefer the `.index()` helper for clarity.
//!
//! Agents and diseases are always identified by these indices — there is no
//! name-keyed registry anywhere in the simulator.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
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
    };
}

typed_id! {
    /// Index of a person in SoA storage.  Max ~4.3 billion agents — far above
    /// the hundreds-to-thousands this simulator targets.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identifier of a disease parameter bundle.  `u16` keeps the per-agent
    /// exposure-history vectors compact.
    pub struct DiseaseId(u16);
}
