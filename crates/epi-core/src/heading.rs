//! 8-way compass movement direction.
//!
//! Lives in `epi-core` (not the spatial crate) so the agent store can hold a
//! heading without depending on any field implementation.
//!
//! Orientation follows the coordinate system in [`crate::coord`]: `y` grows
//! downward, so `N` means "toward y = 0".

use std::fmt;

/// A compass heading.  Discriminant order is clockwise starting at north, so
/// `rotated(1)` always turns one compass step clockwise.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Heading {
    /// All headings in clockwise order from north.
    pub const ALL: [Heading; 8] = [
        Heading::N,
        Heading::NE,
        Heading::E,
        Heading::SE,
        Heading::S,
        Heading::SW,
        Heading::W,
        Heading::NW,
    ];

    /// Position in [`Heading::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The heading `steps` compass steps clockwise (negative: anticlockwise),
    /// wrapping around the compass.
    #[inline]
    pub fn rotated(self, steps: i8) -> Heading {
        let i = (self.index() as i8 + steps).rem_euclid(8) as usize;
        Heading::ALL[i]
    }

    /// Unit sign pattern `(dx, dy)` of this heading.  Each component is
    /// -1, 0, or +1; diagonals set both.
    #[inline]
    pub fn offsets(self) -> (i8, i8) {
        match self {
            Heading::N => (0, -1),
            Heading::NE => (1, -1),
            Heading::E => (1, 0),
            Heading::SE => (1, 1),
            Heading::S => (0, 1),
            Heading::SW => (-1, 1),
            Heading::W => (-1, 0),
            Heading::NW => (-1, -1),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Heading::N => "N",
            Heading::NE => "NE",
            Heading::E => "E",
            Heading::SE => "SE",
            Heading::S => "S",
            Heading::SW => "SW",
            Heading::W => "W",
            Heading::NW => "NW",
        };
        f.write_str(s)
    }
}
