//! Geometry of the crystal: the [`Lattice`] spanning the periodic cell and
//! the [`Coordinate`] of points inside it.

/// Default tolerance for geometric comparisons, in fractional units for
/// coordinates and as a relative measure for lattice degeneracy.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

mod lattice;
pub use self::lattice::{Lattice, IntegerMatrix3};

mod coordinate;
pub use self::coordinate::Coordinate;
