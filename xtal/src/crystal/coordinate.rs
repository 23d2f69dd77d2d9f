use approx::AbsDiffEq;

use crate::Vector3D;

use super::{Lattice, DEFAULT_TOLERANCE};

/// A point in space, known both in Cartesian coordinates and in fractional
/// coordinates relative to the lattice used to create it.
///
/// Both representations are computed once, when the coordinate is created.
/// Fractional coordinates are kept as given, they are only brought back
/// inside the unit cell by an explicit call to [`Coordinate::wrapped`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    cartesian: Vector3D,
    fractional: Vector3D,
}

impl Coordinate {
    /// Create a coordinate from its `fractional` representation in `lattice`
    pub fn from_fractional(fractional: Vector3D, lattice: &Lattice) -> Coordinate {
        Coordinate {
            cartesian: lattice.cartesian(fractional),
            fractional: fractional,
        }
    }

    /// Create a coordinate from its `cartesian` representation, and compute
    /// the fractional one relative to `lattice`
    pub fn from_cartesian(cartesian: Vector3D, lattice: &Lattice) -> Coordinate {
        Coordinate {
            cartesian: cartesian,
            fractional: lattice.fractional(cartesian),
        }
    }

    /// Get the Cartesian representation of this coordinate
    pub fn cartesian(&self) -> Vector3D {
        self.cartesian
    }

    /// Get the fractional representation of this coordinate, relative to the
    /// lattice used to create it
    pub fn fractional(&self) -> Vector3D {
        self.fractional
    }

    /// Get the fractional representation of this coordinate relative to a
    /// different `lattice`
    pub fn fractional_in(&self, lattice: &Lattice) -> Vector3D {
        lattice.fractional(self.cartesian)
    }

    /// Get the periodic image of this coordinate with all fractional
    /// components in `[0, 1)`. Components within the lattice tolerance of 1
    /// are mapped to 0.
    pub fn wrapped(&self, lattice: &Lattice) -> Coordinate {
        self.wrapped_with_tolerance(lattice, lattice.tol())
    }

    /// Same as [`Coordinate::wrapped`], mapping components within `tol` of 1
    /// to 0.
    pub fn wrapped_with_tolerance(&self, lattice: &Lattice, tol: f64) -> Coordinate {
        let fractional = self.fractional.map(|value| {
            let wrapped = value - f64::floor(value);
            if 1.0 - wrapped < tol { 0.0 } else { wrapped }
        });

        return Coordinate::from_fractional(fractional, lattice);
    }

    /// Get the Cartesian distance between this coordinate and the closest
    /// periodic image of `other` in `lattice`.
    pub fn min_periodic_distance(&self, other: &Coordinate, lattice: &Lattice) -> f64 {
        let delta = other.fractional - self.fractional;
        let delta = delta.map(|value| value - f64::round(value));

        // rounding is not enough to find the closest image in very skewed
        // cells, so check the neighboring images as well
        let mut min_distance2 = f64::INFINITY;
        for i in -1..=1 {
            for j in -1..=1 {
                for k in -1..=1 {
                    let shift = Vector3D::new(i as f64, j as f64, k as f64);
                    let distance2 = lattice.cartesian(delta + shift).norm2();
                    min_distance2 = f64::min(min_distance2, distance2);
                }
            }
        }

        return f64::sqrt(min_distance2);
    }

    /// Check if the fractional representations of `self` and `other` are the
    /// same, with each component within `tol` of the other. This does not
    /// consider periodic images.
    pub fn is_close(&self, other: &Coordinate, tol: f64) -> bool {
        self.fractional.abs_diff_eq(&other.fractional, tol)
    }
}

impl AbsDiffEq for Coordinate {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        DEFAULT_TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Coordinate, epsilon: f64) -> bool {
        self.is_close(other, epsilon)
    }
}
