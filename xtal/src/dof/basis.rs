use std::collections::BTreeSet;

use ndarray::Array2;

use crate::Error;
use crate::math::column_rank;

use super::{DoFRegistry, DoFType, DoFTypeInfo, Locality};

/// Relative tolerance used to decide if the basis vectors are linearly
/// independent
const RANK_TOLERANCE: f64 = 1e-8;

/// A continuous degree of freedom type, together with the basis in which its
/// values are expressed.
///
/// The basis is a matrix of shape `(standard_dimension, dimension)`, where each
/// column is a basis vector expressed in the standard components of the DoF
/// type. A basis with fewer columns than rows is valid, and restricts the DoF
/// to a subspace of the standard space.
///
/// ```
/// # use xtal::DoFSetBasis;
/// # use ndarray::array;
/// let disp = DoFSetBasis::new("disp").unwrap();
/// assert_eq!(disp.dimension(), 3);
/// assert_eq!(disp.axis_names(), ["0", "1", "2"]);
///
/// // displacement restricted to the xy plane
/// let planar = DoFSetBasis::with_basis(
///     "disp",
///     Some(array![[1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]),
///     Some(vec!["x".into(), "y".into()]),
/// ).unwrap();
/// assert_eq!(planar.standard_dimension(), 3);
/// assert_eq!(planar.dimension(), 2);
/// assert_ne!(disp, planar);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DoFSetBasis {
    info: DoFTypeInfo,
    basis: Array2<f64>,
    axis_names: Vec<String>,
}

impl DoFSetBasis {
    /// Create a DoF set of the type with the given `name`, using the standard
    /// basis
    pub fn new(name: &str) -> Result<DoFSetBasis, Error> {
        DoFSetBasis::with_basis(name, None, None)
    }

    /// Create a DoF set of the type with the given `name`, using a custom
    /// `basis` and `axis_names` if they are given. The standard basis is used
    /// when `basis` is `None`, and axis are named after their index when
    /// `axis_names` is `None`.
    pub fn with_basis(
        name: &str,
        basis: Option<Array2<f64>>,
        axis_names: Option<Vec<String>>,
    ) -> Result<DoFSetBasis, Error> {
        DoFSetBasis::with_registry(DoFRegistry::standard(), name, basis, axis_names)
    }

    /// Same as [`DoFSetBasis::with_basis`], looking up the DoF type in the
    /// given `registry` instead of the standard one.
    pub fn with_registry(
        registry: &DoFRegistry,
        name: &str,
        basis: Option<Array2<f64>>,
        axis_names: Option<Vec<String>>,
    ) -> Result<DoFSetBasis, Error> {
        let info = registry.lookup(name)?;
        let standard_dimension = match info.dimension {
            Some(dimension) => dimension,
            None => {
                return Err(Error::InvalidParameter(format!(
                    "'{}' is a discrete DoF, use the list of occupants to define it", name
                )));
            }
        };

        let basis = match basis {
            Some(basis) => {
                check_basis(name, &basis, standard_dimension)?;
                basis
            }
            None => Array2::<f64>::eye(standard_dimension),
        };

        let axis_names = match axis_names {
            Some(axis_names) => {
                check_axis_names(name, &axis_names, basis.ncols())?;
                axis_names
            }
            None => (0..basis.ncols()).map(|i| i.to_string()).collect(),
        };

        return Ok(DoFSetBasis {
            info: info.clone(),
            basis: basis,
            axis_names: axis_names,
        });
    }

    /// Get the type of this DoF
    pub fn dof_type(&self) -> DoFType {
        self.info.dof_type
    }

    /// Get the name of the type of this DoF
    pub fn name(&self) -> &'static str {
        self.info.dof_type.name()
    }

    /// Get where this DoF can be used in a prim
    pub fn locality(&self) -> Locality {
        self.info.locality
    }

    /// Get the dimension of the standard basis for this DoF type
    pub fn standard_dimension(&self) -> usize {
        self.basis.nrows()
    }

    /// Get the dimension of the chosen basis, i.e. the number of basis
    /// vectors
    pub fn dimension(&self) -> usize {
        self.basis.ncols()
    }

    /// Get the basis vectors, as the columns of a
    /// `(standard_dimension, dimension)` matrix
    pub fn basis(&self) -> &Array2<f64> {
        &self.basis
    }

    /// Get the names of the axis of the chosen basis
    pub fn axis_names(&self) -> &[String] {
        &self.axis_names
    }

    /// Get the names of the components of the standard basis
    pub fn standard_components(&self) -> &[String] {
        &self.info.components
    }

    /// Check if the chosen basis is the standard one
    pub fn is_standard_basis(&self) -> bool {
        self.basis == Array2::<f64>::eye(self.standard_dimension())
    }
}

fn check_basis(name: &str, basis: &Array2<f64>, standard_dimension: usize) -> Result<(), Error> {
    if basis.nrows() != standard_dimension {
        return Err(Error::DimensionMismatch(format!(
            "the basis for '{}' must have {} rows, got {}",
            name, standard_dimension, basis.nrows()
        )));
    }

    if basis.ncols() == 0 {
        return Err(Error::DimensionMismatch(format!(
            "the basis for '{}' must contain at least one vector", name
        )));
    }

    if !basis.iter().all(|v| v.is_finite()) {
        return Err(Error::InvalidParameter(format!(
            "the basis for '{}' contains non-finite values", name
        )));
    }

    // over-complete bases (more vectors than rows) are allowed
    if basis.ncols() <= basis.nrows() && column_rank(basis.view(), RANK_TOLERANCE) != basis.ncols() {
        return Err(Error::InvalidParameter(format!(
            "the basis vectors for '{}' are not linearly independent", name
        )));
    }

    return Ok(());
}

fn check_axis_names(name: &str, axis_names: &[String], dimension: usize) -> Result<(), Error> {
    if axis_names.len() != dimension {
        return Err(Error::DimensionMismatch(format!(
            "expected {} axis names for '{}', got {}",
            dimension, name, axis_names.len()
        )));
    }

    let mut seen = BTreeSet::new();
    for axis in axis_names {
        if !seen.insert(axis) {
            return Err(Error::InvalidParameter(format!(
                "axis name '{}' is used more than once for '{}'", axis, name
            )));
        }
    }

    return Ok(());
}
