use indexmap::IndexMap;
use ndarray::Array2;

use crate::{Error, Lattice, Matrix3, Vector3D};
use crate::dof::{DoFRegistry, DoFSetBasis};

use super::{Occupant, Prim, PrimOptions};

/// A continuous DoF, as given in a [`PrimInput`]
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DoFSetInput {
    /// Name of the DoF type, e.g. `disp` or `GLstrain`
    pub dof: String,
    /// Basis vectors, one per entry, expressed in the standard components of
    /// the DoF type. The standard basis is used if this is missing.
    #[serde(default)]
    pub basis: Option<Vec<Vec<f64>>>,
    /// Names of the basis vectors. They are named after their index if this
    /// is missing.
    #[serde(default)]
    pub axis_names: Option<Vec<String>>,
}

impl DoFSetInput {
    /// Create the corresponding [`DoFSetBasis`], looking up the DoF type in
    /// `registry`
    pub fn build(&self, registry: &DoFRegistry) -> Result<DoFSetBasis, Error> {
        let basis = match &self.basis {
            Some(vectors) => Some(basis_from_vectors(&self.dof, vectors)?),
            None => None,
        };

        return DoFSetBasis::with_registry(registry, &self.dof, basis, self.axis_names.clone());
    }
}

/// Put the basis `vectors` as columns of a matrix
fn basis_from_vectors(name: &str, vectors: &[Vec<f64>]) -> Result<Array2<f64>, Error> {
    let n_rows = vectors.first().map_or(0, |vector| vector.len());
    for vector in vectors {
        if vector.len() != n_rows {
            return Err(Error::DimensionMismatch(format!(
                "all the basis vectors for '{}' must have the same size", name
            )));
        }
    }

    return Ok(Array2::from_shape_fn((n_rows, vectors.len()), |(i, j)| vectors[j][i]));
}

/// Structured description of all the inputs to [`Prim`] construction, which
/// can be read from JSON.
///
/// ```
/// # use xtal::{PrimInput, PrimOptions};
/// let input = PrimInput::from_json(r#"{
///     "lattice_vectors": [[0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]],
///     "coordinate_frac": [[0.0, 0.0, 0.0]],
///     "occ_dof": [["A", "B"]],
///     "local_dof": [[{"dof": "disp"}]],
///     "global_dof": [{"dof": "GLstrain"}]
/// }"#).unwrap();
///
/// let prim = input.build(&PrimOptions::default()).unwrap();
/// assert_eq!(prim.global_dof()[0].dimension(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PrimInput {
    /// The three lattice vectors, one per entry
    pub lattice_vectors: [[f64; 3]; 3],
    /// Fractional coordinates of the basis sites
    pub coordinate_frac: Vec<[f64; 3]>,
    /// Names of the allowed occupants for each basis site
    pub occ_dof: Vec<Vec<String>>,
    /// Continuous DoF for each basis site. An empty list means that no site
    /// has local DoF.
    #[serde(default)]
    pub local_dof: Vec<Vec<DoFSetInput>>,
    /// Continuous DoF for the whole cell
    #[serde(default)]
    pub global_dof: Vec<DoFSetInput>,
    /// Definitions of the occupants, by name
    #[serde(default)]
    pub occupants: IndexMap<String, Occupant>,
}

impl PrimInput {
    /// Parse a `PrimInput` from a JSON string
    pub fn from_json(json: &str) -> Result<PrimInput, Error> {
        return Ok(serde_json::from_str(json)?);
    }

    /// Create the corresponding [`Prim`], using the standard DoF registry
    pub fn build(&self, options: &PrimOptions) -> Result<Prim, Error> {
        self.build_with_registry(options, DoFRegistry::standard())
    }

    /// Create the corresponding [`Prim`], using `registry` to look up DoF
    /// types.
    ///
    /// The lattice is created first, so an invalid lattice is always
    /// reported before any other problem with the input.
    pub fn build_with_registry(&self, options: &PrimOptions, registry: &DoFRegistry) -> Result<Prim, Error> {
        options.validate()?;

        let [a, b, c] = self.lattice_vectors;
        let lattice = Lattice::with_tolerance(
            Matrix3::from_columns(Vector3D::from(a), Vector3D::from(b), Vector3D::from(c)),
            options.tolerance,
        )?;

        let local_dof = if self.local_dof.is_empty() {
            vec![Vec::new(); self.coordinate_frac.len()]
        } else {
            self.local_dof.iter()
                .map(|site| site.iter().map(|dof| dof.build(registry)).collect())
                .collect::<Result<Vec<Vec<_>>, Error>>()?
        };

        let global_dof = self.global_dof.iter()
            .map(|dof| dof.build(registry))
            .collect::<Result<Vec<_>, Error>>()?;

        return Prim::with_options(
            lattice,
            self.coordinate_frac.iter().map(|&f| Vector3D::from(f)).collect(),
            self.occ_dof.clone(),
            local_dof,
            global_dof,
            self.occupants.clone(),
            options,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DoFType;

    fn fcc_input() -> PrimInput {
        PrimInput {
            lattice_vectors: [[0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]],
            coordinate_frac: vec![[0.0, 0.0, 0.0]],
            occ_dof: vec![vec!["A".into(), "B".into()]],
            local_dof: vec![vec![DoFSetInput { dof: "disp".into(), basis: None, axis_names: None }]],
            global_dof: vec![DoFSetInput { dof: "GLstrain".into(), basis: None, axis_names: None }],
            occupants: IndexMap::new(),
        }
    }

    #[test]
    fn build() {
        let prim = fcc_input().build(&PrimOptions::default()).unwrap();
        assert_eq!(prim.basis_site_count(), 1);
        assert_eq!(prim.local_dof(0)[0].dof_type(), DoFType::Displacement);
        assert_eq!(prim.global_dof()[0].dof_type(), DoFType::GreenLagrangeStrain);
        assert_eq!(prim.lattice().vector(2), Vector3D::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn custom_basis() {
        let mut input = fcc_input();
        input.local_dof[0][0].basis = Some(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
        input.local_dof[0][0].axis_names = Some(vec!["dx".into(), "dy".into()]);

        let prim = input.build(&PrimOptions::default()).unwrap();
        let disp = &prim.local_dof(0)[0];
        assert_eq!(disp.dimension(), 2);
        assert_eq!(disp.basis()[[1, 1]], 1.0);
        assert_eq!(disp.basis()[[2, 0]], 0.0);
        assert_eq!(disp.axis_names(), ["dx", "dy"]);

        input.local_dof[0][0].basis = Some(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0]]);
        let result = input.build(&PrimOptions::default());
        assert!(matches!(result, Err(Error::DimensionMismatch(_))));

        input.local_dof[0][0].basis = Some(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        input.local_dof[0][0].axis_names = None;
        let result = input.build(&PrimOptions::default());
        assert!(matches!(result, Err(Error::DimensionMismatch(_))));
    }

    #[test]
    fn lattice_is_checked_first() {
        let mut input = fcc_input();
        input.lattice_vectors = [[1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        input.coordinate_frac = vec![];
        input.global_dof[0].dof = "not a dof".into();

        let result = input.build(&PrimOptions::default());
        assert!(matches!(result, Err(Error::InvalidLattice(_))));
    }

    #[test]
    fn no_local_dof() {
        let mut input = fcc_input();
        input.coordinate_frac.push([0.5, 0.5, 0.5]);
        input.occ_dof.push(vec!["A".into()]);
        input.local_dof = vec![];

        let prim = input.build(&PrimOptions::default()).unwrap();
        assert_eq!(prim.all_local_dof().len(), 2);
        assert!(prim.local_dof(1).is_empty());

        // other lengths must match the number of sites
        input.local_dof = vec![vec![]];
        let result = input.build(&PrimOptions::default());
        assert!(matches!(result, Err(Error::DimensionMismatch(_))));
    }

    #[test]
    fn registry() {
        let registry = DoFRegistry::only(&[DoFType::Displacement]);
        let result = fcc_input().build_with_registry(&PrimOptions::default(), &registry);
        assert!(matches!(result, Err(Error::UnknownDoFType(name)) if name == "GLstrain"));
    }

    #[test]
    fn json() {
        let input = PrimInput::from_json(r#"{
            "lattice_vectors": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            "coordinate_frac": [[0.0, 0.0, 0.0]],
            "occ_dof": [["A", "B"]],
            "occupants": {
                "A": {"chemical_name": "A", "atoms": [{"name": "A"}]}
            }
        }"#).unwrap();

        assert!(input.local_dof.is_empty());
        assert!(input.global_dof.is_empty());
        assert_eq!(input.occupants.len(), 1);

        let prim = input.build(&PrimOptions::default()).unwrap();
        assert_eq!(prim.occupants().len(), 2);

        let round_trip = serde_json::to_string(&input).unwrap();
        assert_eq!(PrimInput::from_json(&round_trip).unwrap(), input);

        let result = PrimInput::from_json(r#"{"lattice": []}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
