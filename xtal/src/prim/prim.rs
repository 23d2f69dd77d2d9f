use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::{Error, Lattice, Coordinate, Vector3D};
use crate::dof::{DoFSetBasis, DoFType, Locality};

use super::{Occupant, PrimOptions, UnresolvedOccupantPolicy};
use super::occupant::is_vacancy;

/// The primitive cell description of a crystal: a lattice, the basis sites
/// inside it, and the degrees of freedom (DoF) attached to these sites and
/// to the whole cell.
///
/// A `Prim` can only be created through [`Prim::new`] or
/// [`Prim::with_options`], which check that all the parts are consistent
/// with each other. There is no way to modify a `Prim` afterwards, so a
/// `Prim` is always valid and can be shared freely between threads.
///
/// ```
/// # use xtal::{Prim, Lattice, Vector3D};
/// # use indexmap::IndexMap;
/// let prim = Prim::new(
///     Lattice::cubic(1.0).unwrap(),
///     vec![Vector3D::zero()],
///     vec![vec!["A".into(), "B".into()]],
///     vec![vec![]],
///     vec![],
///     IndexMap::new(),
/// ).unwrap();
///
/// assert_eq!(prim.basis_site_count(), 1);
/// assert_eq!(prim.occ_dof(0), ["A", "B"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Prim {
    lattice: Lattice,
    basis: Vec<Coordinate>,
    occ_dof: Vec<Vec<String>>,
    local_dof: Vec<Vec<DoFSetBasis>>,
    global_dof: Vec<DoFSetBasis>,
    occupants: IndexMap<String, Occupant>,
}

impl Prim {
    /// Create a new prim with the default [`PrimOptions`]. See
    /// [`Prim::with_options`] for the meaning of the parameters.
    pub fn new(
        lattice: Lattice,
        coordinate_frac: Vec<Vector3D>,
        occ_dof: Vec<Vec<String>>,
        local_dof: Vec<Vec<DoFSetBasis>>,
        global_dof: Vec<DoFSetBasis>,
        occupants: IndexMap<String, Occupant>,
    ) -> Result<Prim, Error> {
        Prim::with_options(lattice, coordinate_frac, occ_dof, local_dof, global_dof, occupants, &PrimOptions::default())
    }

    /// Create a new prim, checking that all the inputs are consistent.
    ///
    /// - `lattice` spans the primitive cell;
    /// - `coordinate_frac` contains the fractional coordinates of the basis
    ///   sites in this lattice;
    /// - `occ_dof[i]` lists the names of the allowed occupants on site `i`;
    /// - `local_dof[i]` contains the continuous DoF of site `i`;
    /// - `global_dof` contains the continuous DoF of the whole cell;
    /// - `occupants` contains the definitions of occupants. Names used in
    ///   `occ_dof` without a definition here are handled according to
    ///   `options.unresolved_occupants`.
    ///
    /// The checks run in a fixed order, and the first failing one is
    /// reported. When the error concerns a single site, it carries the index
    /// of this site (see [`Error::site`]).
    #[allow(clippy::needless_pass_by_value)]
    pub fn with_options(
        lattice: Lattice,
        coordinate_frac: Vec<Vector3D>,
        occ_dof: Vec<Vec<String>>,
        local_dof: Vec<Vec<DoFSetBasis>>,
        global_dof: Vec<DoFSetBasis>,
        mut occupants: IndexMap<String, Occupant>,
        options: &PrimOptions,
    ) -> Result<Prim, Error> {
        options.validate()?;

        // a `Lattice` can not be degenerate, so there is nothing left to
        // check about it here

        let n_sites = coordinate_frac.len();
        if n_sites == 0 {
            return Err(Error::EmptyPrim);
        }

        for (site, fractional) in coordinate_frac.iter().enumerate() {
            if !fractional.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "the coordinates of basis site {} are not finite", site
                )));
            }
        }

        if occ_dof.len() != n_sites {
            return Err(Error::DimensionMismatch(format!(
                "expected {} occupant lists (one per basis site), got {}",
                n_sites, occ_dof.len()
            )));
        }

        if local_dof.len() != n_sites {
            return Err(Error::DimensionMismatch(format!(
                "expected {} local DoF lists (one per basis site), got {}",
                n_sites, local_dof.len()
            )));
        }

        let uses_occupation = occ_dof.iter().any(|occupants| !occupants.is_empty());
        for (site, (names, dofs)) in occ_dof.iter().zip(&local_dof).enumerate() {
            check_site_occupants(site, names, uses_occupation)?;
            check_site_dof(site, dofs)?;
        }

        check_global_dof(&global_dof)?;

        for (site, names) in occ_dof.iter().enumerate() {
            for name in names {
                if occupants.contains_key(name) {
                    continue;
                }

                match options.unresolved_occupants {
                    UnresolvedOccupantPolicy::Register => {
                        info!("registering default definition for occupant '{}'", name);
                        occupants.insert(name.clone(), Occupant::default_for(name));
                    }
                    UnresolvedOccupantPolicy::Reject => {
                        return Err(Error::UnresolvedOccupant {
                            site: site,
                            name: name.clone(),
                        });
                    }
                }
            }
        }

        let mut basis = Vec::with_capacity(n_sites);
        for (site, &fractional) in coordinate_frac.iter().enumerate() {
            let mut coordinate = Coordinate::from_fractional(fractional, &lattice);
            if options.wrap_coordinates {
                let wrapped = coordinate.wrapped_with_tolerance(&lattice, options.tolerance);
                if wrapped != coordinate {
                    info!(
                        "wrapped basis site {} from {:?} to {:?} (fractional)",
                        site, coordinate.fractional(), wrapped.fractional()
                    );
                }
                coordinate = wrapped;
            }
            basis.push(coordinate);
        }

        for i in 0..n_sites {
            for j in (i + 1)..n_sites {
                let distance = basis[i].min_periodic_distance(&basis[j], &lattice);
                if distance < options.tolerance {
                    warn!(
                        "basis sites {} and {} overlap (distance is {:e})", i, j, distance
                    );
                }
            }
        }

        debug!(
            "created prim with {} basis sites, {} occupants and {} global DoF",
            n_sites, occupants.len(), global_dof.len()
        );

        return Ok(Prim {
            lattice: lattice,
            basis: basis,
            occ_dof: occ_dof,
            local_dof: local_dof,
            global_dof: global_dof,
            occupants: occupants,
        });
    }

    /// Get the lattice of this prim
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Get the number of basis sites in this prim
    pub fn basis_site_count(&self) -> usize {
        self.basis.len()
    }

    /// Get the coordinates of all basis sites
    pub fn basis(&self) -> &[Coordinate] {
        &self.basis
    }

    /// Get the coordinate of the basis site at index `site`.
    ///
    /// # Panics
    ///
    /// If `site` is out of bounds.
    pub fn coordinate(&self, site: usize) -> &Coordinate {
        &self.basis[site]
    }

    /// Get the Cartesian coordinates of all basis sites
    pub fn coordinate_cart(&self) -> Vec<Vector3D> {
        self.basis.iter().map(|c| c.cartesian()).collect()
    }

    /// Get the fractional coordinates of all basis sites
    pub fn coordinate_frac(&self) -> Vec<Vector3D> {
        self.basis.iter().map(|c| c.fractional()).collect()
    }

    /// Get the names of the occupants allowed on basis site `site`.
    ///
    /// # Panics
    ///
    /// If `site` is out of bounds.
    pub fn occ_dof(&self, site: usize) -> &[String] {
        &self.occ_dof[site]
    }

    /// Get the names of the occupants allowed on all basis sites
    pub fn all_occ_dof(&self) -> &[Vec<String>] {
        &self.occ_dof
    }

    /// Get the continuous DoF attached to the basis site `site`.
    ///
    /// # Panics
    ///
    /// If `site` is out of bounds.
    pub fn local_dof(&self, site: usize) -> &[DoFSetBasis] {
        &self.local_dof[site]
    }

    /// Get the continuous DoF attached to all basis sites
    pub fn all_local_dof(&self) -> &[Vec<DoFSetBasis>] {
        &self.local_dof
    }

    /// Get the continuous DoF attached to the whole cell
    pub fn global_dof(&self) -> &[DoFSetBasis] {
        &self.global_dof
    }

    /// Get all the occupant definitions, including the ones registered
    /// by default and the ones not used by any site
    pub fn occupants(&self) -> &IndexMap<String, Occupant> {
        &self.occupants
    }

    /// Get the definition of the occupant with the given `name`
    pub fn occupant(&self, name: &str) -> Option<&Occupant> {
        self.occupants.get(name)
    }

    /// Get the chemical names of the occupants used on the basis sites,
    /// without repetitions, in the order they first appear
    pub fn chemical_names(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut names = Vec::new();
        for name in self.occ_dof.iter().flatten() {
            let chemical_name = self.occupants.get(name).map_or(name.as_str(), |o| o.chemical_name.as_str());
            if seen.insert(chemical_name) {
                names.push(chemical_name);
            }
        }
        return names;
    }

    /// Check if the occupant with the given `name` is a vacancy. Names without
    /// a definition are checked directly against the vacancy names.
    pub fn is_vacancy(&self, name: &str) -> bool {
        match self.occupants.get(name) {
            Some(occupant) => occupant.is_vacancy(),
            None => is_vacancy(name),
        }
    }

    /// Get the types of continuous DoF used on at least one basis site
    pub fn local_dof_types(&self) -> BTreeSet<DoFType> {
        self.local_dof.iter().flatten().map(|dof| dof.dof_type()).collect()
    }

    /// Get the types of continuous DoF attached to the whole cell
    pub fn global_dof_types(&self) -> BTreeSet<DoFType> {
        self.global_dof.iter().map(|dof| dof.dof_type()).collect()
    }

    /// Check if any basis site can be occupied by more than one occupant
    pub fn has_occupation_dof(&self) -> bool {
        self.occ_dof.iter().any(|occupants| occupants.len() > 1)
    }
}

fn check_site_occupants(site: usize, names: &[String], uses_occupation: bool) -> Result<(), Error> {
    if names.is_empty() && uses_occupation {
        return Err(Error::NoOccupants { site });
    }

    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(Error::DuplicateOccupant {
                site: site,
                name: name.clone(),
            });
        }
    }

    return Ok(());
}

fn check_site_dof(site: usize, dofs: &[DoFSetBasis]) -> Result<(), Error> {
    let mut seen = BTreeSet::new();
    for dof in dofs {
        if !seen.insert(dof.dof_type()) {
            return Err(Error::DuplicateLocalDoF {
                site: site,
                name: dof.name().into(),
            });
        }

        if dof.locality() != Locality::Local {
            return Err(Error::MisplacedDoF {
                site: Some(site),
                name: dof.name().into(),
            });
        }
    }

    return Ok(());
}

fn check_global_dof(dofs: &[DoFSetBasis]) -> Result<(), Error> {
    let mut seen = BTreeSet::new();
    for dof in dofs {
        if !seen.insert(dof.dof_type()) {
            return Err(Error::DuplicateGlobalDoF {
                name: dof.name().into(),
            });
        }

        if dof.locality() != Locality::Global {
            return Err(Error::MisplacedDoF {
                site: None,
                name: dof.name().into(),
            });
        }
    }

    return Ok(());
}
