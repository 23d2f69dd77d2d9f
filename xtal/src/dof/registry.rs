use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::Error;

/// All the DoF types known to this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DoFType {
    /// Occupation of a site by one of a discrete set of occupants
    Occupation,
    /// Atomic displacement
    Displacement,
    /// Collinear magnetic spin
    CollinearMagspin,
    /// Collinear magnetic spin, constrained to unit length
    CollinearUnitMagspin,
    /// Non-collinear magnetic spin, without spin-orbit coupling
    NonCollinearMagspin,
    /// Non-collinear magnetic spin, without spin-orbit coupling, constrained
    /// to unit length
    NonCollinearUnitMagspin,
    /// Non-collinear magnetic spin, with spin-orbit coupling
    SpinOrbitMagspin,
    /// Non-collinear magnetic spin, with spin-orbit coupling, constrained to
    /// unit length
    SpinOrbitUnitMagspin,
    /// Green-Lagrange strain metric
    GreenLagrangeStrain,
    /// Euler-Almansi strain metric
    EulerAlmansiStrain,
    /// Hencky (logarithmic) strain metric
    HenckyStrain,
    /// Right stretch tensor `U` minus identity
    RightStretchStrain,
    /// Biot strain metric
    BiotStrain,
}

impl DoFType {
    /// All the DoF types, in a fixed order
    pub const ALL: [DoFType; 13] = [
        DoFType::Occupation,
        DoFType::Displacement,
        DoFType::CollinearMagspin,
        DoFType::CollinearUnitMagspin,
        DoFType::NonCollinearMagspin,
        DoFType::NonCollinearUnitMagspin,
        DoFType::SpinOrbitMagspin,
        DoFType::SpinOrbitUnitMagspin,
        DoFType::GreenLagrangeStrain,
        DoFType::EulerAlmansiStrain,
        DoFType::HenckyStrain,
        DoFType::RightStretchStrain,
        DoFType::BiotStrain,
    ];

    /// Get the name used to refer to this DoF type
    pub fn name(&self) -> &'static str {
        match self {
            DoFType::Occupation => "occ",
            DoFType::Displacement => "disp",
            DoFType::CollinearMagspin => "Cmagspin",
            DoFType::CollinearUnitMagspin => "Cunitmagspin",
            DoFType::NonCollinearMagspin => "NCmagspin",
            DoFType::NonCollinearUnitMagspin => "NCunitmagspin",
            DoFType::SpinOrbitMagspin => "SOmagspin",
            DoFType::SpinOrbitUnitMagspin => "SOunitmagspin",
            DoFType::GreenLagrangeStrain => "GLstrain",
            DoFType::EulerAlmansiStrain => "EAstrain",
            DoFType::HenckyStrain => "Hstrain",
            DoFType::RightStretchStrain => "Ustrain",
            DoFType::BiotStrain => "Bstrain",
        }
    }

    /// Get the standard description of this DoF type
    fn standard_info(self) -> DoFTypeInfo {
        let (locality, components): (Locality, &[&str]) = match self {
            DoFType::Occupation => (Locality::Discrete, &[]),
            DoFType::Displacement => (Locality::Local, &["dx", "dy", "dz"]),
            DoFType::CollinearMagspin |
            DoFType::CollinearUnitMagspin => (Locality::Local, &["sz"]),
            DoFType::NonCollinearMagspin |
            DoFType::NonCollinearUnitMagspin |
            DoFType::SpinOrbitMagspin |
            DoFType::SpinOrbitUnitMagspin => (Locality::Local, &["sx", "sy", "sz"]),
            DoFType::GreenLagrangeStrain => (Locality::Global, &GREEN_LAGRANGE_COMPONENTS),
            DoFType::EulerAlmansiStrain => (Locality::Global, &EULER_ALMANSI_COMPONENTS),
            DoFType::HenckyStrain => (Locality::Global, &HENCKY_COMPONENTS),
            DoFType::RightStretchStrain => (Locality::Global, &RIGHT_STRETCH_COMPONENTS),
            DoFType::BiotStrain => (Locality::Global, &BIOT_COMPONENTS),
        };

        let dimension = match locality {
            Locality::Discrete => None,
            Locality::Local | Locality::Global => Some(components.len()),
        };

        DoFTypeInfo {
            dof_type: self,
            dimension: dimension,
            locality: locality,
            components: components.iter().map(|&c| c.to_owned()).collect(),
        }
    }
}

// Names of the six independent components of the symmetric strain tensors,
// in Voigt order. Shear components carry a `sqrt(2)` factor so that the
// vector norm matches the tensor norm.
const GREEN_LAGRANGE_COMPONENTS: [&str; 6] = ["Exx", "Eyy", "Ezz", "sqrt(2)Eyz", "sqrt(2)Exz", "sqrt(2)Exy"];
const EULER_ALMANSI_COMPONENTS: [&str; 6] = ["exx", "eyy", "ezz", "sqrt(2)eyz", "sqrt(2)exz", "sqrt(2)exy"];
const HENCKY_COMPONENTS: [&str; 6] = ["Hxx", "Hyy", "Hzz", "sqrt(2)Hyz", "sqrt(2)Hxz", "sqrt(2)Hxy"];
const RIGHT_STRETCH_COMPONENTS: [&str; 6] = ["Uxx", "Uyy", "Uzz", "sqrt(2)Uyz", "sqrt(2)Uxz", "sqrt(2)Uxy"];
const BIOT_COMPONENTS: [&str; 6] = ["Bxx", "Byy", "Bzz", "sqrt(2)Byz", "sqrt(2)Bxz", "sqrt(2)Bxy"];

impl std::fmt::Display for DoFType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DoFType {
    type Err = Error;

    fn from_str(name: &str) -> Result<DoFType, Error> {
        DoFType::ALL.iter()
            .find(|dof_type| dof_type.name() == name)
            .copied()
            .ok_or_else(|| Error::UnknownDoFType(name.into()))
    }
}

/// Where a DoF type can be used in a prim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locality {
    /// Discrete DoF, handled through the list of allowed occupants
    Discrete,
    /// Continuous DoF with one value per basis site
    Local,
    /// Continuous DoF with a single value for the whole cell
    Global,
}

/// Description of a DoF type: standard dimension, where it can be used, and
/// the names of the standard components.
#[derive(Debug, Clone, PartialEq)]
pub struct DoFTypeInfo {
    /// The DoF type being described
    pub dof_type: DoFType,
    /// Number of components in the standard basis, `None` for discrete DoF
    pub dimension: Option<usize>,
    /// Where this DoF type can be used
    pub locality: Locality,
    /// Names of the components of the standard basis
    pub components: Vec<String>,
}

static STANDARD_REGISTRY: Lazy<DoFRegistry> = Lazy::new(|| {
    DoFRegistry::with_types(DoFType::ALL.iter().map(|dof_type| dof_type.standard_info()))
});

/// A read-only table of the DoF types that can be used, with their standard
/// dimensions.
///
/// [`DoFRegistry::standard`] contains all the [`DoFType`]; a restricted
/// registry can be created with [`DoFRegistry::only`] and given explicitly
/// wherever a registry is used.
#[derive(Debug, Clone)]
pub struct DoFRegistry {
    types: BTreeMap<DoFType, DoFTypeInfo>,
}

impl DoFRegistry {
    /// Get the registry containing all the standard DoF types. It is created
    /// on first use and never modified afterwards.
    pub fn standard() -> &'static DoFRegistry {
        &STANDARD_REGISTRY
    }

    /// Create a registry with the standard description of the given DoF
    /// types only
    pub fn only(types: &[DoFType]) -> DoFRegistry {
        DoFRegistry::with_types(types.iter().map(|dof_type| dof_type.standard_info()))
    }

    fn with_types(infos: impl IntoIterator<Item = DoFTypeInfo>) -> DoFRegistry {
        DoFRegistry {
            types: infos.into_iter().map(|info| (info.dof_type, info)).collect(),
        }
    }

    /// Get the description of a DoF type, if it is registered
    pub fn get(&self, dof_type: DoFType) -> Option<&DoFTypeInfo> {
        self.types.get(&dof_type)
    }

    /// Get the description of the DoF type with the given `name`, failing
    /// with `Error::UnknownDoFType` if this name is not registered
    pub fn lookup(&self, name: &str) -> Result<&DoFTypeInfo, Error> {
        let dof_type = name.parse::<DoFType>()?;
        return self.get(dof_type).ok_or_else(|| Error::UnknownDoFType(name.into()));
    }

    /// Iterate over the registered DoF types
    pub fn iter(&self) -> impl Iterator<Item = &DoFTypeInfo> {
        self.types.values()
    }

    /// Get the number of registered DoF types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if this registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
