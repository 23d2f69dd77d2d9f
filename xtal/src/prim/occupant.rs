use std::collections::BTreeMap;

use crate::Vector3D;

/// Names used for vacant sites
const VACANCY_NAMES: [&str; 3] = ["Va", "VA", "va"];

/// Check if `name` is one of the names used for vacancies (`Va`, `VA` or
/// `va`)
pub fn is_vacancy(name: &str) -> bool {
    VACANCY_NAMES.contains(&name)
}

/// A single atom inside an [`Occupant`]
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AtomComponent {
    /// Name of the atom
    pub name: String,
    /// Cartesian position of the atom, relative to the basis site
    #[serde(default)]
    pub position: Vector3D,
}

/// Properties of something that can occupy a basis site: a single atom, a
/// molecule made of multiple atoms, or a vacancy.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Occupant {
    /// Chemical name of this occupant. Different occupants can share the same
    /// chemical name, for example with different orientations.
    pub chemical_name: String,
    /// Atoms making up this occupant. This is empty for vacancies.
    #[serde(default)]
    pub atoms: Vec<AtomComponent>,
    /// Additional numeric properties of this occupant, such as charge or
    /// magnetic moment
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<f64>>,
}

impl Occupant {
    /// Create an occupant made of a single atom named `name`, sitting exactly
    /// on the basis site.
    pub fn atom(name: &str) -> Occupant {
        Occupant {
            chemical_name: name.into(),
            atoms: vec![AtomComponent {
                name: name.into(),
                position: Vector3D::zero(),
            }],
            properties: BTreeMap::new(),
        }
    }

    /// Create a vacancy occupant named `name`, without any atom
    pub fn vacancy(name: &str) -> Occupant {
        Occupant {
            chemical_name: name.into(),
            atoms: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Get the record used for occupants declared by name only: a vacancy
    /// if `name` is a vacancy name, and a single atom otherwise.
    pub fn default_for(name: &str) -> Occupant {
        if is_vacancy(name) {
            Occupant::vacancy(name)
        } else {
            Occupant::atom(name)
        }
    }

    /// Check if this occupant is a vacancy
    pub fn is_vacancy(&self) -> bool {
        is_vacancy(&self.chemical_name)
    }

    /// Check if this occupant is made of a single atom
    pub fn is_atomic(&self) -> bool {
        self.atoms.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let atom = Occupant::default_for("Ni");
        assert_eq!(atom.chemical_name, "Ni");
        assert_eq!(atom.atoms.len(), 1);
        assert_eq!(atom.atoms[0].position, Vector3D::zero());
        assert!(atom.is_atomic());
        assert!(!atom.is_vacancy());

        for name in ["Va", "VA", "va"] {
            let vacancy = Occupant::default_for(name);
            assert!(vacancy.atoms.is_empty());
            assert!(vacancy.is_vacancy());
        }

        assert!(!is_vacancy("V"));
    }

    #[test]
    fn from_json() {
        let occupant: Occupant = serde_json::from_str(r#"{
            "chemical_name": "O2",
            "atoms": [
                {"name": "O", "position": [0.0, 0.0, 0.6]},
                {"name": "O", "position": [0.0, 0.0, -0.6]}
            ],
            "properties": {"charge": [-1.0]}
        }"#).unwrap();

        assert_eq!(occupant.chemical_name, "O2");
        assert_eq!(occupant.atoms[1].position, Vector3D::new(0.0, 0.0, -0.6));
        assert_eq!(occupant.properties["charge"], [-1.0]);
        assert!(!occupant.is_atomic());

        let occupant: Occupant = serde_json::from_str(r#"{"chemical_name": "Va"}"#).unwrap();
        assert!(occupant.is_vacancy());

        let result = serde_json::from_str::<Occupant>(r#"{"chemical_name": "A", "mass": 3}"#);
        assert!(result.is_err());
    }
}
