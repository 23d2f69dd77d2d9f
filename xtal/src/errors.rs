#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// The lattice vectors are degenerate, have zero length, or are not
    /// finite
    InvalidLattice(String),
    /// A prim was requested without any basis site
    EmptyPrim,
    /// Mismatched lengths between the per-site lists of a prim, or between a
    /// DoF basis and the standard dimension of its DoF type
    DimensionMismatch(String),
    /// The same occupant appears twice in the occupant list of a site
    DuplicateOccupant {
        site: usize,
        name: String,
    },
    /// The same DoF type appears twice in the local DoF of a site
    DuplicateLocalDoF {
        site: usize,
        name: String,
    },
    /// The same DoF type appears twice in the global DoF
    DuplicateGlobalDoF {
        name: String,
    },
    /// The DoF type name is not registered
    UnknownDoFType(String),
    /// An occupant name has no property definition, and auto-registration
    /// is disabled
    UnresolvedOccupant {
        site: usize,
        name: String,
    },
    /// A site has no occupant while other sites do
    NoOccupants {
        site: usize,
    },
    /// A DoF type was attached where it does not belong: a whole-cell DoF on
    /// a site (`site` is `Some`), or a per-site DoF on the whole cell (`site`
    /// is `None`)
    MisplacedDoF {
        site: Option<usize>,
        name: String,
    },
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
}

impl Error {
    /// Get the index of the basis site responsible for this error, if any
    pub fn site(&self) -> Option<usize> {
        match self {
            Error::DuplicateOccupant { site, .. } |
            Error::DuplicateLocalDoF { site, .. } |
            Error::UnresolvedOccupant { site, .. } |
            Error::NoOccupants { site } => Some(*site),
            Error::MisplacedDoF { site, .. } => *site,
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidLattice(e) => write!(f, "invalid lattice: {}", e),
            Error::EmptyPrim => write!(f, "a prim must contain at least one basis site"),
            Error::DimensionMismatch(e) => write!(f, "dimension mismatch: {}", e),
            Error::DuplicateOccupant { site, name } => {
                write!(f, "occupant '{}' is listed more than once on basis site {}", name, site)
            }
            Error::DuplicateLocalDoF { site, name } => {
                write!(f, "local DoF '{}' is listed more than once on basis site {}", name, site)
            }
            Error::DuplicateGlobalDoF { name } => {
                write!(f, "global DoF '{}' is listed more than once", name)
            }
            Error::UnknownDoFType(name) => write!(f, "unknown DoF type '{}'", name),
            Error::UnresolvedOccupant { site, name } => {
                write!(f, "occupant '{}' on basis site {} has no definition", name, site)
            }
            Error::NoOccupants { site } => {
                write!(f, "basis site {} has no allowed occupant", site)
            }
            Error::MisplacedDoF { site: Some(site), name } => {
                write!(f, "'{}' can not be used as a local DoF (on basis site {})", name, site)
            }
            Error::MisplacedDoF { site: None, name } => {
                write!(f, "'{}' can not be used as a global DoF", name)
            }
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site() {
        let error = Error::DuplicateOccupant { site: 3, name: "A".into() };
        assert_eq!(error.site(), Some(3));
        assert_eq!(error.to_string(), "occupant 'A' is listed more than once on basis site 3");

        let error = Error::MisplacedDoF { site: None, name: "disp".into() };
        assert_eq!(error.site(), None);
        assert_eq!(error.to_string(), "'disp' can not be used as a global DoF");

        assert_eq!(Error::EmptyPrim.site(), None);
        assert_eq!(Error::NoOccupants { site: 1 }.site(), Some(1));
    }

    #[test]
    fn json_source() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = Error::from(json_error);
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().starts_with("json error: "));
    }
}
