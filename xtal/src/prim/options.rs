use crate::Error;
use crate::crystal::DEFAULT_TOLERANCE;

/// What to do with occupant names used in a prim without a matching
/// [`Occupant`](super::Occupant) definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub enum UnresolvedOccupantPolicy {
    /// Register the missing occupant with a default definition: a vacancy for
    /// vacancy names, and a single atom otherwise
    #[default]
    Register,
    /// Fail the prim construction with `Error::UnresolvedOccupant`
    Reject,
}

/// Options controlling the construction of a [`Prim`](super::Prim)
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PrimOptions {
    /// How to handle occupant names without a definition
    #[serde(default)]
    pub unresolved_occupants: UnresolvedOccupantPolicy,
    /// Wrap the basis sites inside the unit cell, i.e. bring all fractional
    /// coordinates in `[0, 1)`
    #[serde(default)]
    pub wrap_coordinates: bool,
    /// Tolerance for geometric comparisons: lattice degeneracy, coordinates
    /// wrapping, and detection of overlapping basis sites
    #[serde(default = "serde_default_tolerance")]
    pub tolerance: f64,
}

fn serde_default_tolerance() -> f64 { DEFAULT_TOLERANCE }

impl Default for PrimOptions {
    fn default() -> PrimOptions {
        PrimOptions {
            unresolved_occupants: UnresolvedOccupantPolicy::default(),
            wrap_coordinates: false,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl PrimOptions {
    /// Parse options from a JSON string, and validate them
    pub fn from_json(json: &str) -> Result<PrimOptions, Error> {
        let options: PrimOptions = serde_json::from_str(json)?;
        options.validate()?;
        return Ok(options);
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected positive tolerance for prim construction, got {}", self.tolerance
            )));
        }

        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = PrimOptions::from_json("{}").unwrap();
        assert_eq!(options, PrimOptions::default());
        assert_eq!(options.unresolved_occupants, UnresolvedOccupantPolicy::Register);
        assert!(!options.wrap_coordinates);
        assert_eq!(options.tolerance, 1e-5);
    }

    #[test]
    fn parse() {
        let options = PrimOptions::from_json(r#"{
            "unresolved_occupants": "Reject",
            "wrap_coordinates": true,
            "tolerance": 1e-3
        }"#).unwrap();

        assert_eq!(options.unresolved_occupants, UnresolvedOccupantPolicy::Reject);
        assert!(options.wrap_coordinates);
        assert_eq!(options.tolerance, 1e-3);
    }

    #[test]
    fn invalid() {
        let result = PrimOptions::from_json(r#"{"tolerance": -1.0}"#);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));

        let result = PrimOptions::from_json(r#"{"wrap": true}"#);
        assert!(matches!(result, Err(Error::Json(_))));

        let result = PrimOptions::from_json(r#"{"unresolved_occupants": "Ignore"}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
