//! Degrees of freedom (DoF) attached to a crystal: the registry of known DoF
//! types and their standard dimensions, and the user-chosen basis for the
//! continuous ones.

mod registry;
pub use self::registry::{DoFType, DoFTypeInfo, DoFRegistry, Locality};

mod basis;
pub use self::basis::DoFSetBasis;
