//! The primitive cell ([`Prim`]) of a crystal, with the occupants and
//! continuous degrees of freedom attached to its basis sites.

mod occupant;
pub use self::occupant::{Occupant, AtomComponent, is_vacancy};

mod options;
pub use self::options::{PrimOptions, UnresolvedOccupantPolicy};

#[allow(clippy::module_inception)]
mod prim;
pub use self::prim::Prim;

mod input;
pub use self::input::{PrimInput, DoFSetInput};

#[cfg(test)]
pub(crate) mod test_utils;
