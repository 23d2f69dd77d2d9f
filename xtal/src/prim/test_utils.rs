use indexmap::IndexMap;

use crate::{Lattice, Matrix3, Vector3D, DoFSetBasis};
use super::Prim;

pub fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|&name| name.to_owned()).collect()
}

pub fn test_prim(name: &str) -> Prim {
    match name {
        "simple_cubic_binary" => simple_cubic_binary(),
        "FCC_binary_GLstrain_disp" => binary_glstrain_disp(fcc_lattice()),
        "BCC_binary_GLstrain_disp" => binary_glstrain_disp(bcc_lattice()),
        _ => panic!("unknown test prim {}", name)
    }
}

/// Conventional tetragonal lattice, with `c = 2a`
pub fn tetragonal_lattice() -> Lattice {
    Lattice::new(Matrix3::new([
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 2.0],
    ])).unwrap()
}

fn fcc_lattice() -> Lattice {
    Lattice::from_vectors(
        Vector3D::new(0.0, 0.5, 0.5),
        Vector3D::new(0.5, 0.0, 0.5),
        Vector3D::new(0.5, 0.5, 0.0),
    ).unwrap()
}

fn bcc_lattice() -> Lattice {
    Lattice::from_vectors(
        Vector3D::new(-0.5, 0.5, 0.5),
        Vector3D::new(0.5, -0.5, 0.5),
        Vector3D::new(0.5, 0.5, -0.5),
    ).unwrap()
}

/// A/B binary alloy on a simple cubic lattice, without continuous DoF
fn simple_cubic_binary() -> Prim {
    Prim::new(
        Lattice::cubic(1.0).unwrap(),
        vec![Vector3D::zero()],
        vec![names(&["A", "B"])],
        vec![vec![]],
        vec![],
        IndexMap::new(),
    ).unwrap()
}

/// A/B binary alloy with atomic displacement on the single basis site, and
/// Green-Lagrange strain of the cell
fn binary_glstrain_disp(lattice: Lattice) -> Prim {
    Prim::new(
        lattice,
        vec![Vector3D::zero()],
        vec![names(&["A", "B"])],
        vec![vec![DoFSetBasis::new("disp").unwrap()]],
        vec![DoFSetBasis::new("GLstrain").unwrap()],
        IndexMap::new(),
    ).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn lattices() {
        let tetragonal = tetragonal_lattice();
        assert_eq!(tetragonal.lengths(), [1.0, 1.0, 2.0]);
        assert_eq!(tetragonal.volume(), 2.0);

        assert_relative_eq!(fcc_lattice().volume(), 0.25);
        assert_relative_eq!(bcc_lattice().volume(), 0.5);
    }
}
