use indexmap::IndexMap;

use xtal::{DoFSetBasis, Lattice, Prim, PrimInput, PrimOptions, Vector3D};

use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn fcc_binary(c: &mut Criterion) {
    let mut group = c.benchmark_group("FCC binary prim");
    group.noise_threshold(0.05);

    let lattice = Lattice::from_vectors(
        Vector3D::new(0.0, 0.5, 0.5),
        Vector3D::new(0.5, 0.0, 0.5),
        Vector3D::new(0.5, 0.5, 0.0),
    ).unwrap();
    let disp = DoFSetBasis::new("disp").unwrap();
    let strain = DoFSetBasis::new("GLstrain").unwrap();

    group.bench_function("Prim::new", |b| b.iter(|| {
        Prim::new(
            black_box(lattice),
            vec![Vector3D::zero()],
            vec![vec!["A".into(), "B".into()]],
            vec![vec![disp.clone()]],
            vec![strain.clone()],
            IndexMap::new(),
        ).unwrap()
    }));

    let input = PrimInput::from_json(r#"{
        "lattice_vectors": [[0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]],
        "coordinate_frac": [[0.0, 0.0, 0.0]],
        "occ_dof": [["A", "B"]],
        "local_dof": [[{"dof": "disp"}]],
        "global_dof": [{"dof": "GLstrain"}]
    }"#).unwrap();
    let options = PrimOptions::default();

    group.bench_function("PrimInput::build", |b| b.iter(|| {
        black_box(&input).build(&options).unwrap()
    }));
}

fn many_sites(c: &mut Criterion) {
    let mut group = c.benchmark_group("prim with many sites");
    group.noise_threshold(0.05);

    for &n_per_side in black_box(&[2, 3, 4]) {
        let size = n_per_side as f64;
        let lattice = Lattice::cubic(size).unwrap();

        let mut coordinates = Vec::new();
        for i in 0..n_per_side {
            for j in 0..n_per_side {
                for k in 0..n_per_side {
                    coordinates.push(Vector3D::new(i as f64, j as f64, k as f64) / size);
                }
            }
        }
        let n_sites = coordinates.len();
        let disp = DoFSetBasis::new("disp").unwrap();

        group.bench_function(format!("n_sites = {}", n_sites), |b| b.iter(|| {
            Prim::new(
                lattice,
                coordinates.clone(),
                vec![vec!["A".into(), "B".into(), "Va".into()]; n_sites],
                vec![vec![disp.clone()]; n_sites],
                vec![],
                IndexMap::new(),
            ).unwrap()
        }));
    }
}

criterion_group!(prim, fcc_binary, many_sites);
criterion_main!(prim);
