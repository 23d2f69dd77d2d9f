#![allow(dead_code)]

use xtal::{Prim, PrimInput, PrimOptions};

pub fn load_prim_input(name: &str) -> PrimInput {
    let json = std::fs::read_to_string(format!("tests/data/{}.json", name))
        .expect("failed to read input file");

    return PrimInput::from_json(&json).expect("failed to parse prim input");
}

pub fn load_prim(name: &str) -> Prim {
    load_prim_input(name)
        .build(&PrimOptions::default())
        .expect("failed to build prim")
}

pub fn all_valid_inputs() -> Vec<String> {
    let mut names = Vec::new();
    for entry in glob::glob("tests/data/*.json").expect("bad glob pattern") {
        let path = entry.expect("failed to read data directory");
        let name = path.file_stem().expect("missing file name").to_string_lossy().into_owned();
        if name == "duplicate_occupant" || name == "degenerate_lattice" {
            continue;
        }
        names.push(name);
    }
    names.sort();
    return names;
}
