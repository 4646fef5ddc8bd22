// build.rs

use glob::glob;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A grid fixture discovered under `tests/data/`.
#[derive(Debug)]
struct GridFixture {
    pub name: String,
    pub path: PathBuf,
}

/// Collects every `*.txt` file in `tests/data/`, named after its file stem.
fn get_all_fixtures() -> Vec<GridFixture> {
    glob("tests/data/*.txt")
        .expect("Failed to read glob pattern")
        .filter_map(Result::ok)
        .filter_map(|path| {
            let name = path
                .file_stem()?
                .to_string_lossy()
                .replace(|c: char| !c.is_ascii_alphanumeric(), "_")
                .to_lowercase();
            Some(GridFixture { name, path })
        })
        .collect()
}

fn main() {
    println!("cargo:rerun-if-changed=tests/data");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("grid_fixture_tests.rs");
    let mut file = BufWriter::new(File::create(&dest_path).unwrap());

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();

    // One `#[test]` per fixture so a bad file is reported by name.
    for fixture in get_all_fixtures() {
        let path = Path::new(&manifest_dir).join(&fixture.path);
        writeln!(
            file,
            r#"
#[test]
fn fixture_{name}() -> anyhow::Result<()> {{
    run_fixture_test("{name}", "{path}")
}}
"#,
            name = fixture.name,
            path = path.to_str().unwrap().escape_default(),
        )
        .unwrap();
    }
}
