use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use gitstamp_core::ProvenanceEntry;

fn main() {
    // Compile whatever the prebuild step baked into the embedded destination
    let embed_root = env::var("GITSTAMP_EMBED_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| workspace_root().join("resources"));
    // The binary defaults its prebuild destination to the same root
    println!("cargo:rustc-env=GITSTAMP_BUILD_EMBED_ROOT={}", embed_root.display());

    let mut missing = Vec::new();
    let mut table = String::from("pub static EMBEDDED_PROVENANCE: &[(&str, &str)] = &[\n");
    for entry in ProvenanceEntry::ALL {
        let path = embed_root.join(entry.relative_path());
        println!("cargo:rerun-if-changed={}", path.display());
        if path.is_file() {
            let path = fs::canonicalize(&path).unwrap();
            writeln!(
                table,
                "    ({:?}, include_str!({:?})),",
                entry.resource_key(),
                path.display().to_string()
            )
            .unwrap();
        } else {
            missing.push(entry.resource_key());
        }
    }
    if !missing.is_empty() {
        println!(
            "cargo:warning=no baked provenance for {} under {}; baked mode will report fallbacks",
            missing.join(", "),
            embed_root.display()
        );
    }
    table.push_str("];\n");

    let out = PathBuf::from(env::var("OUT_DIR").unwrap()).join("embedded_provenance.rs");
    fs::write(out, table).unwrap();

    println!("cargo:rerun-if-env-changed=GITSTAMP_EMBED_ROOT");
}

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}
