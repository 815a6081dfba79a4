//! Build script to generate the level manifest for WASM builds
//!
//! Scans assets/levels/ and writes manifest.txt listing every level file,
//! since WASM can't enumerate directories at runtime.

use std::fs;
use std::io::Write;
use std::path::Path;

fn is_level_file(name: &str) -> bool {
    name.ends_with(".ron") || name.ends_with(".ron.br")
}

fn main() {
    println!("cargo:rerun-if-changed=assets/levels");

    let levels_dir = Path::new("assets/levels");
    let manifest_path = levels_dir.join("manifest.txt");

    let mut manifest = String::new();

    if levels_dir.exists() {
        let mut levels: Vec<String> = fs::read_dir(levels_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| is_level_file(name))
            .collect();

        levels.sort();

        for name in levels {
            manifest.push_str(&name);
            manifest.push('\n');
        }

        let mut file = fs::File::create(manifest_path).unwrap();
        file.write_all(manifest.as_bytes()).unwrap();
    }
}
