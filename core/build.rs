use std::collections::HashSet;
use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const KNOWN_KINDS: &[(&str, &str)] = &[
    ("section", "BlockKind::Section"),
    ("image", "BlockKind::Image"),
    ("divider", "BlockKind::Divider"),
];

#[derive(Deserialize)]
struct CatalogFile {
    blocks: Vec<PaletteEntry>,
}

#[derive(Deserialize)]
struct PaletteEntry {
    kind: String,
    name: String,
    icon: Option<String>,
    description: Option<String>,
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let catalog_path = manifest_dir
        .parent()
        .unwrap_or(&manifest_dir)
        .join("palette/catalog.toml");
    println!("cargo:rerun-if-changed={}", catalog_path.display());

    let contents = fs::read_to_string(&catalog_path).unwrap_or_else(|err| {
        panic!(
            "failed to read palette catalog at {}: {err}",
            catalog_path.display()
        )
    });

    let catalog: CatalogFile = toml::from_str(&contents).unwrap_or_else(|err| {
        panic!(
            "failed to parse palette catalog at {}: {err}",
            catalog_path.display()
        )
    });

    if catalog.blocks.is_empty() {
        panic!("palette catalog {} has no entries", catalog_path.display());
    }

    validate_entries(&catalog.blocks, &catalog_path);

    let mut output = String::new();
    writeln!(&mut output, "pub const PALETTE: &[PaletteEntry] = &[").unwrap();
    for entry in &catalog.blocks {
        writeln!(&mut output, "    PaletteEntry {{").unwrap();
        writeln!(&mut output, "        kind: {},", kind_path(&entry.kind)).unwrap();
        writeln!(&mut output, "        name: {},", rust_string(entry.name.trim())).unwrap();
        writeln!(
            &mut output,
            "        icon: {},",
            rust_string(entry.icon.as_deref().unwrap_or(""))
        )
        .unwrap();
        writeln!(
            &mut output,
            "        description: {},",
            rust_string(entry.description.as_deref().unwrap_or(""))
        )
        .unwrap();
        writeln!(&mut output, "    }},").unwrap();
    }
    writeln!(&mut output, "];").unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("palette_catalog.rs");
    fs::write(&out_path, output).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", out_path.display())
    });
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

fn kind_path(kind: &str) -> &'static str {
    KNOWN_KINDS
        .iter()
        .find(|(tag, _)| *tag == kind.trim())
        .map(|(_, path)| *path)
        .unwrap_or_else(|| panic!("unknown block kind '{kind}'"))
}

fn validate_entries(entries: &[PaletteEntry], catalog_path: &Path) {
    let mut kinds = HashSet::new();

    for entry in entries {
        let kind = entry.kind.trim();
        if !KNOWN_KINDS.iter().any(|(tag, _)| *tag == kind) {
            panic!(
                "palette entry '{}' has unknown kind in {}",
                entry.kind,
                catalog_path.display()
            );
        }
        if entry.name.trim().is_empty() {
            panic!(
                "palette entry '{}' has an empty name in {}",
                kind,
                catalog_path.display()
            );
        }
        if !kinds.insert(kind.to_string()) {
            panic!(
                "duplicate palette kind '{}' in {}",
                kind,
                catalog_path.display()
            );
        }
    }
}
