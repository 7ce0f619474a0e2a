//! Swatch Builder
//!
//! Writes the solid color swatch for one catalog entry to disk as `<name>.png`.
//! Same pixels the server returns from `/api/color/{name}/image`.
//!
//! Usage:
//!   cargo run --bin swatch_build -- \
//!       --colors colors.json \
//!       --name goldenrod \
//!       --out-dir target/swatches
//!
//! Pass `--all` instead of `--name` to write every name in the catalog; for a
//! duplicated name the first entry wins, as it does for lookups.

use std::{collections::HashSet, fs, path::{Component, Path, PathBuf}};
use anyhow::Context;
use clap::Parser;
use color_server::{render::{encode_png, render_swatch, swatch_file_name}, Catalog, ColorRecord};

#[derive(Parser, Debug)]
#[command(about="Render color catalog swatches to PNG files", version)]
struct Args {
    #[arg(long, default_value = "colors.json")] colors: PathBuf,
    #[arg(long, required_unless_present = "all")] name: Option<String>,
    #[arg(long, conflicts_with = "name")] all: bool,
    #[arg(long, default_value = ".")] out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let catalog = Catalog::load(&args.colors).with_context(|| format!("load {}", args.colors.display()))?;
    fs::create_dir_all(&args.out_dir).with_context(|| format!("create {}", args.out_dir.display()))?;

    let targets: Vec<&ColorRecord> = match &args.name {
        Some(name) => vec![catalog.find_by_name(name).ok_or_else(|| anyhow::anyhow!("color {name:?} not in catalog"))?],
        None => first_of_each_name(&catalog),
    };
    for color in targets {
        let path = write_swatch(color, &args.out_dir)?;
        println!("Wrote {} ({}, {})", path.display(), color.name, color.hex_code);
    }
    Ok(())
}

/// One record per name, the one lookups resolve to.
fn first_of_each_name(catalog: &Catalog) -> Vec<&ColorRecord> {
    let mut seen = HashSet::new();
    catalog.iter().filter(|c| seen.insert(c.name.as_str())).collect()
}

fn write_swatch(color: &ColorRecord, out_dir: &Path) -> anyhow::Result<PathBuf> {
    let file_name = swatch_file_name(color);
    // The name must stay a single file inside out_dir.
    let mut components = Path::new(&file_name).components();
    if !matches!((components.next(), components.next()), (Some(Component::Normal(_)), None)) {
        anyhow::bail!("color name {:?} is not usable as a file name", color.name);
    }
    let path = out_dir.join(file_name);
    let bytes = encode_png(&render_swatch(&color.rgb))?;
    fs::write(&path, bytes).with_context(|| format!("write {:?}", path))?;
    Ok(path)
}
