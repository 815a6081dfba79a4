//! Build automation and level tooling for JumpMan
//!
//! Usage:
//!   cargo xtask check-levels    # Parse and validate every level file
//!   cargo xtask pack-levels     # Write brotli-compressed .ron.br copies
//!   cargo xtask build-web       # Build the WASM viewer into dist/web

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jumpman::level::{load_level, save_level};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for JumpMan")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate every level file
    CheckLevels {
        /// Directory to scan (defaults to assets/levels)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Write a brotli-compressed .ron.br next to every plain .ron level
    PackLevels {
        /// Directory to scan (defaults to assets/levels)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Where packed files go (defaults to the scanned directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build the WASM viewer into dist/web
    BuildWeb {
        /// Show a DEV banner with the version on the page
        #[arg(long)]
        dev: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckLevels { dir } => check_levels(&dir.unwrap_or_else(default_levels_dir)),
        Commands::PackLevels { dir, out } => {
            let dir = dir.unwrap_or_else(default_levels_dir);
            let out = out.unwrap_or_else(|| dir.clone());
            pack_levels(&dir, &out)
        }
        Commands::BuildWeb { dev } => build_web(dev),
    }
}

/// Get the project root directory
fn project_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.parent().unwrap_or(manifest).to_path_buf()
}

fn default_levels_dir() -> PathBuf {
    project_root().join("assets/levels")
}

/// Level files in `dir`, sorted by name
fn level_files(dir: &Path, packed: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let matches = name.ends_with(".ron") || (packed && name.ends_with(".ron.br"));
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Fetch `url` into `dest` with curl, failing on HTTP errors
fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(Command::new("curl").args(["-fsSL", "-o"]).arg(dest).arg(url))
        .with_context(|| format!("downloading {}", url))
}

/// Copy a directory tree, creating `dst` as needed
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Load every level in `dir`; fail if any of them is broken
fn check_levels(dir: &Path) -> Result<()> {
    let files = level_files(dir, true)?;
    let mut failures = 0;

    for path in &files {
        match load_level(path) {
            Ok(level) => println!(
                "  ok    {} (key \"{}\", {} placements, goal at {})",
                path.display(),
                level.key,
                level.placement_count(),
                level.goal_x
            ),
            Err(e) => {
                failures += 1;
                println!("  FAIL  {}: {}", path.display(), e);
            }
        }
    }

    println!("Checked {} level file(s), {} failed", files.len(), failures);
    if failures > 0 {
        anyhow::bail!("{} level file(s) failed validation", failures);
    }
    Ok(())
}

/// Compress every plain level into `out`
fn pack_levels(dir: &Path, out: &Path) -> Result<()> {
    std::fs::create_dir_all(out)?;
    let files = level_files(dir, false)?;

    for path in &files {
        let level = load_level(path).with_context(|| format!("loading {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .context("level file name is not UTF-8")?;
        let dest = out.join(format!("{}.br", name));
        save_level(&level, &dest).with_context(|| format!("writing {}", dest.display()))?;

        let before = std::fs::metadata(path)?.len();
        let after = std::fs::metadata(&dest)?.len();
        println!("  {} -> {} ({} -> {} bytes)", path.display(), dest.display(), before, after);
    }

    println!("Packed {} level file(s)", files.len());
    Ok(())
}

/// Files the web page needs at runtime, relative to the project root
const WEB_ASSETS: [&str; 2] = ["assets/levels", "assets/audio"];

const MQ_JS_BUNDLE_URL: &str =
    "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

/// Build the WASM viewer and lay out a servable `dist/web`
fn build_web(dev: bool) -> Result<()> {
    let root = project_root();
    let page = root.join("web/index.html");
    if !page.exists() {
        anyhow::bail!("missing {}", page.display());
    }

    println!("Building WASM viewer...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", "jumpman", "--target", "wasm32-unknown-unknown"]),
    )?;

    let dist = root.join("dist/web");
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    let wasm = root.join("target/wasm32-unknown-unknown/release/jumpman.wasm");
    std::fs::copy(&wasm, dist.join("jumpman.wasm"))
        .with_context(|| format!("copying {}", wasm.display()))?;

    // The page loads jumpman.wasm through macroquad's loader
    let mut html = std::fs::read_to_string(&page)?;
    if dev {
        html = html
            .replace("<!-- BANNER -->", &format!("DEV build {}", jumpman::VERSION))
            .replace("<title>JumpMan", "<title>[DEV] JumpMan");
    }
    std::fs::write(dist.join("index.html"), html)?;

    download_file(MQ_JS_BUNDLE_URL, &dist.join("mq_js_bundle.js"))?;

    std::fs::create_dir_all(dist.join("assets"))?;
    for dir in WEB_ASSETS {
        let src = root.join(dir);
        if src.is_dir() {
            copy_dir_recursive(&src, &dist.join(dir))?;
        }
    }
    let config = root.join("assets/config.ron");
    if config.exists() {
        std::fs::copy(&config, dist.join("assets/config.ron"))?;
    }

    // The viewer enumerates levels through the manifest written by build.rs
    if !dist.join("assets/levels/manifest.txt").exists() {
        anyhow::bail!("level manifest missing from dist; was build.rs run?");
    }

    println!("Done! Serve {} over HTTP", dist.display());
    Ok(())
}
