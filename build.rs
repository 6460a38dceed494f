//! Build script for the songharvest CLI.
//!
//! Places the `.env.example` template next to the `.env` file the binary loads
//! at startup (`<data_local_dir>/songharvest/`), so a fresh install has a
//! template to copy from:
//!
//! - Linux: `~/.local/share/songharvest/.env.example`
//! - macOS: `~/Library/Application Support/songharvest/.env.example`
//! - Windows: `%LOCALAPPDATA%/songharvest/.env.example`
//!
//! Nothing here may break the build: a missing template or an unwritable data
//! directory only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");
    if !template.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("songharvest");

    let copied = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::read_to_string(&template))
        .and_then(|contents| fs::write(out_dir.join(".env.example"), contents));
    if let Err(e) = copied {
        println!(
            "cargo:warning=cannot copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
