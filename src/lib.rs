//! Batch helpers for preparing sprite and audio assets in a game resource tree.
//!
//! Each sub-command is a single pass over a directory that reports what it did
//! per file and finishes with a tally. Per-file failures are classified and
//! counted, never fatal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod audio;
pub mod audit;
pub mod domain;
pub mod error;
pub mod fs;
pub mod logging;
pub mod magazine;
pub mod meta;
pub mod trim;
pub mod wielded;

#[derive(Parser, Debug)]
#[command(name = "asset-tools", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Down-mix multi-channel .ogg clips to mono into an output directory
    Mono {
        /// Directory holding the .ogg clips (top level only)
        #[arg(short, long, env = "ASSET_TOOLS_AUDIO_DIR")]
        input: PathBuf,

        /// Where mono files are written [default: <INPUT>/mono_output]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Copy the magazine sprite from a parent folder into sub-folders lacking it
    Addmag {
        /// Root of the sprite tree
        #[arg(env = "ASSET_TOOLS_GUNS_DIR", default_value = ".")]
        root: PathBuf,

        #[arg(long, default_value = magazine::MAGAZINE_SPRITE)]
        filename: String,
    },
    /// Duplicate in-hand sprites as wielded variants and register them in meta.json
    Wielded {
        /// Root of the sprite tree
        #[arg(env = "ASSET_TOOLS_GUNS_DIR", default_value = ".")]
        root: PathBuf,
    },
    /// List folders missing a specific file
    Audit {
        /// The root folder to start the search from
        #[arg(default_value = ".")]
        root: PathBuf,

        /// The name of the file to check for
        #[arg(long, default_value = audit::DEFAULT_REQUIRED_FILE)]
        filename: String,
    },
    /// Trim transparent borders from every PNG in a directory (not recursive)
    Trim {
        /// Directory holding the PNG files
        #[arg(short, long, env = "ASSET_TOOLS_TRIM_DIR")]
        dir: PathBuf,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Mono { input, output } => {
            let output = output.unwrap_or_else(|| audio::default_output_dir(&input));
            audio::convert_directory(&input, &output)
                .with_context(|| format!("convert clips in {}", input.display()))?;
        }
        Command::Addmag { root, filename } => {
            magazine::propagate(&root, &filename);
        }
        Command::Wielded { root } => {
            wielded::generate(&root);
        }
        Command::Audit { root, filename } => {
            audit::print_audit(&root, &filename);
        }
        Command::Trim { dir } => {
            trim::trim_directory(&dir)
                .with_context(|| format!("trim images in {}", dir.display()))?;
        }
    }
    Ok(())
}
