//! Command line front end.
//!
//! > `zipzap zip <input> [-o <output>] [--force] [--no-stats] [--json] [--time] [--contents] [--freq] [--tree]`
//!
//! compresses a text file. Without `-o` the output is the input path with its
//! extension replaced by the configured one (`.zz` by default).
//!
//! > `zipzap zap <input> [-o <output>] [same flags]`
//!
//! decompresses a `.zz` file. Without `-o` the output is `<stem>_decoded.txt`
//! next to the input.
//!
//! An existing output file is only replaced after a confirmation prompt,
//! or unconditionally with `--force`.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use zipzap::config::CompressionConfig;

pub mod display;
pub mod zap;
pub mod zip;

#[derive(Parser, Debug)]
#[command(author, version, about = "ZipZap: Huffman compression for text files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a text file into a .zz file
    Zip(CommandArgs),

    /// Decompress a .zz file into a text file
    Zap(CommandArgs),
}

#[derive(Args, Debug)]
pub struct CommandArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite the output file without asking
    #[arg(short, long)]
    pub force: bool,

    /// Load settings from a JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not print file statistics
    #[arg(long)]
    pub no_stats: bool,

    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,

    /// Show timing of each phase
    #[arg(long)]
    pub time: bool,

    /// Show the text and the encoded bits
    #[arg(long)]
    pub contents: bool,

    /// Show the frequency table
    #[arg(long)]
    pub freq: bool,

    /// Show the Huffman tree
    #[arg(long)]
    pub tree: bool,
}

impl CommandArgs {
    pub fn load_config(&self) -> Result<CompressionConfig> {
        match &self.config {
            Some(path) => CompressionConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => Ok(CompressionConfig::default()),
        }
    }
}

pub fn ensure_input_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("the file {} does not exist", path.display());
    }
    Ok(())
}

/// Ask before replacing an existing file. Returns an error when the user declines.
pub fn confirm_overwrite(path: &Path, force: bool) -> Result<()> {
    if force || !path.exists() {
        return Ok(());
    }

    print!("{} already exists. Overwrite? [y/N] ", path.display());
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Ok(())
    } else {
        bail!("not overwriting {}", path.display())
    }
}

pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}
