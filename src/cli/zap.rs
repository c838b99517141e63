use std::fs;

use anyhow::{Context, Result};
use zipzap::{CompressedFile, Decoder};

use crate::cli::display::{self, FileStats};
use crate::cli::{confirm_overwrite, ensure_input_exists, has_extension, CommandArgs};

pub fn zap(args: CommandArgs) -> Result<()> {
    let config = args.load_config()?;
    let input_path = &args.input;

    if !has_extension(input_path, &config.extension) {
        tracing::warn!("decompressing a non-.{} file", config.extension);
    }
    ensure_input_exists(input_path)?;

    let output_path = args.output.clone().unwrap_or_else(|| {
        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        input_path.with_file_name(format!("{stem}{}.txt", config.decoded_suffix))
    });
    confirm_overwrite(&output_path, args.force)?;

    let (file, read_time) = display::timed(|| CompressedFile::read(input_path));
    let file = file.with_context(|| format!("failed to read {}", input_path.display()))?;

    let decoder = Decoder::new(file.table());
    let (decoded, decode_time) = display::timed(|| decoder.decode(file.bits()));
    let decoded = decoded.context("decompression failed")?;

    fs::write(&output_path, &decoded)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    tracing::info!(
        event = "zap_complete",
        input = %input_path.display(),
        output = %output_path.display(),
        chars = file.table().total(),
        "zapped"
    );

    if !args.no_stats {
        let file_stats = FileStats::measure(input_path, &output_path)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&file_stats)?);
        } else {
            println!("{}", file_stats.render("Compressed size", "Decoded size"));
        }
    }
    if args.time {
        println!(
            "{}",
            display::time_stats(&[("Read", read_time), ("Decode", decode_time)])
        );
    }
    if args.contents {
        print!("{}", display::file_content(&file.bits().to_string(), "Encoded Bits"));
        print!("{}", display::file_content(&decoded, "Decoded Text"));
    }
    if args.freq {
        print!("{}", display::frequency_table(file.table()));
    }
    if args.tree {
        print!("{}", display::tree_diagram(decoder.tree()));
    }
    Ok(())
}
