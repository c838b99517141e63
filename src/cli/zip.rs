use std::fs;

use anyhow::{Context, Result};
use zipzap::{CompressionStats, Compressor, HuffmanTree};

use crate::cli::display::{self, FileStats};
use crate::cli::{confirm_overwrite, ensure_input_exists, has_extension, CommandArgs};

pub fn zip(args: CommandArgs) -> Result<()> {
    let config = args.load_config()?;
    let input_path = &args.input;

    if has_extension(input_path, &config.extension) {
        tracing::warn!("compressing a .{} file", config.extension);
    }
    ensure_input_exists(input_path)?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| input_path.with_extension(&config.extension));
    confirm_overwrite(&output_path, args.force)?;

    let raw = fs::read(input_path)
        .with_context(|| format!("failed to read {}", input_path.display()))?;
    let text = config.decode_input(&raw);
    if text.chars().count() < config.small_input_threshold {
        tracing::warn!("very small files may compress poorly");
    }

    let compressor = Compressor::new(config);
    let (compressed, encode_time) = display::timed(|| compressor.compress(&text));
    let compressed = compressed.context("compression failed")?;

    let (written, write_time) = display::timed(|| fs::write(&output_path, &compressed.data));
    written.with_context(|| format!("failed to write {}", output_path.display()))?;

    tracing::info!(
        event = "zip_complete",
        input = %input_path.display(),
        output = %output_path.display(),
        bytes = compressed.data.len(),
        "zipped"
    );

    let stats = CompressionStats {
        bytes_written: compressed.data.len(),
        ..compressed.stats
    };
    if !args.no_stats {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            let file_stats = FileStats::measure(input_path, &output_path)?;
            println!("{}", file_stats.render("Original size", "Compressed size"));
        }
    }
    if args.time {
        println!(
            "{}",
            display::time_stats(&[("Encode", encode_time), ("Write", write_time)])
        );
    }
    if args.contents {
        print!("{}", display::file_content(&text, "Original Text"));
        print!("{}", display::file_content(&compressed.file.bits().to_string(), "Encoded Bits"));
    }
    if args.freq {
        print!("{}", display::frequency_table(compressed.file.table()));
    }
    if args.tree {
        print!("{}", display::tree_diagram(&HuffmanTree::build(compressed.file.table())));
    }
    Ok(())
}
