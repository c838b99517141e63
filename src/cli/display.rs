//! Plain-text rendering of stats, timings, tables and trees.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use zipzap::{FrequencyTable, HuffmanNode, HuffmanTree};

const CONTENT_LINE_WIDTH: usize = 50;
const CONTENT_MAX_LINES: usize = 5;

/// Run `f` and return its result with the elapsed time.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let started = Instant::now();
    let value = f();
    (value, started.elapsed())
}

#[derive(Debug, Serialize)]
pub struct FileStats {
    pub input_size: u64,
    pub output_size: u64,
    /// Percentage saved relative to the input, negative when the output grew.
    pub reduction: f64,
}

impl FileStats {
    pub fn measure(input: &Path, output: &Path) -> Result<Self> {
        let input_size = fs::metadata(input)?.len();
        let output_size = fs::metadata(output)?.len();
        let reduction = if input_size == 0 {
            0.0
        } else {
            100.0 * (input_size as f64 - output_size as f64) / input_size as f64
        };
        Ok(Self {
            input_size,
            output_size,
            reduction,
        })
    }

    pub fn render(&self, input_label: &str, output_label: &str) -> String {
        format!(
            "Size reduction:  {:>10.2}%\n{input_label}:  {:>10} bytes\n{output_label}:  {:>10} bytes",
            self.reduction, self.input_size, self.output_size
        )
    }
}

pub fn time_stats(phases: &[(&str, Duration)]) -> String {
    phases
        .iter()
        .map(|(name, elapsed)| format!("{name}: {:.4} s", elapsed.as_secs_f64()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// First few fixed-width lines of `text`, numbered.
pub fn file_content(text: &str, title: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let lines: Vec<String> = chars
        .chunks(CONTENT_LINE_WIDTH)
        .map(|chunk| chunk.iter().collect())
        .collect();

    let mut out = format!("── {title} ──\n");
    for (number, line) in lines.iter().take(CONTENT_MAX_LINES).enumerate() {
        let _ = writeln!(out, "{:>3} │ {}", number + 1, line.escape_debug());
    }
    if lines.len() > CONTENT_MAX_LINES {
        out.push_str("    │ ...\n");
    }
    out
}

/// Symbols sorted by descending frequency. Equal counts keep table order.
pub fn frequency_table(table: &FrequencyTable) -> String {
    let mut entries = table.entries().to_vec();
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    let mut out = format!("{:^11} │ {:>10}\n", "Character", "Frequency");
    out.push_str(&"─".repeat(25));
    out.push('\n');
    for entry in entries {
        let _ = writeln!(out, "{:^11} │ {:>10}", format!("{:?}", entry.symbol), entry.count);
    }
    out
}

pub fn tree_diagram(tree: &HuffmanTree) -> String {
    let Some(root) = tree.root() else {
        return "(empty Huffman tree)\n".to_string();
    };
    let mut out = String::new();
    render_node(root, "", "", &mut out);
    out
}

fn render_node(node: &HuffmanNode, lead: &str, child_lead: &str, out: &mut String) {
    match node.symbol() {
        Some(symbol) => {
            let _ = writeln!(out, "{lead}{symbol:?} : {}", node.frequency());
        }
        None => {
            let _ = writeln!(out, "{lead}• : {}", node.frequency());
        }
    }
    if let Some((left, right)) = node.children() {
        render_node(
            left,
            &format!("{child_lead}├── "),
            &format!("{child_lead}│   "),
            out,
        );
        render_node(
            right,
            &format!("{child_lead}└── "),
            &format!("{child_lead}    "),
            out,
        );
    }
}
