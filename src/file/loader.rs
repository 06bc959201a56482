//! Tree loading from files and stdin.
//!
//! The format is picked from the file name: `.json`, `.yaml`/`.yml`, or
//! `.jsonl`/`.ndjson`, each optionally followed by `.gz`. Unknown extensions
//! are tried as JSON first and then as YAML.

use crate::document::node::Node;
use crate::document::parser::{parse_json, parse_json_value, parse_yaml};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Formats a tree can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Jsonl,
    Yaml,
    /// JSON, falling back to YAML
    Unknown,
}

/// Loads and parses a tree from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use treesift::file::loader::load_tree_file;
///
/// let root = load_tree_file("cid_6.json").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read or decompressed
/// - The contents do not parse in the detected format
pub fn load_tree_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    let format = determine_format(path_ref);
    tracing::debug!(path = %path_ref.display(), ?format, is_gzipped, "loading tree");
    parse_content(&content, format)
}

/// Loads and parses a tree from standard input.
///
/// Gzip input is detected by its magic bytes. The text is tried as JSON,
/// then as JSONL, then as YAML.
pub fn load_tree_from_stdin() -> Result<Node> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    // gzip magic bytes
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    if let Ok(root) = parse_json(&content) {
        return Ok(root);
    }
    if let Ok(root) = parse_jsonl_content(&content) {
        return Ok(root);
    }
    parse_yaml(&content).context("Failed to parse stdin: input is not JSON, JSONL, or YAML")
}

/// Parses `content` in the given format.
pub fn parse_content(content: &str, format: Format) -> Result<Node> {
    match format {
        Format::Json => parse_json(content).context("Failed to parse JSON"),
        Format::Jsonl => parse_jsonl_content(content),
        Format::Yaml => parse_yaml(content).context("Failed to parse YAML"),
        Format::Unknown => parse_json(content)
            .or_else(|_| parse_yaml(content))
            .context("Failed to parse file as JSON or YAML"),
    }
}

/// Parses newline-delimited JSON into a sequence with one element per line.
///
/// Blank lines are skipped.
pub fn parse_jsonl_content(content: &str) -> Result<Node> {
    let mut lines = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_json::Value = serde_json::from_str(line)
            .with_context(|| format!("Invalid JSON on line {}", line_num + 1))?;
        lines.push(parse_json_value(&value));
    }

    if lines.is_empty() {
        anyhow::bail!("No valid JSON found in JSONL content");
    }

    Ok(Node::Sequence(lines))
}

/// Determines the format from the file name, ignoring a `.gz` suffix.
///
/// - `data.jsonl.gz` → `Jsonl`
/// - `data.yml` → `Yaml`
/// - `data.txt` → `Unknown`
pub fn determine_format<P: AsRef<Path>>(path: P) -> Format {
    let path_str = path.as_ref().to_string_lossy().to_lowercase();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    if base.ends_with(".jsonl") || base.ends_with(".ndjson") {
        Format::Jsonl
    } else if base.ends_with(".json") {
        Format::Json
    } else if base.ends_with(".yaml") || base.ends_with(".yml") {
        Format::Yaml
    } else {
        Format::Unknown
    }
}

fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
