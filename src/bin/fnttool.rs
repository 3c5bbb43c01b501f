//! fnttool - convert an NDS `fnt.bin` to JSON and back.
//!
//! The direction is picked from the input: anything containing a zero byte
//! is treated as a binary table, everything else as JSON. The output lands
//! next to the input with its extension swapped (`.json` / `.bin`) unless
//! `--output` is given.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use ndsfnt::formats::fnt::Fnt;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fnttool")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert an NDS file name table between fnt.bin and JSON")]
struct Cli {
    /// Input file: binary if it contains a zero byte, JSON otherwise
    input: PathBuf,

    /// Output file (default: input with its extension replaced)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    BinToJson,
    JsonToBin,
}

impl Direction {
    fn sniff(data: &[u8]) -> Self {
        if data.contains(&0) {
            Direction::BinToJson
        } else {
            Direction::JsonToBin
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Direction::BinToJson => "json",
            Direction::JsonToBin => "bin",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Direction::BinToJson => "BIN -> JSON",
            Direction::JsonToBin => "JSON -> BIN",
        }
    }
}

fn output_path(input: &Path, direction: Direction) -> PathBuf {
    input.with_extension(direction.extension())
}

fn bin_to_json(data: &[u8]) -> Result<Vec<u8>> {
    let fnt = Fnt::from_bytes(data).context("failed to decode FNT")?;
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    fnt.serialize(&mut ser).context("failed to serialize JSON")?;
    Ok(out)
}

fn json_to_bin(data: &[u8]) -> Result<Vec<u8>> {
    let fnt: Fnt = serde_json::from_slice(data).context("failed to parse JSON")?;
    fnt.to_bytes().context("failed to encode FNT")
}

fn convert(cli: &Cli) -> Result<(PathBuf, Direction)> {
    let data = fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let direction = Direction::sniff(&data);
    debug!(input = %cli.input.display(), bytes = data.len(), ?direction, "read input");

    let converted = match direction {
        Direction::BinToJson => bin_to_json(&data)?,
        Direction::JsonToBin => json_to_bin(&data)?,
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| output_path(&cli.input, direction));
    fs::write(&output, &converted)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(output = %output.display(), bytes = converted.len(), "wrote output");

    Ok((output, direction))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match convert(&cli) {
        Ok((output, direction)) => {
            println!(
                "Converted {} to {} ({}).",
                cli.input.display(),
                output.display(),
                direction.label()
            );
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
    "first_id": 0,
    "files": [
        "a.bin"
    ],
    "folders": {
        "sub": {
            "first_id": 1,
            "files": [
                "b.bin"
            ]
        }
    }
}"#;

    #[test]
    fn sniffs_direction() {
        assert_eq!(Direction::sniff(&[0x08, 0, 0, 0]), Direction::BinToJson);
        assert_eq!(Direction::sniff(br#"{"first_id": 0}"#), Direction::JsonToBin);
    }

    #[test]
    fn swaps_extension() {
        assert_eq!(
            output_path(Path::new("rom/fnt.bin"), Direction::BinToJson),
            Path::new("rom/fnt.json")
        );
        assert_eq!(
            output_path(Path::new("fnt.json"), Direction::JsonToBin),
            Path::new("fnt.bin")
        );
        assert_eq!(
            output_path(Path::new("fnt"), Direction::JsonToBin),
            Path::new("fnt.bin")
        );
    }

    #[test]
    fn converts_both_ways() {
        let bin = json_to_bin(SAMPLE_JSON.as_bytes()).unwrap();
        assert_eq!(Direction::sniff(&bin), Direction::BinToJson);
        let json = bin_to_json(&bin).unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), SAMPLE_JSON);
    }

    #[test]
    fn reports_bad_json() {
        let err = json_to_bin(br#"{"files": []}"#).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse JSON"));
    }
}
