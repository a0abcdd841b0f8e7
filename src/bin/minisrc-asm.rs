use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use minisrc_rs::operand::RangeMode;
use minisrc_rs::render::{render, OutputFormat};
use minisrc_rs::{AsmConfig, Assembler};

#[derive(Parser, Debug)]
#[command(author, version, about = "Mini SRC assembler: source lines to a 32-bit memory image")]
struct Opts {
    /// Input assembly file (one instruction or ORG per line); stdin when absent or `-`
    #[arg(value_name = "SRCFILE")]
    input: Option<PathBuf>,
    /// Write the image to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Verilog)]
    format: OutputFormat,
    /// JSON assembler configuration; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Keep the low 19 bits of oversized displacements instead of rejecting them
    #[arg(long)]
    wrap: bool,
    /// Encode brmi with an empty condition field, like the original generator
    #[arg(long)]
    legacy_brmi: bool,
}

fn load_config(opts: &Opts) -> Result<AsmConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            let txt = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&txt).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AsmConfig::default(),
    };
    if opts.wrap {
        cfg.range = RangeMode::Wrap;
    }
    if opts.legacy_brmi {
        cfg.legacy_brmi = true;
    }
    Ok(cfg)
}

fn read_source(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let cfg = load_config(&opts)?;
    let source = read_source(opts.input.as_ref())?;

    let assembly = Assembler::new(cfg).assemble(&source);
    let image = match assembly.into_result() {
        Ok(image) => image,
        Err(errors) => {
            for e in errors.iter() {
                eprintln!("{e}");
            }
            bail!(errors);
        }
    };
    info!(words = image.len(), "assembled");

    let text = render(&image, opts.format)?;
    if let Some(path) = opts.output {
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    } else {
        print!("{text}");
    }
    Ok(())
}
